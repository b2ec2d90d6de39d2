//! `logsheet completions` — Shell completion scripts.

use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

pub fn run<C: CommandFactory>(shell: Shell, out: &mut dyn Write) {
    let mut command = C::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, out);
}
