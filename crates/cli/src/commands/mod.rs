pub mod completions;
pub mod config_cmd;
pub mod directory;
pub mod merge;
