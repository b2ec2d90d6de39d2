//! `logsheet merge` — Combine a logsheet and its update log.

use clap::Args;
use logsheet_config::{
    AppConfig, DirectoryStore, LocationRequest, LocationSource, resolve_location,
};
use logsheet_core::{InsertionMode, ReconcileStats, RunSignals};
use logsheet_io::{Inputs, csv_file_name, load_inputs, resolve_in, write_master};
use std::io::Write;
use tracing::warn;

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Logsheet file name (".csv" is added if missing)
    #[arg(short, long)]
    pub logsheet: Option<String>,

    /// Update log file name
    #[arg(short, long)]
    pub updates: Option<String>,

    /// Output file name
    #[arg(short, long)]
    pub output: Option<String>,

    /// Working directory holding the files
    #[arg(short, long, conflicts_with = "use_saved_directory")]
    pub directory: Option<String>,

    /// Use the saved working directory
    #[arg(short = 's', long)]
    pub use_saved_directory: bool,

    /// Remember --directory for later runs (only if it is valid)
    #[arg(long, requires = "directory")]
    pub save_directory: bool,

    /// Where prior deletions go: "literal" or "anchored"
    #[arg(short, long)]
    pub mode: Option<InsertionMode>,

    /// Reconcile and report, but do not write the output file
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: MergeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = DirectoryStore::open_default();
    execute(&args, &config, &store, &mut std::io::stdout())
}

/// Run one merge against an explicit config and directory store, reporting to `out`.
pub fn execute(
    args: &MergeArgs,
    config: &AppConfig,
    store: &DirectoryStore,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mode = args.mode.unwrap_or(config.insertion_mode);

    let location = resolve_location(
        &LocationRequest {
            directory: args.directory.clone(),
            use_saved: args.use_saved_directory,
        },
        store,
    )?;

    // Only a valid, explicitly typed directory is remembered.
    if args.save_directory && location.valid && location.source == LocationSource::Explicit {
        store.save(&location.display())?;
        writeln!(out, "💾 Saved working directory: {}", location.display())?;
    }

    let dir = location.dir();
    let file = |arg: &Option<String>, default: &str| {
        resolve_in(dir, &csv_file_name(arg.as_deref().unwrap_or(default)))
    };
    let base_path = file(&args.logsheet, &config.files.logsheet);
    let update_path = file(&args.updates, &config.files.updates);
    let output_path = file(&args.output, &config.files.output);

    if output_path == base_path || output_path == update_path {
        return Err("Output file must differ from the input files".into());
    }

    let mut inputs: Option<Inputs> = None;
    if location.valid {
        match load_inputs(&base_path, &update_path) {
            Ok(loaded) => inputs = Some(loaded),
            Err(e) if e.is_not_found() => warn!("{e}"),
            Err(e) => return Err(e.into()),
        }
    }

    let signals = RunSignals {
        location_valid: location.valid,
        found_inputs: inputs.is_some(),
    };
    let outcome = logsheet_core::run(signals, mode, move || {
        inputs.map(Inputs::into_parts).unwrap_or_default()
    });

    let reconciliation = match outcome.into_result() {
        Ok(reconciliation) => reconciliation,
        Err(e) => {
            writeln!(out, "❌ The following errors occurred:")?;
            for line in error_lines(signals) {
                writeln!(out, "   * {line}")?;
            }
            return Err(e.into());
        }
    };

    print_summary(out, &reconciliation.stats, mode)?;

    if args.dry_run {
        writeln!(out)?;
        writeln!(out, "   🏷️  DRY RUN — {} not written.", output_path.display())?;
        return Ok(());
    }

    write_master(&output_path, &reconciliation.sequence)?;

    if output_path.is_file() {
        writeln!(out)?;
        writeln!(out, "✅ Success! Wrote {}", output_path.display())?;
    } else {
        return Err(format!("Output file {} was not created", output_path.display()).into());
    }

    Ok(())
}

/// Reasons a run was skipped. Files are not looked up in an invalid location.
fn error_lines(signals: RunSignals) -> Vec<&'static str> {
    let mut lines = Vec::new();
    if !signals.location_valid {
        lines.push("invalid directory was provided");
    } else if !signals.found_inputs {
        lines.push("file(s) could not be found");
    }
    lines
}

fn print_summary(
    out: &mut dyn Write,
    stats: &ReconcileStats,
    mode: InsertionMode,
) -> std::io::Result<()> {
    writeln!(out, "📋 Logsheet Combiner")?;
    writeln!(out, "===================")?;
    writeln!(out, "  Base entries:     {}", stats.base)?;
    writeln!(out, "  Update entries:   {}", stats.updates)?;
    writeln!(out, "  Matched:          {}", stats.matched)?;
    writeln!(out, "  Prior deletions:  {}", stats.prior_deletions)?;
    writeln!(out, "  In between:       {}", stats.between)?;
    writeln!(out, "  Mode:             {mode}")?;
    if stats.dropped > 0 {
        writeln!(out, "  ⚠️  Unplaced updates dropped: {}", stats.dropped)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use logsheet_core::FIELD_COUNT;
    use std::path::Path;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        merge: MergeArgs,
    }

    #[test]
    fn parses_full_argument_set() {
        let parsed = Harness::try_parse_from([
            "logsheet", "-l", "june", "-u", "june_updates", "-o", "june_master", "-d", "/tmp",
            "--save-directory", "--mode", "anchored",
        ])
        .unwrap();
        assert_eq!(parsed.merge.logsheet.as_deref(), Some("june"));
        assert_eq!(parsed.merge.directory.as_deref(), Some("/tmp"));
        assert!(parsed.merge.save_directory);
        assert_eq!(parsed.merge.mode, Some(InsertionMode::Anchored));
    }

    #[test]
    fn directory_conflicts_with_saved_directory() {
        let result = Harness::try_parse_from(["logsheet", "-d", "/tmp", "--use-saved-directory"]);
        assert!(result.is_err());
    }

    #[test]
    fn save_directory_needs_a_directory() {
        assert!(Harness::try_parse_from(["logsheet", "--save-directory"]).is_err());
    }

    #[test]
    fn unknown_mode_rejected() {
        assert!(Harness::try_parse_from(["logsheet", "--mode", "numeric"]).is_err());
    }

    // ── execute ─────────────────────────────────────────────────────────

    fn row(log_id_column: usize, key: &str, status: &str) -> String {
        let mut fields: Vec<String> = (0..FIELD_COUNT).map(|i| format!("f{i}")).collect();
        fields[log_id_column] = key.into();
        fields[22] = status.into();
        fields.join(",")
    }

    fn write_logs(dir: &Path) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(
            dir.join("logsheet.csv"),
            format!("header\n{}\n{}\n", row(13, "1001", "in"), row(13, "1003", "out")),
        )
        .unwrap();
        std::fs::write(
            dir.join("logsheet_updates.csv"),
            format!("header\n{}\n", row(1, "1002", "active")),
        )
        .unwrap();
    }

    fn args_for(dir: &Path) -> MergeArgs {
        MergeArgs {
            logsheet: None,
            updates: None,
            output: None,
            directory: Some(dir.display().to_string()),
            use_saved_directory: false,
            save_directory: false,
            mode: None,
            dry_run: false,
        }
    }

    fn execute_in(args: &MergeArgs, store: &DirectoryStore) -> (bool, String) {
        let mut out = Vec::new();
        let ok = execute(args, &AppConfig::default(), store, &mut out).is_ok();
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn invalid_directory_is_not_saved() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(tmp.path().join("current_directory.json"));
        let mut args = args_for(&tmp.path().join("does-not-exist"));
        args.save_directory = true;

        let (ok, printed) = execute_in(&args, &store);
        assert!(!ok);
        assert!(store.load().unwrap().is_none());
        assert!(printed.contains("The following errors occurred:"));
        assert!(printed.contains("* invalid directory was provided"));
        assert!(!printed.contains("file(s) could not be found"));
    }

    #[test]
    fn valid_directory_is_saved_and_merged() {
        let tmp = tempfile::tempdir().unwrap();
        let data = tmp.path().join("data");
        write_logs(&data);
        let store = DirectoryStore::new(tmp.path().join("current_directory.json"));
        let mut args = args_for(&data);
        args.save_directory = true;

        let (ok, printed) = execute_in(&args, &store);
        assert!(ok, "{printed}");
        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.directory, data.display().to_string());

        let master = logsheet_io::read_rows(&data.join("master_logsheet.csv")).unwrap();
        let keys: Vec<&str> = master.iter().map(|r| r[13].as_str()).collect();
        assert_eq!(keys, vec!["1001", "1002", "1003"]);
        assert!(printed.contains("Success!"));
    }

    #[test]
    fn directory_is_not_saved_unless_asked() {
        let tmp = tempfile::tempdir().unwrap();
        let data = tmp.path().join("data");
        write_logs(&data);
        let store = DirectoryStore::new(tmp.path().join("current_directory.json"));

        let (ok, _) = execute_in(&args_for(&data), &store);
        assert!(ok);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn output_matching_an_input_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_logs(tmp.path());
        let store = DirectoryStore::new(tmp.path().join("current_directory.json"));
        let before = std::fs::read_to_string(tmp.path().join("logsheet.csv")).unwrap();

        for name in ["logsheet", "logsheet_updates.csv"] {
            let mut args = args_for(tmp.path());
            args.output = Some(name.into());
            let mut out = Vec::new();
            let err = execute(&args, &AppConfig::default(), &store, &mut out).unwrap_err();
            assert!(err.to_string().contains("must differ"));
        }
        let after = std::fs::read_to_string(tmp.path().join("logsheet.csv")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        write_logs(tmp.path());
        let store = DirectoryStore::new(tmp.path().join("current_directory.json"));
        let mut args = args_for(tmp.path());
        args.dry_run = true;

        let (ok, printed) = execute_in(&args, &store);
        assert!(ok);
        assert!(printed.contains("DRY RUN"));
        assert!(printed.contains("In between:       1"));
        assert!(!tmp.path().join("master_logsheet.csv").exists());
    }

    #[test]
    fn missing_update_log_reports_files_only() {
        let tmp = tempfile::tempdir().unwrap();
        write_logs(tmp.path());
        std::fs::remove_file(tmp.path().join("logsheet_updates.csv")).unwrap();
        let store = DirectoryStore::new(tmp.path().join("current_directory.json"));

        let (ok, printed) = execute_in(&args_for(tmp.path()), &store);
        assert!(!ok);
        assert!(printed.contains("* file(s) could not be found"));
        assert!(!printed.contains("invalid directory"));
        assert!(!tmp.path().join("master_logsheet.csv").exists());
    }

    #[test]
    fn error_lines_per_signal() {
        let signals = |location_valid, found_inputs| RunSignals {
            location_valid,
            found_inputs,
        };
        assert_eq!(
            error_lines(signals(false, false)),
            vec!["invalid directory was provided"]
        );
        assert_eq!(
            error_lines(signals(true, false)),
            vec!["file(s) could not be found"]
        );
        assert!(error_lines(signals(true, true)).is_empty());
    }
}
