//! CSV output for the master sequence.
//!
//! Comma delimited, `"` as quote character, fields quoted only when they
//! need it, `\n` after every row.

use crate::{TabularError, TabularResult};
use logsheet_core::{MASTER_COLUMNS, MasterSequence};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

fn builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(b',')
        .quote(b'"')
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'));
    builder
}

/// Write the header and every record to `out`.
///
/// `path` is only used to label errors.
pub fn write_master_to<W: Write>(
    out: W,
    sequence: &MasterSequence,
    path: &Path,
) -> TabularResult<()> {
    let write_err = |source: csv::Error| TabularError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = builder().from_writer(out);
    writer.write_record(MASTER_COLUMNS).map_err(write_err)?;
    for record in sequence {
        writer.write_record(record.to_fields()).map_err(write_err)?;
    }
    writer.flush().map_err(|e| TabularError::io(path, e))?;
    Ok(())
}

/// Create (or truncate) `path` and write the master sequence to it.
pub fn write_master(path: &Path, sequence: &MasterSequence) -> TabularResult<()> {
    let file = File::create(path).map_err(|e| TabularError::io(path, e))?;
    write_master_to(file, sequence, path)?;
    info!(path = %path.display(), rows = sequence.len(), "Wrote master file");
    Ok(())
}
