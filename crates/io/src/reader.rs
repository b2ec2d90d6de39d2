//! Row source: CSV files into typed log entries.

use crate::{TabularError, TabularResult};
use logsheet_core::{BaseEntry, RecordError, UpdateEntry};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Both logs of one run, unsorted.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub base: Vec<BaseEntry>,
    pub updates: Vec<UpdateEntry>,
}

impl Inputs {
    pub fn into_parts(self) -> (Vec<BaseEntry>, Vec<UpdateEntry>) {
        (self.base, self.updates)
    }
}

fn open(path: &Path) -> TabularResult<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TabularError::NotFound {
            path: path.to_path_buf(),
        },
        _ => TabularError::io(path, e),
    })
}

/// Data rows paired with the line they started on. The header is skipped.
fn read_numbered(path: &Path) -> TabularResult<Vec<(u64, Vec<String>)>> {
    let file = open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| TabularError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        rows.push((line, record.iter().map(str::to_string).collect()));
    }

    debug!(path = %path.display(), rows = rows.len(), "Read rows");
    Ok(rows)
}

/// Read every data row of a CSV file as text fields, header stripped.
pub fn read_rows(path: &Path) -> TabularResult<Vec<Vec<String>>> {
    Ok(read_numbered(path)?
        .into_iter()
        .map(|(_, fields)| fields)
        .collect())
}

fn load<T>(path: &Path) -> TabularResult<Vec<T>>
where
    T: TryFrom<Vec<String>, Error = RecordError>,
{
    read_numbered(path)?
        .into_iter()
        .map(|(line, fields)| {
            T::try_from(fields).map_err(|source| TabularError::Malformed {
                path: path.to_path_buf(),
                line,
                source,
            })
        })
        .collect()
}

/// Load the base log.
pub fn load_base(path: &Path) -> TabularResult<Vec<BaseEntry>> {
    load(path)
}

/// Load the update log.
pub fn load_updates(path: &Path) -> TabularResult<Vec<UpdateEntry>> {
    load(path)
}

/// Load both logs. Fails with [`TabularError::NotFound`] for the first missing file.
pub fn load_inputs(base_path: &Path, update_path: &Path) -> TabularResult<Inputs> {
    let base = load_base(base_path)?;
    let updates = load_updates(update_path)?;
    Ok(Inputs { base, updates })
}
