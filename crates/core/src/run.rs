//! Pre-condition checks around one reconciliation pass.
//!
//! The caller resolves the working location and loads both logs; this
//! module only looks at the resulting signals. When either is bad no
//! master sequence is built at all.

use crate::error::Error;
use crate::reconcile::{InsertionMode, Reconciler, Reconciliation};
use crate::record::{BaseEntry, UpdateEntry};
use crate::sequence::sequence;
use tracing::{info, warn};

/// What the caller found out before reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSignals {
    /// The working location exists and is usable.
    pub location_valid: bool,
    /// Both input logs were located.
    pub found_inputs: bool,
}

impl RunSignals {
    pub fn ok() -> Self {
        Self {
            location_valid: true,
            found_inputs: true,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Completed(Reconciliation),
    SkippedMissingFiles,
    SkippedInvalidLocation,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Turn a skipped run into the matching error.
    pub fn into_result(self) -> crate::Result<Reconciliation> {
        match self {
            Self::Completed(reconciliation) => Ok(reconciliation),
            Self::SkippedMissingFiles => Err(Error::InputUnavailable(
                "file(s) could not be found".into(),
            )),
            Self::SkippedInvalidLocation => Err(Error::LocationInvalid(
                "invalid directory was provided".into(),
            )),
        }
    }
}

/// Check the signals, then sort and reconcile the logs.
///
/// `inputs` is only called when both signals are good. An invalid
/// location wins over missing files, since the files were looked up
/// relative to it.
pub fn run<F>(signals: RunSignals, mode: InsertionMode, inputs: F) -> RunOutcome
where
    F: FnOnce() -> (Vec<BaseEntry>, Vec<UpdateEntry>),
{
    if !signals.location_valid {
        warn!("Working location is invalid, no files were processed");
        return RunOutcome::SkippedInvalidLocation;
    }
    if !signals.found_inputs {
        warn!("Input files not found, no files were processed");
        return RunOutcome::SkippedMissingFiles;
    }

    let (base, updates) = inputs();
    let (base, updates) = sequence(base, updates);
    let reconciler = Reconciler::new(mode);
    let reconciliation = reconciler.reconcile(&base, &updates);

    info!(
        mode = %reconciler.mode(),
        base = reconciliation.stats.base,
        updates = reconciliation.stats.updates,
        placed = reconciliation.stats.placed(),
        dropped = reconciliation.stats.dropped,
        "Reconciliation complete"
    );
    RunOutcome::Completed(reconciliation)
}
