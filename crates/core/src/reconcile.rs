//! Reconciler — interleaves the update log into the base log.
//!
//! Both inputs must already be in [`sequence`](crate::sequence) order.
//! The pass walks the base entries once. After copying each base entry
//! into the output it scans the update log from a shared cursor and
//! places every update that fits one of three rules:
//!
//! | rule            | condition                                        | placement             |
//! |-----------------|--------------------------------------------------|-----------------------|
//! | Match           | `ref_log_id == log_id`                           | appended              |
//! | Prior deletion  | `ref_log_id < log_id` and status is `deleted`    | inserted before entry |
//! | Between         | `log_id < ref_log_id < next.log_id`              | appended              |
//!
//! The cursor only moves forward, to just past the last placed update.
//! An update that fits no rule is retried against later base entries as
//! long as the cursor has not moved past it; whatever is still unplaced
//! at the end is dropped.
//!
//! # Complexity
//!
//! When updates keep failing every rule the cursor stalls and each base
//! entry rescans the same tail, so the worst case is O(n·m). Inputs are
//! human-scale (hundreds to low thousands of rows).

use crate::assembler::MasterSequence;
use crate::record::{BaseEntry, UpdateEntry};
use crate::remap::remap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Where a prior deletion is inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertionMode {
    /// Insert at the base entry's loop index. Reproduces existing master files.
    ///
    /// The index lags behind the entry's real position once anything has
    /// been appended earlier in the pass. A deletion can only be classified
    /// while the first base entry is current (later ones are taken by the
    /// match or between rules first), so in practice every deletion goes to
    /// index 0 and several of them end up in reverse scan order.
    #[default]
    Literal,
    /// Insert immediately before the base entry's actual position.
    Anchored,
}

impl std::fmt::Display for InsertionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal => write!(f, "literal"),
            Self::Anchored => write!(f, "anchored"),
        }
    }
}

impl std::str::FromStr for InsertionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "literal" => Ok(Self::Literal),
            "anchored" => Ok(Self::Anchored),
            other => Err(format!(
                "unknown insertion mode '{other}' (expected 'literal' or 'anchored')"
            )),
        }
    }
}

/// Which rule placed an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Same `log_id` as the current base entry.
    Match,
    /// A deletion of an earlier event.
    PriorDeletion,
    /// Strictly between the current and the next base entry.
    Between,
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::PriorDeletion => write!(f, "prior_deletion"),
            Self::Between => write!(f, "between"),
        }
    }
}

/// Decide where `update` belongs relative to `current`, if anywhere yet.
///
/// Rules are tried in priority order. Keys compare as raw strings.
pub fn classify(
    current: &BaseEntry,
    next: Option<&BaseEntry>,
    update: &UpdateEntry,
) -> Option<Placement> {
    let key = update.ref_log_id.as_str();

    if key == current.log_id() {
        return Some(Placement::Match);
    }
    if key < current.log_id() && update.is_deletion() {
        return Some(Placement::PriorDeletion);
    }
    match next {
        Some(next) if current.log_id() < key && key < next.log_id() => Some(Placement::Between),
        _ => None,
    }
}

/// Counters for one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    pub base: usize,
    pub updates: usize,
    pub matched: usize,
    pub prior_deletions: usize,
    pub between: usize,
    /// Updates that never found a slot.
    pub dropped: usize,
}

impl ReconcileStats {
    pub fn placed(&self) -> usize {
        self.matched + self.prior_deletions + self.between
    }

    fn record(&mut self, placement: Placement) {
        match placement {
            Placement::Match => self.matched += 1,
            Placement::PriorDeletion => self.prior_deletions += 1,
            Placement::Between => self.between += 1,
        }
    }
}

/// The finished master sequence and how it was built.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub sequence: MasterSequence,
    pub stats: ReconcileStats,
}

/// Runs the merge pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    mode: InsertionMode,
}

impl Reconciler {
    pub fn new(mode: InsertionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> InsertionMode {
        self.mode
    }

    /// Interleave sorted `updates` into sorted `base`.
    pub fn reconcile(&self, base: &[BaseEntry], updates: &[UpdateEntry]) -> Reconciliation {
        let mut sequence = MasterSequence::with_capacity(base.len() + updates.len());
        let mut stats = ReconcileStats {
            base: base.len(),
            updates: updates.len(),
            ..Default::default()
        };
        let mut cursor = 0;

        for (i, entry) in base.iter().enumerate() {
            // Position of `entry` in the output; moves when deletions go in front of it.
            let mut anchor = sequence.len();
            sequence.append(entry.record().clone());

            let next = base.get(i + 1);
            let start = cursor;

            for (j, update) in updates.iter().enumerate().skip(start) {
                let Some(placement) = classify(entry, next, update) else {
                    trace!(
                        log_id = entry.log_id(),
                        ref_log_id = %update.ref_log_id,
                        "Update not placed yet"
                    );
                    continue;
                };

                let record = remap(update);
                match placement {
                    Placement::Match | Placement::Between => sequence.append(record),
                    Placement::PriorDeletion => {
                        let index = match self.mode {
                            InsertionMode::Literal => i,
                            InsertionMode::Anchored => anchor,
                        };
                        sequence.insert_at(index, record);
                        anchor += 1;
                    }
                }

                debug!(
                    log_id = entry.log_id(),
                    ref_log_id = %update.ref_log_id,
                    update_id = %update.update_id,
                    %placement,
                    "Placed update"
                );
                stats.record(placement);
                cursor = j + 1;
            }
        }

        stats.dropped = stats.updates - stats.placed();
        if stats.dropped > 0 {
            debug!(dropped = stats.dropped, "Updates left unplaced");
        }

        Reconciliation { sequence, stats }
    }
}
