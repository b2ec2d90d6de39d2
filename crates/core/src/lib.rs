//! # Logsheet Core
//!
//! Record model and reconciliation for the Logsheet Combiner.
//!
//! A *base log* holds the original log-in/log-out events; an *update log*
//! holds later edits and deletions that refer back to base entries by
//! `log_id`. This crate interleaves the two into one *master sequence*.
//! It does no I/O: rows come in already parsed and the sequence goes out
//! to whatever writes it.
//!
//! ## Pipeline
//!
//! ```text
//! rows ─▶ record ─▶ sequence ─▶ reconcile (remap) ─▶ assembler ─▶ MasterSequence
//! ```

pub mod assembler;
pub mod error;
pub mod reconcile;
pub mod record;
pub mod remap;
pub mod run;
pub mod sequence;

// Re-export key types at crate root for ergonomics
pub use assembler::MasterSequence;
pub use error::{Error, RecordError, Result, RowKind};
pub use reconcile::{InsertionMode, Placement, ReconcileStats, Reconciler, Reconciliation};
pub use record::{BaseEntry, FIELD_COUNT, MASTER_COLUMNS, MasterRecord, UpdateEntry};
pub use remap::remap;
pub use run::{RunOutcome, RunSignals, run};
