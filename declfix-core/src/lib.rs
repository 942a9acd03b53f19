//! Core run pipeline, extracted from the CLI.
//!
//! The runner consumes a declarative [`PatchScript`], checks the structural
//! precondition, dispatches every descriptor through the edit transforms,
//! aggregates outcomes into a report, and optionally invokes the external
//! verify command. All filesystem access goes through the [`SourceStore`]
//! port so dry runs and tests can substitute an overlay.
//!
//! [`PatchScript`]: declfix_types::script::PatchScript

mod error;
mod ports;
mod runner;
mod verify;

pub use error::RunError;
pub use ports::{FsStore, OverlayStore, SourceStore};
pub use runner::{run_script, RunOutcome, RunSettings};
pub use verify::run_verify;
