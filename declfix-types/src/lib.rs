//! Shared DTOs (schemas-as-code) for the declfix workspace.
//!
//! # Design constraints
//! - These types are intended to be serialized to disk.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod ops;
pub mod outcome;
pub mod report;
pub mod script;
pub mod span;

/// Schema identifiers.
pub mod schema {
    pub const DECLFIX_SCRIPT_V1: &str = "declfix.script.v1";
    pub const DECLFIX_REPORT_V1: &str = "declfix.report.v1";
}
