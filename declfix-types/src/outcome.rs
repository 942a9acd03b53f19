use serde::{Deserialize, Serialize};

/// The result of one patch operation.
///
/// Every operation returns one of these; the runner aggregates them into a
/// summary instead of mutating shared counters. `Skipped` is not an error:
/// it covers both "already applied" and tolerated drift (a target field or
/// declaration that no longer exists). `Failed` is recorded and reported but
/// never halts the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    Skipped(String),
    Failed(String),
}

impl Outcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Outcome::Skipped(reason.into())
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Outcome::Failed(reason.into())
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// The skip/failure reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Applied => None,
            Outcome::Skipped(r) | Outcome::Failed(r) => Some(r),
        }
    }
}
