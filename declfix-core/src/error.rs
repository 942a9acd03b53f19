//! Error types for the run pipeline.
//!
//! Two tiers, mapped to exit codes:
//! - Precondition (exit code 2): the structural precondition failed and the
//!   run aborted before any mutation.
//! - Internal (exit code 1): runtime faults such as file I/O errors or an
//!   unlaunchable verify command; these halt the run mid-sequence.
//!
//! Per-operation failures (missing anchors) are not errors at all: they are
//! recorded as outcomes and never surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    /// The repo root did not carry the required marker file, or the script
    /// schema is not supported. Nothing was mutated.
    #[error("structural precondition: {0}")]
    Precondition(String),

    /// A runtime/tool fault. Files patched before the fault stay patched.
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl RunError {
    /// The recommended process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Precondition(_) => 2,
            RunError::Internal(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RunError;

    #[test]
    fn precondition_maps_to_exit_code_2() {
        let err = RunError::Precondition("marker missing".to_string());
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("structural precondition"));
    }

    #[test]
    fn internal_maps_to_exit_code_1() {
        let err = RunError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.exit_code(), 1);
    }
}
