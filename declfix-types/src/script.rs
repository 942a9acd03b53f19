use crate::ops::PatchOp;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// A declarative correction script: an ordered list of patch descriptors
/// plus the structural precondition and optional verify step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchScript {
    pub schema: String,

    /// A file that must exist under the repo root before any mutation.
    /// Its absence aborts the whole run.
    pub root_marker: Utf8PathBuf,

    #[serde(default)]
    pub ops: Vec<PatchOp>,

    /// External checker invoked after all operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<VerifyCommand>,
}

impl PatchScript {
    pub fn new(root_marker: impl Into<Utf8PathBuf>) -> Self {
        Self {
            schema: crate::schema::DECLFIX_SCRIPT_V1.to_string(),
            root_marker: root_marker.into(),
            ops: vec![],
            verify: None,
        }
    }

    /// Whether the declared schema is one this build understands.
    pub fn schema_supported(&self) -> bool {
        self.schema == crate::schema::DECLFIX_SCRIPT_V1
    }
}

/// An external static-checker invocation. Runs synchronously, blocking,
/// with no timeout; output lines containing `error_marker` are counted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCommand {
    pub command: String,

    #[serde(default)]
    pub args: Vec<String>,

    /// Substring identifying an error line in the checker's output.
    pub error_marker: String,
}

#[cfg(test)]
mod tests {
    use super::PatchScript;

    #[test]
    fn new_script_carries_current_schema() {
        let script = PatchScript::new("src/registry.json");
        assert!(script.schema_supported());
        assert!(script.ops.is_empty());
        assert!(script.verify.is_none());
    }

    #[test]
    fn unknown_schema_is_unsupported() {
        let mut script = PatchScript::new("marker");
        script.schema = "declfix.script.v9".to_string();
        assert!(!script.schema_supported());
    }
}
