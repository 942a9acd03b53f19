use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// One declarative patch descriptor.
///
/// A script is an ordered list of these; the runner re-reads the target file
/// for every descriptor, decides, and persists at most one write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchOp {
    /// Human-readable label printed with the outcome line.
    pub label: String,

    /// Target file, relative to the repo root.
    pub file: Utf8PathBuf,

    #[serde(flatten)]
    pub kind: OpKind,
}

/// Operation kind for patch descriptors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OpKind {
    /// Replace the anchor's first occurrence with the replacement, unless the
    /// marker (default: the replacement's first line, trimmed) is already
    /// present anywhere in the file.
    ReplaceAnchored {
        anchor: String,
        replacement: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        marker: Option<String>,
    },

    /// Insert a new field declaration immediately after the anchor field
    /// inside the named declaration block. Both the duplicate-name check and
    /// the anchor search are scoped to the block.
    InsertField {
        block: String,
        anchor: String,
        field: String,
    },

    /// Rewrite the first in-block match of `pattern`, swapping its first `:`
    /// for `?:`. A missing block or field is tolerated drift, not a failure.
    ToggleOptional { block: String, pattern: String },
}

impl OpKind {
    /// Stable identifier used in rendered output and reports.
    pub fn name(&self) -> &'static str {
        match self {
            OpKind::ReplaceAnchored { .. } => "replace_anchored",
            OpKind::InsertField { .. } => "insert_field",
            OpKind::ToggleOptional { .. } => "toggle_optional",
        }
    }
}
