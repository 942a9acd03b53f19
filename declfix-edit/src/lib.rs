//! Idempotent buffer transforms.
//!
//! Responsibilities:
//! - Decide, for an anchor/replacement pair, whether an edit is already
//!   done, impossible, or should be applied.
//! - The two field transformers built on the block locator: insert a field
//!   after an anchor, and toggle a field's optionality.
//!
//! Every transform is pure: it takes the current buffer and returns an
//! [`Outcome`] plus the rewritten buffer when (and only when) the outcome is
//! `Applied`. Persistence and aggregation live in `declfix-core`.

use declfix_scan::locate_block;
use declfix_types::outcome::Outcome;
use tracing::debug;

/// Result of one buffer transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub outcome: Outcome,
    /// The rewritten buffer. `Some` exactly when `outcome` is `Applied`.
    pub new_contents: Option<String>,
}

impl EditOutcome {
    fn applied(new_contents: String) -> Self {
        Self {
            outcome: Outcome::Applied,
            new_contents: Some(new_contents),
        }
    }

    fn unchanged(outcome: Outcome) -> Self {
        Self {
            outcome,
            new_contents: None,
        }
    }
}

/// Replace the anchor's first occurrence with the replacement.
///
/// The decision order is what makes repeated invocation safe:
/// 1. marker already present → skipped ("already applied")
/// 2. anchor absent → failed ("anchor not found")
/// 3. otherwise replace and report applied
///
/// Once applied, step 1 short-circuits every subsequent run. The marker
/// defaults to the replacement's first line, trimmed.
pub fn replace_anchored(
    contents: &str,
    anchor: &str,
    replacement: &str,
    marker: Option<&str>,
) -> EditOutcome {
    let derived;
    let marker = match marker {
        Some(m) => m,
        None => {
            derived = replacement.lines().next().unwrap_or("").trim().to_string();
            derived.as_str()
        }
    };

    if !marker.is_empty() && contents.contains(marker) {
        return EditOutcome::unchanged(Outcome::skipped("already applied"));
    }
    if !contents.contains(anchor) {
        return EditOutcome::unchanged(Outcome::failed("anchor not found"));
    }

    debug!(marker, "replacing first anchor occurrence");
    EditOutcome::applied(contents.replacen(anchor, replacement, 1))
}

/// Insert `field` on its own line immediately after the anchor field inside
/// the named block.
///
/// The duplicate-name check and the anchor search are both scoped to the
/// located block span, and the insertion is spliced at the in-block
/// position, so an identically named anchor in an unrelated block can never
/// capture the insertion.
pub fn insert_field(contents: &str, block_name: &str, anchor: &str, field: &str) -> EditOutcome {
    let Some(span) = locate_block(contents, block_name) else {
        return EditOutcome::unchanged(Outcome::failed(format!(
            "declaration {block_name} not found"
        )));
    };
    let block = span.slice(contents);

    let name = bare_field_name(field);
    if block.contains(name) {
        return EditOutcome::unchanged(Outcome::skipped(format!(
            "{name} already in {block_name}"
        )));
    }

    let Some(rel) = block.find(anchor) else {
        return EditOutcome::unchanged(Outcome::failed(format!(
            "anchor {anchor:?} not found in {block_name}"
        )));
    };

    let at = span.start + rel + anchor.len();
    debug!(block_name, name, at, "inserting field after anchor");
    let mut new_contents = String::with_capacity(contents.len() + field.len() + 1);
    new_contents.push_str(&contents[..at]);
    new_contents.push('\n');
    new_contents.push_str(field);
    new_contents.push_str(&contents[at..]);
    EditOutcome::applied(new_contents)
}

/// Rewrite the first in-block match of `pattern`, swapping its first `:`
/// for `?:` (required field → optional field).
///
/// Check and mutation are both block-scoped: only the block substring is
/// rewritten and then spliced back at the same span, so a matching pattern
/// elsewhere in the file is never touched. A missing block or field is
/// routine drift and reports skipped, not failed.
pub fn toggle_optional(contents: &str, block_name: &str, pattern: &str) -> EditOutcome {
    let Some(span) = locate_block(contents, block_name) else {
        return EditOutcome::unchanged(Outcome::skipped(format!(
            "declaration {block_name} not found"
        )));
    };
    let block = span.slice(contents);

    let optional = optional_form(pattern);
    if block.contains(&optional) {
        return EditOutcome::unchanged(Outcome::skipped("already optional"));
    }
    if !block.contains(pattern) {
        return EditOutcome::unchanged(Outcome::skipped(format!(
            "field not found in {block_name}"
        )));
    }

    debug!(block_name, pattern, "toggling field optionality");
    let new_block = block.replacen(pattern, &optional, 1);
    let mut new_contents =
        String::with_capacity(contents.len() + new_block.len() - block.len());
    new_contents.push_str(&contents[..span.start]);
    new_contents.push_str(&new_block);
    new_contents.push_str(&contents[span.end..]);
    EditOutcome::applied(new_contents)
}

/// The bare name of a field declaration: the text before the first `:`,
/// with a trailing `?` stripped.
pub fn bare_field_name(field: &str) -> &str {
    field
        .trim()
        .split(':')
        .next()
        .unwrap_or("")
        .trim_end_matches('?')
        .trim()
}

/// The optional spelling of a field pattern: its first `:` becomes `?:`.
pub fn optional_form(pattern: &str) -> String {
    pattern.replacen(':', "?:", 1)
}

#[cfg(test)]
mod tests {
    use super::{bare_field_name, optional_form, replace_anchored};
    use declfix_types::outcome::Outcome;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_field_name_strips_optionality_marker() {
        assert_eq!(bare_field_name("  icon?: string;"), "icon");
        assert_eq!(bare_field_name("label: string;"), "label");
        assert_eq!(bare_field_name("  targets: Record<string, number>;"), "targets");
    }

    #[test]
    fn optional_form_rewrites_first_colon_only() {
        assert_eq!(optional_form("  id: string;"), "  id?: string;");
        assert_eq!(
            optional_form("  targets: Record<string, number>;"),
            "  targets?: Record<string, number>;"
        );
    }

    #[test]
    fn replace_anchored_uses_first_replacement_line_as_marker() {
        let contents = "const a = 1;\nconst b = 2;\n";
        let first = replace_anchored(contents, "const b = 2;", "const b = 3;\nconst c = 4;", None);
        assert!(first.outcome.is_applied());

        let after = first.new_contents.expect("rewritten");
        let second = replace_anchored(&after, "const b = 2;", "const b = 3;\nconst c = 4;", None);
        assert_eq!(second.outcome, Outcome::skipped("already applied"));
        assert!(second.new_contents.is_none());
    }

    #[test]
    fn replace_anchored_reports_missing_anchor() {
        let out = replace_anchored("const a = 1;\n", "const z = 9;", "const z = 10;", None);
        assert_eq!(out.outcome, Outcome::failed("anchor not found"));
    }

    #[test]
    fn explicit_marker_overrides_derived_one() {
        let contents = "// patched-v2\nconst a = 1;\n";
        let out = replace_anchored(contents, "const a = 1;", "const a = 2;", Some("patched-v2"));
        assert_eq!(out.outcome, Outcome::skipped("already applied"));
    }

    #[test]
    fn replace_anchored_touches_first_occurrence_only() {
        let out = replace_anchored("x = old;\ny = old;\n", "old", "new", None);
        assert_eq!(out.new_contents.as_deref(), Some("x = new;\ny = old;\n"));
    }
}
