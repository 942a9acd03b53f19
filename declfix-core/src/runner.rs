//! The dispatch loop.
//!
//! Strictly single-threaded and synchronous: descriptors run in script
//! order against the store, each one re-reading its target, deciding, and
//! persisting at most one write. Failed anchors accumulate in the report
//! while execution proceeds; only the structural precondition and file I/O
//! faults abort the run.

use crate::error::RunError;
use crate::ports::{FsStore, OverlayStore, SourceStore};
use crate::verify::run_verify;
use anyhow::Context;
use camino::Utf8PathBuf;
use chrono::Utc;
use declfix_edit::{insert_field, replace_anchored, toggle_optional, EditOutcome};
use declfix_types::ops::OpKind;
use declfix_types::report::{FileChange, OpResult, RunReport, ToolInfo};
use declfix_types::script::PatchScript;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub repo_root: Utf8PathBuf,

    /// Decide every operation but write nothing to disk.
    pub dry_run: bool,

    /// Run the script's verify command after the loop. Ignored on dry runs.
    pub run_verify: bool,
}

/// Outcome of [`run_script`].
#[derive(Debug)]
pub struct RunOutcome {
    pub report: RunReport,
    /// Unified diff over every file the run changed.
    pub patch: String,
}

/// Run a patch script against the repo root.
///
/// The structural precondition (marker file under the repo root) is checked
/// before any mutation; its absence aborts the whole run. The final exit
/// status is deliberately not derived from the per-operation failure count.
pub fn run_script(
    settings: &RunSettings,
    script: &PatchScript,
    tool: ToolInfo,
) -> Result<RunOutcome, RunError> {
    if !script.schema_supported() {
        return Err(RunError::Precondition(format!(
            "unsupported script schema {:?}",
            script.schema
        )));
    }

    let fs_store = FsStore::new(settings.repo_root.clone());
    if !fs_store.exists(&script.root_marker) {
        return Err(RunError::Precondition(format!(
            "marker file {} not found under {}",
            script.root_marker, settings.repo_root
        )));
    }

    let mut store: Box<dyn SourceStore> = if settings.dry_run {
        Box::new(OverlayStore::new(fs_store))
    } else {
        Box::new(fs_store)
    };

    let mut report = RunReport::new(tool);
    let mut before: BTreeMap<Utf8PathBuf, String> = BTreeMap::new();
    let mut after: BTreeMap<Utf8PathBuf, String> = BTreeMap::new();

    for op in &script.ops {
        let contents = store
            .read_to_string(&op.file)
            .with_context(|| format!("read {}", op.file))?;
        before
            .entry(op.file.clone())
            .or_insert_with(|| contents.clone());

        let edit = dispatch(&contents, &op.kind);
        debug!(label = %op.label, outcome = ?edit.outcome, "operation decided");

        let mut change = None;
        if let Some(new_contents) = edit.new_contents {
            store
                .write(&op.file, &new_contents)
                .with_context(|| format!("write {}", op.file))?;
            change = Some(FileChange {
                path: op.file.to_string(),
                sha256_before: sha256_hex(contents.as_bytes()),
                sha256_after: sha256_hex(new_contents.as_bytes()),
            });
            after.insert(op.file.clone(), new_contents);
        }

        report.record(OpResult {
            label: op.label.clone(),
            file: op.file.to_string(),
            op: op.kind.name().to_string(),
            outcome: edit.outcome,
            change,
        });
    }

    let patch = render_patch(&before, &after);

    if settings.run_verify
        && !settings.dry_run
        && let Some(verify) = &script.verify
    {
        report.verify = Some(run_verify(&settings.repo_root, verify)?);
    }

    report.run.ended_at = Some(Utc::now());
    info!(
        applied = report.summary.applied,
        skipped = report.summary.skipped,
        failed = report.summary.failed,
        "run complete"
    );

    Ok(RunOutcome { report, patch })
}

fn dispatch(contents: &str, kind: &OpKind) -> EditOutcome {
    match kind {
        OpKind::ReplaceAnchored {
            anchor,
            replacement,
            marker,
        } => replace_anchored(contents, anchor, replacement, marker.as_deref()),
        OpKind::InsertField {
            block,
            anchor,
            field,
        } => insert_field(contents, block, anchor, field),
        OpKind::ToggleOptional { block, pattern } => toggle_optional(contents, block, pattern),
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn render_patch(
    before: &BTreeMap<Utf8PathBuf, String>,
    after: &BTreeMap<Utf8PathBuf, String>,
) -> String {
    let mut out = String::new();
    let formatter = diffy::PatchFormatter::new();

    for (path, old) in before {
        let Some(new) = after.get(path) else { continue };
        if old == new {
            continue;
        }

        out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
        out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

        let patch = diffy::create_patch(old, new);
        out.push_str(&formatter.fmt_patch(&patch).to_string());
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}
