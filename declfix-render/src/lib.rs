//! Rendering helpers for human-readable run output.
//!
//! The terminal renderer emits one status line per operation using the three
//! literal outcome markers, plus a boxed final summary. The markdown
//! renderer produces an artifact-friendly projection of the same report.

use declfix_types::outcome::Outcome;
use declfix_types::report::{OpResult, RunReport};

/// Literal outcome markers, one per variant.
pub const MARK_APPLIED: &str = "✅";
pub const MARK_SKIPPED: &str = "⚠️";
pub const MARK_FAILED: &str = "❌";

/// One status line for an operation, e.g. `  ✅ A2: QuantumState.id optional`.
pub fn render_op_line(result: &OpResult) -> String {
    match &result.outcome {
        Outcome::Applied => format!("  {} {}", MARK_APPLIED, result.label),
        Outcome::Skipped(reason) => {
            format!("  {}  {}: {}", MARK_SKIPPED, result.label, reason)
        }
        Outcome::Failed(reason) => {
            format!("  {} {}: {}", MARK_FAILED, result.label, reason)
        }
    }
}

/// The boxed final summary.
pub fn render_summary_box(report: &RunReport) -> String {
    let mut out = String::new();
    let rule = "═".repeat(58);
    out.push_str(&format!("╔{rule}╗\n"));
    out.push_str(&format!("║  {:<56}║\n", format!("{} — summary", report.tool.name)));
    out.push_str(&format!("╠{rule}╣\n"));
    out.push_str(&format!(
        "║  {:<56}║\n",
        format!(
            "{} applied: {:<4} {} skipped: {:<4} {} failed: {:<4}",
            MARK_APPLIED,
            report.summary.applied,
            MARK_SKIPPED,
            report.summary.skipped,
            MARK_FAILED,
            report.summary.failed
        )
    ));
    if let Some(verify) = &report.verify {
        out.push_str(&format!("╠{rule}╣\n"));
        out.push_str(&format!(
            "║  {:<56}║\n",
            format!("checker error lines: {}", verify.error_lines)
        ));
    }
    out.push_str(&format!("╚{rule}╝\n"));
    out
}

/// Markdown projection of a run report, for artifact output.
pub fn render_report_md(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str("# declfix run\n\n");
    out.push_str(&format!(
        "- Applied: {}\n- Skipped: {}\n- Failed: {}\n- Total: {}\n\n",
        report.summary.applied,
        report.summary.skipped,
        report.summary.failed,
        report.summary.total()
    ));

    out.push_str("## Results\n\n");
    if report.results.is_empty() {
        out.push_str("_No operations._\n");
        return out;
    }

    for (i, r) in report.results.iter().enumerate() {
        out.push_str(&format!("### {}. {}\n\n", i + 1, r.label));
        out.push_str(&format!("- Op: `{}`\n", r.op));
        out.push_str(&format!("- File: `{}`\n", r.file));
        out.push_str(&format!("- Outcome: `{}`\n", outcome_label(&r.outcome)));
        if let Some(reason) = r.outcome.reason() {
            out.push_str(&format!("- Reason: {}\n", reason));
        }
        if let Some(change) = &r.change {
            out.push_str(&format!(
                "- `{}` {} → {}\n",
                change.path, change.sha256_before, change.sha256_after
            ));
        }
        out.push('\n');
    }

    if let Some(verify) = &report.verify {
        out.push_str("## Verify\n\n");
        out.push_str(&format!(
            "- Command: `{}`\n- Error lines: {}\n",
            verify.command, verify.error_lines
        ));
    }

    out
}

fn outcome_label(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Applied => "applied",
        Outcome::Skipped(_) => "skipped",
        Outcome::Failed(_) => "failed",
    }
}

#[cfg(test)]
mod tests {
    use super::{render_op_line, render_report_md, render_summary_box};
    use declfix_types::outcome::Outcome;
    use declfix_types::report::{OpResult, RunReport, ToolInfo, VerifyResult};

    fn report() -> RunReport {
        let mut report = RunReport::new(ToolInfo {
            name: "declfix".to_string(),
            version: None,
        });
        report.record(OpResult {
            label: "A2: make id optional".to_string(),
            file: "src/types.ts".to_string(),
            op: "toggle_optional".to_string(),
            outcome: Outcome::Applied,
            change: None,
        });
        report.record(OpResult {
            label: "A7: add icon".to_string(),
            file: "src/types.ts".to_string(),
            op: "insert_field".to_string(),
            outcome: Outcome::failed("anchor not found"),
            change: None,
        });
        report
    }

    #[test]
    fn op_lines_carry_their_marker() {
        let report = report();
        assert_eq!(render_op_line(&report.results[0]), "  ✅ A2: make id optional");
        assert_eq!(
            render_op_line(&report.results[1]),
            "  ❌ A7: add icon: anchor not found"
        );
    }

    #[test]
    fn summary_box_reports_all_three_counters() {
        let text = render_summary_box(&report());
        assert!(text.starts_with('╔'));
        assert!(text.contains("applied: 1"));
        assert!(text.contains("skipped: 0"));
        assert!(text.contains("failed: 1"));
        assert!(!text.contains("checker error lines"));
    }

    #[test]
    fn summary_box_includes_verify_section_when_present() {
        let mut report = report();
        report.verify = Some(VerifyResult {
            command: "npx tsc --noEmit".to_string(),
            error_lines: 3,
        });
        let text = render_summary_box(&report);
        assert!(text.contains("checker error lines: 3"));
    }

    #[test]
    fn markdown_lists_every_result() {
        let md = render_report_md(&report());
        assert!(md.contains("# declfix run"));
        assert!(md.contains("### 1. A2: make id optional"));
        assert!(md.contains("- Outcome: `failed`"));
        assert!(md.contains("- Reason: anchor not found"));
    }
}
