use crate::outcome::Outcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full record of one declfix run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: RunInfo,

    #[serde(default)]
    pub results: Vec<OpResult>,

    pub summary: RunSummary,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<VerifyResult>,
}

impl RunReport {
    pub fn new(tool: ToolInfo) -> Self {
        Self {
            schema: crate::schema::DECLFIX_REPORT_V1.to_string(),
            tool,
            run: RunInfo::started_now(),
            results: vec![],
            summary: RunSummary::default(),
            verify: None,
        }
    }

    /// Record one operation result, keeping the summary counters in step.
    pub fn record(&mut self, result: OpResult) {
        self.summary.tally(&result.outcome);
        self.results.push(result);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub run_id: String,
    pub started_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

impl RunInfo {
    pub fn started_now() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            ended_at: None,
        }
    }
}

/// One operation's recorded outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpResult {
    pub label: String,
    pub file: String,

    /// Operation kind identifier (see `OpKind::name`).
    pub op: String,

    pub outcome: Outcome,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<FileChange>,
}

/// Before/after digests for a file an operation rewrote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub sha256_before: String,
    pub sha256_after: String,
}

/// Counters over all recorded outcomes. Aggregated explicitly by the runner;
/// there is no process-global state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub applied: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl RunSummary {
    pub fn tally(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Applied => self.applied += 1,
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.applied + self.skipped + self.failed
    }
}

/// Result of the external verify step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResult {
    pub command: String,
    pub error_lines: u64,
}
