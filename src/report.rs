//! Validation report: the ordered, append-only list of findings for one run.

use serde::Serialize;

use crate::error::Finding;

pub const PASS_LINE: &str = "[OK] workflows validation passed";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    findings: Vec<Finding>,
    documents: usize,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    pub(crate) fn record_document(&mut self) {
        self.documents += 1;
    }

    /// Pass iff there are no findings. Order never matters for the verdict.
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn documents_checked(&self) -> usize {
        self.documents
    }

    /// One `[FAIL]` line per finding, in discovery order.
    pub fn failure_lines(&self) -> Vec<String> {
        self.findings.iter().map(|f| f.to_string()).collect()
    }

    /// Full text rendering: failure lines, or the pass line.
    pub fn render_text(&self) -> String {
        if self.passed() {
            return format!("{}\n", PASS_LINE);
        }
        let mut out = String::new();
        for line in self.failure_lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&ReportDto::from(self))
    }
}

// ---------------------------------------------------------------------------
// DTOs for machine-readable output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub(crate) struct ReportDto {
    pub passed: bool,
    pub documents: usize,
    pub findings: Vec<FindingDto>,
}

#[derive(Serialize)]
pub(crate) struct FindingDto {
    pub code: String,
    pub kind: String,
    pub file: String,
    pub node: Option<String>,
    pub message: String,
}

impl From<&Finding> for FindingDto {
    fn from(f: &Finding) -> Self {
        FindingDto {
            code: f.code().into(),
            kind: f.kind.to_string(),
            file: f.file.clone(),
            node: f.node.clone(),
            message: f.message.clone(),
        }
    }
}

impl From<&ValidationReport> for ReportDto {
    fn from(report: &ValidationReport) -> Self {
        ReportDto {
            passed: report.passed(),
            documents: report.documents_checked(),
            findings: report.findings().iter().map(FindingDto::from).collect(),
        }
    }
}
