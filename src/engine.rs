//! Per-document driver: token scan → parse → node rules → report.
//!
//! Never stops at the first violation. Every document is scanned and every
//! node is checked so one run surfaces everything.

use tracing::{debug, info};

use crate::config::{Policy, PolicyConfig};
use crate::error::{ConfigError, Finding};
use crate::parse;
use crate::report::ValidationReport;
use crate::validate::{check_forbidden_tokens, validate_database_nodes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Exported workflow JSON: token scan plus node rules.
    Workflow,
    /// Any other text (scripts, examples): token scan only.
    Auxiliary,
}

#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: String,
    pub text: String,
    pub kind: DocumentKind,
}

impl SourceDocument {
    pub fn workflow(path: impl Into<String>, text: impl Into<String>) -> Self {
        SourceDocument {
            path: path.into(),
            text: text.into(),
            kind: DocumentKind::Workflow,
        }
    }

    pub fn auxiliary(path: impl Into<String>, text: impl Into<String>) -> Self {
        SourceDocument {
            path: path.into(),
            text: text.into(),
            kind: DocumentKind::Auxiliary,
        }
    }
}

pub struct PolicyEngine {
    policy: Policy,
}

impl PolicyEngine {
    pub fn new(policy: Policy) -> Self {
        PolicyEngine { policy }
    }

    pub fn from_config(config: &PolicyConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.compile()?))
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// All findings for a single document, in check order.
    pub fn check_document(&self, file: &str, text: &str, kind: DocumentKind) -> Vec<Finding> {
        let mut findings = check_forbidden_tokens(file, text, self.policy.forbidden_tokens());

        if kind == DocumentKind::Workflow {
            match parse::parse(file, text) {
                Ok(doc) => {
                    debug!(file, nodes = doc.nodes.len(), "parsed workflow");
                    findings.extend(validate_database_nodes(file, &doc, &self.policy));
                }
                Err(finding) => findings.push(finding),
            }
        }

        debug!(file, ?kind, findings = findings.len(), "checked document");
        findings
    }

    /// Append the findings for `doc` to `report`.
    pub fn validate_into(&self, report: &mut ValidationReport, doc: &SourceDocument) {
        report.extend(self.check_document(&doc.path, &doc.text, doc.kind));
        report.record_document();
    }

    /// Validate documents in the given order and return the aggregate report.
    pub fn validate_all<'a>(
        &self,
        docs: impl IntoIterator<Item = &'a SourceDocument>,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();
        for doc in docs {
            self.validate_into(&mut report, doc);
        }
        info!(
            documents = report.documents_checked(),
            findings = report.findings().len(),
            passed = report.passed(),
            "validation finished"
        );
        report
    }
}
