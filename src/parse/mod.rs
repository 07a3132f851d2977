//! Parse phase: raw text → `WorkflowDocument`.

pub mod types;

pub use types::*;

use crate::error::Finding;

/// Parse workflow JSON text. Only a syntax error is a finding; a structurally
/// unexpected document simply has no nodes.
pub fn parse(file: &str, json: &str) -> Result<WorkflowDocument, Finding> {
    serde_json::from_str::<serde_json::Value>(json)
        .map(|value| WorkflowDocument::from_value(&value))
        .map_err(|e| Finding::malformed(file, format!("invalid JSON ({})", e)))
}
