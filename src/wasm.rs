//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::config::PolicyConfig;
use crate::engine::{DocumentKind, PolicyEngine};
use crate::report::FindingDto;

/// Validate one exported workflow with the built-in policy.
/// Returns a JSON array of finding objects.
#[wasm_bindgen]
pub fn validate_workflow(file: &str, json: &str) -> JsValue {
    let result = validate_inner(file, json, DocumentKind::Workflow, None);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Validate one exported workflow with a TOML policy.
#[wasm_bindgen]
pub fn validate_workflow_with_policy(file: &str, json: &str, policy_toml: &str) -> JsValue {
    let result = validate_inner(file, json, DocumentKind::Workflow, Some(policy_toml));
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Forbidden-token scan only, for arbitrary text.
#[wasm_bindgen]
pub fn scan_text(file: &str, text: &str) -> JsValue {
    let result = validate_inner(file, text, DocumentKind::Auxiliary, None);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Read-only classification of a single SQL string.
#[wasm_bindgen]
pub fn is_read_only_sql(sql: &str) -> bool {
    crate::validate::is_read_only_sql(Some(sql))
}

fn validate_inner(
    file: &str,
    text: &str,
    kind: DocumentKind,
    policy_toml: Option<&str>,
) -> Vec<FindingDto> {
    let config = match policy_toml.map(PolicyConfig::from_toml_str) {
        None => PolicyConfig::default(),
        Some(Ok(config)) => config,
        Some(Err(e)) => return vec![config_error(format!("invalid policy config: {}", e))],
    };
    let engine = match PolicyEngine::from_config(&config) {
        Ok(engine) => engine,
        Err(e) => return vec![config_error(e.to_string())],
    };

    engine
        .check_document(file, text, kind)
        .iter()
        .map(FindingDto::from)
        .collect()
}

fn config_error(message: String) -> FindingDto {
    FindingDto {
        code: "C001".into(),
        kind: "ConfigError".into(),
        file: String::new(),
        node: None,
        message,
    }
}
