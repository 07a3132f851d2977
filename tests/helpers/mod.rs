use serde_json::{Value, json};
use workflow_gate::{Finding, PolicyConfig, PolicyEngine, ViolationKind};

// =============================================================================
// Engine builders
// =============================================================================

pub fn default_engine() -> PolicyEngine {
    PolicyEngine::from_config(&PolicyConfig::default()).expect("default policy compiles")
}

pub fn engine_with(config: PolicyConfig) -> PolicyEngine {
    PolicyEngine::from_config(&config).expect("policy compiles")
}

// =============================================================================
// Document builders
// =============================================================================

/// A database node with the given name, operation and SQL under `query`.
pub fn pg_node(name: &str, operation: &str, query: &str) -> Value {
    json!({
        "name": name,
        "type": "n8n-nodes-base.postgres",
        "parameters": { "operation": operation, "query": query }
    })
}

pub fn node_with_params(name: &str, node_type: &str, parameters: Value) -> Value {
    json!({ "name": name, "type": node_type, "parameters": parameters })
}

pub fn workflow_json(nodes: Vec<Value>) -> String {
    serde_json::to_string_pretty(&json!({ "name": "test", "nodes": nodes, "connections": {} }))
        .expect("serializes")
}

// =============================================================================
// Assertions
// =============================================================================

pub fn kinds(findings: &[Finding]) -> Vec<ViolationKind> {
    findings.iter().map(|f| f.kind).collect()
}

pub fn assert_has_kind(findings: &[Finding], kind: ViolationKind) {
    assert!(
        findings.iter().any(|f| f.kind == kind),
        "Expected {}, got: {:?}",
        kind,
        findings
    );
}

pub fn assert_no_kind(findings: &[Finding], kind: ViolationKind) {
    assert!(
        !findings.iter().any(|f| f.kind == kind),
        "Did not expect {}, but got: {:?}",
        kind,
        findings
    );
}
