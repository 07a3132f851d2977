//! Integration tests for the database node rules (G003–G005).

#[allow(dead_code)]
mod helpers;

use helpers::*;
use serde_json::json;
use workflow_gate::parse;
use workflow_gate::validate::validate_database_nodes;
use workflow_gate::{DocumentKind, PolicyConfig, ViolationKind};

fn node_findings(json: &str) -> Vec<workflow_gate::Finding> {
    let engine = default_engine();
    let doc = parse::parse("wf.json", json).expect("Should parse");
    validate_database_nodes("wf.json", &doc, engine.policy())
}

#[test]
fn read_only_named_select_passes() {
    let json = workflow_json(vec![pg_node("DB RO — list users", "executeQuery", "SELECT * FROM users")]);
    let findings = node_findings(&json);
    assert!(findings.is_empty(), "Expected no findings, got: {:?}", findings);
}

#[test]
fn chained_statement_is_unsafe() {
    let json = workflow_json(vec![pg_node(
        "DB RO — list users",
        "executeQuery",
        "SELECT * FROM users; DROP TABLE users",
    )]);
    let findings = node_findings(&json);
    assert_eq!(kinds(&findings), vec![ViolationKind::UnsafeExecuteQuery]);
    assert_eq!(findings[0].node.as_deref(), Some("DB RO — list users"));
    assert!(findings[0].message.contains("';'"), "{}", findings[0].message);
}

#[test]
fn missing_prefix_is_reported_alone() {
    let json = workflow_json(vec![pg_node("Get Users", "executeQuery", "DROP TABLE users")]);
    let findings = node_findings(&json);
    assert_eq!(kinds(&findings), vec![ViolationKind::MissingAuthorizationPrefix]);
    assert_no_kind(&findings, ViolationKind::UnsafeExecuteQuery);
    assert!(findings[0].message.contains("\"Get Users\""));
    assert!(findings[0].message.contains("\"executeQuery\""));
}

#[test]
fn non_execute_operation_is_out_of_scope() {
    let json = workflow_json(vec![node_with_params(
        "Insert rows",
        "postgresNode",
        json!({ "operation": "insert", "query": "DELETE FROM users" }),
    )]);
    assert!(node_findings(&json).is_empty());
}

#[test]
fn non_database_node_is_ignored() {
    let json = workflow_json(vec![node_with_params(
        "Run",
        "n8n-nodes-base.httpRequest",
        json!({ "operation": "executeQuery", "query": "DROP TABLE users" }),
    )]);
    assert!(node_findings(&json).is_empty());
}

#[test]
fn database_type_match_is_case_insensitive() {
    let json = workflow_json(vec![node_with_params(
        "Run",
        "N8N-NODES-BASE.POSTGRES",
        json!({ "operation": "executeQuery", "query": "SELECT 1" }),
    )]);
    assert_eq!(kinds(&node_findings(&json)), vec![ViolationKind::MissingAuthorizationPrefix]);
}

#[test]
fn execute_without_sql_is_unsafe() {
    let json = workflow_json(vec![node_with_params(
        "DB RO - nothing",
        "n8n-nodes-base.postgres",
        json!({ "operation": "executeQuery" }),
    )]);
    let findings = node_findings(&json);
    assert_eq!(kinds(&findings), vec![ViolationKind::UnsafeExecuteQuery]);
    assert!(findings[0].message.contains("no SQL text found"));
}

#[test]
fn unsafe_sql_message_names_source_key() {
    let json = workflow_json(vec![node_with_params(
        "DB RO - clear",
        "n8n-nodes-base.postgres",
        json!({ "operation": "executeQuery", "options": { "query": "TRUNCATE sessions" } }),
    )]);
    let findings = node_findings(&json);
    assert!(
        findings[0].message.contains("parameters.options.query"),
        "{}",
        findings[0].message
    );
}

#[test]
fn unnamed_execute_node_fails_gate() {
    let json = workflow_json(vec![json!({
        "type": "n8n-nodes-base.postgres",
        "parameters": { "operation": "executeQuery", "query": "SELECT 1" }
    })]);
    let findings = node_findings(&json);
    assert_eq!(kinds(&findings), vec![ViolationKind::MissingAuthorizationPrefix]);
    assert_eq!(findings[0].node, None);
    assert!(findings[0].message.contains("<unnamed>"));
}

#[test]
fn fixture_reports_each_bad_node() {
    let findings = node_findings(include_str!("fixtures/unsafe_nodes.json"));
    assert_eq!(
        kinds(&findings),
        vec![
            ViolationKind::MissingAuthorizationPrefix,
            ViolationKind::UnsafeExecuteQuery,
            ViolationKind::UnsafeExecuteQuery,
        ]
    );
    let nodes: Vec<Option<&str>> = findings.iter().map(|f| f.node.as_deref()).collect();
    assert_eq!(
        nodes,
        vec![
            Some("Get Users"),
            Some("DB RO — list users"),
            Some("DB RO - clear sessions"),
        ]
    );
}

#[test]
fn raw_sql_rule_is_off_by_default() {
    let json = workflow_json(vec![pg_node("Insert rows", "insert", "SELECT 1")]);
    assert!(node_findings(&json).is_empty());
}

#[test]
fn raw_sql_rule_flags_sql_on_structured_operation() {
    let engine = engine_with(PolicyConfig {
        flag_raw_sql_on_non_execute: true,
        ..PolicyConfig::default()
    });
    let json = workflow_json(vec![
        pg_node("Insert rows", "insert", "INSERT INTO t VALUES (1)"),
        pg_node("Select rows", "select", "   "),
        pg_node("DB RO — ok", "executeQuery", "SELECT 1"),
    ]);
    let findings = engine.check_document("wf.json", &json, DocumentKind::Workflow);
    assert_eq!(kinds(&findings), vec![ViolationKind::RawSqlOnNonExecute]);
    assert_eq!(findings[0].code(), "G005");
    assert_eq!(findings[0].node.as_deref(), Some("Insert rows"));
}

#[test]
fn custom_markers_and_prefix_are_honoured() {
    let engine = engine_with(PolicyConfig {
        db_node_type_markers: vec!["clickhouse".into()],
        required_prefix_pattern: r"^\[readonly\]\s+".into(),
        ..PolicyConfig::default()
    });
    let json = workflow_json(vec![
        node_with_params(
            "[readonly] stats",
            "community.ClickHouse",
            json!({ "operation": "executeQuery", "query": "SELECT count() FROM events" }),
        ),
        node_with_params(
            "stats",
            "community.ClickHouse",
            json!({ "operation": "executeQuery", "query": "SELECT 1" }),
        ),
        pg_node("Get Users", "executeQuery", "SELECT 1"),
    ]);
    let findings = engine.check_document("wf.json", &json, DocumentKind::Workflow);
    assert_eq!(kinds(&findings), vec![ViolationKind::MissingAuthorizationPrefix]);
    assert_eq!(findings[0].node.as_deref(), Some("stats"));
}
