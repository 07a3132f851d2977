//! Per-node policy for relational-database nodes.
//!
//! Only execute-class operations are in scope: the node must carry the
//! authorization prefix, and its SQL must classify as read-only. A naming
//! failure is reported on its own and the SQL is not looked at.

use tracing::debug;

use crate::config::Policy;
use crate::error::{Finding, ViolationKind};
use crate::parse::types::*;
use crate::validate::naming::has_authorization_prefix;
use crate::validate::sql::classify_sql;

const UNNAMED: &str = "<unnamed>";

/// Validate every database node in the document. Returns all findings.
pub fn validate_database_nodes(file: &str, doc: &WorkflowDocument, policy: &Policy) -> Vec<Finding> {
    doc.nodes
        .iter()
        .filter(|node| policy.is_database_node_type(node.node_type()))
        .filter_map(|node| validate_database_node(file, node, policy))
        .collect()
}

/// Validate a single database node. At most one finding per node.
pub fn validate_database_node(file: &str, node: &Node, policy: &Policy) -> Option<Finding> {
    let display_name = node.name().unwrap_or(UNNAMED);

    if !node.is_execute_operation() {
        return raw_sql_on_non_execute(file, node, policy);
    }

    if !has_authorization_prefix(node.name(), policy.required_prefix()) {
        debug!(file, node = display_name, "execute node missing authorization prefix");
        return Some(Finding::node(
            ViolationKind::MissingAuthorizationPrefix,
            file,
            node.name(),
            format!(
                "database node \"{}\" uses operation \"{}\" without the read-only authorization prefix (expected a name like \"DB RO — <description>\")",
                display_name,
                node.operation()
            ),
        ));
    }

    let sql = node.sql_text();
    let verdict = classify_sql(sql.map(|s| s.text));
    debug!(file, node = display_name, %verdict, "classified execute query");
    if verdict.is_read_only() {
        return None;
    }

    let location = match sql {
        Some(s) => format!(" in parameters.{}", s.source),
        None => String::new(),
    };
    Some(Finding::node(
        ViolationKind::UnsafeExecuteQuery,
        file,
        node.name(),
        format!(
            "database node \"{}\" executes SQL that is not provably read-only{}: {}",
            display_name, location, verdict
        ),
    ))
}

/// Opt-in: flag SQL text sitting on a structured (non-execute) operation.
fn raw_sql_on_non_execute(file: &str, node: &Node, policy: &Policy) -> Option<Finding> {
    if !policy.flag_raw_sql_on_non_execute() {
        return None;
    }
    let sql = node.sql_text().filter(|s| !s.text.trim().is_empty())?;
    Some(Finding::node(
        ViolationKind::RawSqlOnNonExecute,
        file,
        node.name(),
        format!(
            "database node \"{}\" uses operation \"{}\" but contains raw SQL in parameters.{}",
            node.name().unwrap_or(UNNAMED),
            node.operation(),
            sql.source
        ),
    ))
}
