//! Lenient view of an exported workflow document.
//!
//! Only the fields the policy checks need are modelled. Everything else in the
//! export (connections, credentials, positions, settings) is ignored.

use serde_json::{Map, Value};

// =============================================================================
// DOCUMENT
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct WorkflowDocument {
    pub nodes: Vec<Node>,
}

impl WorkflowDocument {
    /// Build from an already-parsed JSON value. Anything that is not an object
    /// with a `nodes` array yields an empty document.
    pub fn from_value(value: &Value) -> Self {
        let nodes = value
            .get("nodes")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(Node::from_value).collect())
            .unwrap_or_default();
        WorkflowDocument { nodes }
    }
}

// =============================================================================
// NODE
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub node_type: Option<String>,
    pub name: Option<String>,
    pub parameters: Map<String, Value>,
}

impl Node {
    /// Non-object entries are skipped; mistyped fields are treated as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        let entry = value.as_object()?;
        Some(Node {
            node_type: string_field(entry, "type"),
            name: string_field(entry, "name"),
            parameters: entry
                .get("parameters")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
        })
    }

    pub fn node_type(&self) -> &str {
        self.node_type.as_deref().unwrap_or("")
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// `parameters.operation`, or empty when missing or not a string.
    pub fn operation(&self) -> &str {
        self.parameters
            .get("operation")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Execute-class operations run caller-supplied SQL.
    pub fn is_execute_operation(&self) -> bool {
        self.operation().to_lowercase().contains("execute")
    }

    /// First SQL text found along [`SQL_TEXT_SOURCES`].
    pub fn sql_text(&self) -> Option<SqlText<'_>> {
        SQL_TEXT_SOURCES.iter().find_map(|source| {
            source.lookup(&self.parameters).map(|text| SqlText {
                source: source.label,
                text,
            })
        })
    }
}

fn string_field(entry: &Map<String, Value>, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(str::to_string)
}

// =============================================================================
// SQL TEXT LOOKUP
// =============================================================================

/// A key path into a node's `parameters` that may hold SQL text.
#[derive(Debug, Clone, Copy)]
pub struct SqlTextSource {
    pub label: &'static str,
    pub path: &'static [&'static str],
}

impl SqlTextSource {
    /// Resolves only when the path exists and ends on a JSON string.
    pub fn lookup<'a>(&self, parameters: &'a Map<String, Value>) -> Option<&'a str> {
        let (first, rest) = self.path.split_first()?;
        let mut current = parameters.get(*first)?;
        for key in rest {
            current = current.as_object()?.get(*key)?;
        }
        current.as_str()
    }
}

/// Priority order for locating SQL text. First string hit wins.
pub const SQL_TEXT_SOURCES: &[SqlTextSource] = &[
    SqlTextSource { label: "query", path: &["query"] },
    SqlTextSource { label: "options.query", path: &["options", "query"] },
    SqlTextSource { label: "executeQuery", path: &["executeQuery"] },
    SqlTextSource { label: "sql", path: &["sql"] },
    SqlTextSource { label: "queryParameters", path: &["queryParameters"] },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlText<'a> {
    pub source: &'static str,
    pub text: &'a str,
}
