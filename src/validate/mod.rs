//! Policy checks.
//!
//! Token scanning works on raw text; the node rules work on a parsed document.

pub mod naming;
pub mod node_rules;
pub mod sql;
pub mod tokens;

pub use naming::has_authorization_prefix;
pub use node_rules::{validate_database_node, validate_database_nodes};
pub use sql::{SqlVerdict, classify_sql, is_read_only_sql};
pub use tokens::{TokenMatch, check_forbidden_tokens, scan_forbidden_tokens};
