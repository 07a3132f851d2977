//! Policy configuration: forbidden tokens, database node heuristic and the
//! authorization prefix pattern.
//!
//! `PolicyConfig` is the serde target for an optional TOML file. It is compiled
//! once into an immutable [`Policy`] that every check borrows.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_PREFIX_PATTERN: &str = r"^DB RO\s*[—-]\s+";

const DEFAULT_DB_MARKERS: &[&str] = &[
    "postgres",
    "mysql",
    "mariadb",
    "microsoftsql",
    "mssql",
    "oracle",
    "sqlite",
    "questdb",
    "timescaledb",
    "cratedb",
    "snowflake",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbiddenToken {
    pub token: String,
    pub reason: String,
}

impl ForbiddenToken {
    pub fn new(token: impl Into<String>, reason: impl Into<String>) -> Self {
        ForbiddenToken {
            token: token.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    pub forbidden_tokens: Vec<ForbiddenToken>,
    pub db_node_type_markers: Vec<String>,
    pub required_prefix_pattern: String,
    pub flag_raw_sql_on_non_execute: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            forbidden_tokens: vec![ForbiddenToken::new(
                "$env.",
                "direct environment variable access from a workflow expression",
            )],
            db_node_type_markers: DEFAULT_DB_MARKERS.iter().map(|m| m.to_string()).collect(),
            required_prefix_pattern: DEFAULT_PREFIX_PATTERN.into(),
            flag_raw_sql_on_non_execute: false,
        }
    }
}

impl PolicyConfig {
    /// Load a TOML policy file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Toml {
            path: display,
            source,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Validate and compile into a ready-to-use [`Policy`].
    pub fn compile(&self) -> Result<Policy, ConfigError> {
        if self.forbidden_tokens.iter().any(|t| t.token.is_empty()) {
            return Err(ConfigError::EmptyToken);
        }
        let required_prefix = Regex::new(&self.required_prefix_pattern)?;
        let db_markers = self
            .db_node_type_markers
            .iter()
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();

        Ok(Policy {
            forbidden_tokens: self.forbidden_tokens.clone(),
            db_markers,
            required_prefix,
            flag_raw_sql_on_non_execute: self.flag_raw_sql_on_non_execute,
        })
    }
}

/// Compiled, immutable policy shared by every check in a run.
#[derive(Debug, Clone)]
pub struct Policy {
    forbidden_tokens: Vec<ForbiddenToken>,
    db_markers: Vec<String>,
    required_prefix: Regex,
    flag_raw_sql_on_non_execute: bool,
}

impl Policy {
    pub fn forbidden_tokens(&self) -> &[ForbiddenToken] {
        &self.forbidden_tokens
    }

    pub fn required_prefix(&self) -> &Regex {
        &self.required_prefix
    }

    pub fn flag_raw_sql_on_non_execute(&self) -> bool {
        self.flag_raw_sql_on_non_execute
    }

    /// Case-insensitive substring heuristic over the node `type`.
    pub fn is_database_node_type(&self, node_type: &str) -> bool {
        let lowered = node_type.to_lowercase();
        self.db_markers.iter().any(|m| lowered.contains(m.as_str()))
    }
}
