//! Finding record and error types shared across all checks.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    MalformedDocument,
    ForbiddenToken,
    MissingAuthorizationPrefix,
    UnsafeExecuteQuery,
    RawSqlOnNonExecute,
}

impl ViolationKind {
    /// Stable code used in machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::MalformedDocument => "G001",
            ViolationKind::ForbiddenToken => "G002",
            ViolationKind::MissingAuthorizationPrefix => "G003",
            ViolationKind::UnsafeExecuteQuery => "G004",
            ViolationKind::RawSqlOnNonExecute => "G005",
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationKind::MalformedDocument => write!(f, "MalformedDocument"),
            ViolationKind::ForbiddenToken => write!(f, "ForbiddenToken"),
            ViolationKind::MissingAuthorizationPrefix => write!(f, "MissingAuthorizationPrefix"),
            ViolationKind::UnsafeExecuteQuery => write!(f, "UnsafeExecuteQuery"),
            ViolationKind::RawSqlOnNonExecute => write!(f, "RawSqlOnNonExecute"),
        }
    }
}

/// One detected policy violation. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub file: String,
    pub node: Option<String>,
    pub kind: ViolationKind,
    pub message: String,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[FAIL] {}: {}", self.file, self.message)
    }
}

impl Finding {
    pub fn malformed(file: &str, message: impl Into<String>) -> Self {
        Finding {
            file: file.into(),
            node: None,
            kind: ViolationKind::MalformedDocument,
            message: message.into(),
        }
    }

    pub fn forbidden_token(file: &str, message: impl Into<String>) -> Self {
        Finding {
            file: file.into(),
            node: None,
            kind: ViolationKind::ForbiddenToken,
            message: message.into(),
        }
    }

    pub fn node(
        kind: ViolationKind,
        file: &str,
        node: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Finding {
            file: file.into(),
            node: node.map(str::to_string),
            kind,
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// Failures while loading or compiling a policy configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read policy config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse policy config {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid required prefix pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("forbidden token list contains an empty token")]
    EmptyToken,
}
