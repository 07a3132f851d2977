//! Read-only SQL classifier.
//!
//! A syntactic allow-list, not a parser. It over-rejects on purpose: a
//! `SELECT` with a column aliased `update` is rejected, a write never passes.

const LEADING_KEYWORDS: &[&str] = &["SELECT", "WITH"];

const WRITE_KEYWORDS: &[&str] = &[
    "INSERT", "UPDATE", "DELETE", "MERGE", "ALTER", "DROP", "CREATE", "TRUNCATE", "GRANT",
    "REVOKE", "VACUUM", "ANALYZE",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlVerdict {
    ReadOnly,
    Empty,
    NotSelect,
    Semicolon,
    WriteKeyword(&'static str),
}

impl SqlVerdict {
    pub fn is_read_only(&self) -> bool {
        matches!(self, SqlVerdict::ReadOnly)
    }
}

impl std::fmt::Display for SqlVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlVerdict::ReadOnly => write!(f, "read-only"),
            SqlVerdict::Empty => write!(f, "no SQL text found"),
            SqlVerdict::NotSelect => write!(f, "query must start with SELECT or WITH"),
            SqlVerdict::Semicolon => write!(f, "query contains ';' (multiple statements)"),
            SqlVerdict::WriteKeyword(kw) => write!(f, "query contains write keyword {}", kw),
        }
    }
}

/// Classify SQL text; `None` stands for a missing or non-string value.
pub fn classify_sql(sql: Option<&str>) -> SqlVerdict {
    let Some(text) = sql.map(str::trim).filter(|s| !s.is_empty()) else {
        return SqlVerdict::Empty;
    };

    let first = text
        .split(|c: char| !is_word_char(c))
        .next()
        .unwrap_or("");
    if !LEADING_KEYWORDS.iter().any(|kw| first.eq_ignore_ascii_case(kw)) {
        return SqlVerdict::NotSelect;
    }

    if text.contains(';') {
        return SqlVerdict::Semicolon;
    }

    for word in text.split(|c: char| !is_word_char(c)) {
        if let Some(kw) = WRITE_KEYWORDS.iter().find(|kw| word.eq_ignore_ascii_case(kw)) {
            return SqlVerdict::WriteKeyword(*kw);
        }
    }

    SqlVerdict::ReadOnly
}

pub fn is_read_only_sql(sql: Option<&str>) -> bool {
    classify_sql(sql).is_read_only()
}

/// Word characters for whole-word matching: letters, digits, underscore.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
