//! Forbidden token scanner.
//!
//! Purely textual: runs on the raw file content, so JSON validity, escaping
//! and comments have no effect on whether a token matches.

use crate::config::ForbiddenToken;
use crate::error::Finding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch<'p> {
    pub token: &'p ForbiddenToken,
    /// Byte offset of the first occurrence.
    pub offset: usize,
    /// 1-based line of the first occurrence.
    pub line: usize,
    pub occurrences: usize,
}

/// Return every configured token present in `text`, in configuration order.
/// A token listed twice in the configuration is reported once.
pub fn scan_forbidden_tokens<'p>(text: &str, tokens: &'p [ForbiddenToken]) -> Vec<TokenMatch<'p>> {
    let mut matches: Vec<TokenMatch<'p>> = Vec::new();

    for token in tokens {
        if token.token.is_empty() || matches.iter().any(|m| m.token.token == token.token) {
            continue;
        }
        let mut hits = text.match_indices(token.token.as_str());
        let Some((offset, _)) = hits.next() else {
            continue;
        };
        matches.push(TokenMatch {
            token,
            offset,
            line: line_of(text, offset),
            occurrences: 1 + hits.count(),
        });
    }

    matches
}

/// Scan and turn each match into a `ForbiddenToken` finding.
pub fn check_forbidden_tokens(file: &str, text: &str, tokens: &[ForbiddenToken]) -> Vec<Finding> {
    scan_forbidden_tokens(text, tokens)
        .into_iter()
        .map(|m| {
            Finding::forbidden_token(
                file,
                format!(
                    "forbidden substring \"{}\" found at line {} ({} occurrence{}): {}",
                    m.token.token,
                    m.line,
                    m.occurrences,
                    if m.occurrences == 1 { "" } else { "s" },
                    m.token.reason
                ),
            )
        })
        .collect()
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].bytes().filter(|b| *b == b'\n').count() + 1
}
