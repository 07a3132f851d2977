//! Authorization naming gate.

use regex::Regex;

/// True when the name carries the authorization marker at its very start.
/// A match that begins anywhere past byte 0 does not count, even if the
/// configured pattern forgot its `^` anchor.
pub fn has_authorization_prefix(name: Option<&str>, prefix: &Regex) -> bool {
    let Some(name) = name else {
        return false;
    };
    prefix.find(name).is_some_and(|m| m.start() == 0)
}
