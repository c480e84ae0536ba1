//! Conversion of raw text fields into SQL value literals.

use regex::Regex;
use std::sync::OnceLock;

/// Plain decimal numbers. Leading zeros (`007`) are excluded so identifiers
/// and codes keep their text form.
fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?$").expect("number pattern is valid")
    })
}

/// Formats a raw field as a MySQL literal.
///
/// - empty -> `NULL`
/// - plain decimal number -> unquoted
/// - anything else -> single-quoted, with `\` and `'` escaped
pub fn sql_literal(raw: &str) -> String {
    if raw.is_empty() {
        return "NULL".to_string();
    }
    if number_pattern().is_match(raw) {
        return raw.to_string();
    }

    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('\'');
    for c in raw.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("''"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}
