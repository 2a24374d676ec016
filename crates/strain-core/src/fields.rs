//! Year and isolation field validation.

use crate::text_utils::{has_excess_closers, split_leading_digits};

/// Outcome of validating a year token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearOutcome {
    /// A usable four-digit year plus whatever trailed the digit run.
    Valid { year: String, remainder: String },
    /// Not a year at all.
    Invalid,
}

/// Validate a year token against the current year.
///
/// One or two digits pivot on the current two-digit year (at or below it
/// means 20xx, above it means 19xx); exactly four digits must not lie in
/// the future. Tokens with more closers than openers are rejected outright
/// since they are mis-split trailing annotations.
pub fn normalize_year(token: &str, current_year: i32) -> YearOutcome {
    let trimmed = token.trim();
    if trimmed.is_empty() || has_excess_closers(trimmed) {
        return YearOutcome::Invalid;
    }
    let (digits, rest) = split_leading_digits(trimmed);
    let year = match digits.len() {
        1 | 2 => {
            let value: i32 = digits.parse().expect("digit run parses");
            let pivot = current_year % 100;
            if value <= pivot {
                format!("{}", 2000 + value)
            } else {
                format!("{}", 1900 + value)
            }
        }
        4 => {
            let value: i32 = digits.parse().expect("digit run parses");
            if value > current_year {
                return YearOutcome::Invalid;
            }
            digits.to_string()
        }
        _ => return YearOutcome::Invalid,
    };
    YearOutcome::Valid {
        year,
        remainder: rest.trim().to_string(),
    }
}

/// Outcome of validating an isolation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IsolationOutcome {
    /// Cleaned identifier.
    Valid(String),
    /// Cleaning consumed everything; the original token is kept opaque.
    Opaque(String),
    /// The token was genuinely empty.
    Absent,
}

/// Clean an isolation token: leading spaces and zeros skipped, a trailing
/// `_HA` removed, remaining underscores turned into spaces.
pub fn normalize_isolation(token: &str) -> IsolationOutcome {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return IsolationOutcome::Absent;
    }
    let stripped = trimmed.trim_start_matches([' ', '0']);
    let stripped = stripped.strip_suffix("_HA").unwrap_or(stripped);
    if stripped.is_empty() {
        return IsolationOutcome::Opaque(trimmed.to_string());
    }
    IsolationOutcome::Valid(stripped.replace('_', " "))
}
