//! Small string helpers shared across the pipeline.

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Split a token into its leading ASCII digit run and the rest.
pub fn split_leading_digits(token: &str) -> (&str, &str) {
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    token.split_at(end)
}

/// Strip one enclosing pair of single or double quotes, if present.
pub fn strip_outer_quotes(token: &str) -> &str {
    let trimmed = token.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}

/// Whether the token's parenthesis nesting ever drops below zero, i.e. it
/// carries more closers than openers at some point. Guards against
/// mis-split trailing annotations being taken for data.
pub fn has_excess_closers(token: &str) -> bool {
    let mut depth: i32 = 0;
    for ch in token.chars() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

/// Join two fragments with a single space, tolerating empty sides.
pub fn join_spaced(left: &str, right: &str) -> String {
    let left = left.trim();
    let right = right.trim();
    if left.is_empty() {
        return right.to_string();
    }
    if right.is_empty() {
        return left.to_string();
    }
    format!("{left} {right}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_spaces_handles_runs() {
        assert_eq!(collapse_spaces("  A/X  1 \t 2  "), "A/X 1 2");
        assert_eq!(collapse_spaces(""), "");
    }

    #[test]
    fn split_leading_digits_basic() {
        assert_eq!(split_leading_digits("2016 CL2"), ("2016", " CL2"));
        assert_eq!(split_leading_digits("ABC"), ("", "ABC"));
        assert_eq!(split_leading_digits("99"), ("99", ""));
    }

    #[test]
    fn excess_closers_detected() {
        assert!(has_excess_closers("2016)"));
        assert!(has_excess_closers(")("));
        assert!(!has_excess_closers("(2016)"));
        assert!(!has_excess_closers("2016"));
    }

    #[test]
    fn quotes_stripped_once() {
        assert_eq!(strip_outer_quotes("\"SWINE\""), "SWINE");
        assert_eq!(strip_outer_quotes("'DUCK'"), "DUCK");
        assert_eq!(strip_outer_quotes("PLAIN"), "PLAIN");
    }

    #[test]
    fn join_spaced_tolerates_empty() {
        assert_eq!(join_spaced("", "CL2"), "CL2");
        assert_eq!(join_spaced("HY", ""), "HY");
        assert_eq!(join_spaced("HY", "CL2"), "HY CL2");
    }
}
