//! Subtype token normalization.
//!
//! Canonical forms are `A`, `B`, `A(H#N#)`, `A(H#)`, `A(N#)` with H in
//! 1..=18 and N in 1..=11; a trailing `V` is permitted on the N side.
//! Recognition is an ordered list of (pattern, canonicalizer) pairs; the
//! first matching pattern decides the outcome.

use regex::{Captures, Regex};
use std::sync::LazyLock;

const H_MAX: u8 = 18;
const N_MAX: u8 = 11;

type Canonicalizer = fn(&Captures) -> Option<String>;

/// Ordered recognition rules. Unknown-side markers are `?`, `X`, `-`, or
/// a bare `H`/`N` with nothing attached.
static RULES: LazyLock<Vec<(Regex, Canonicalizer)>> = LazyLock::new(|| {
    let rule = |pattern: &str, canonicalize: Canonicalizer| {
        (Regex::new(pattern).expect("valid subtype pattern"), canonicalize)
    };
    vec![
        rule(r"^A?\(?H(\d{1,2})/?N(\d{1,2})(V?)\)?$", full_spec),
        rule(r"^A?\(?H(\d{1,2})/?N[?X-]?\)?$", h_side),
        rule(r"^A?\(?H[?X-]?/?N(\d{1,2})(V?)\)?$", n_side),
        rule(r"^A?\(?H(\d{1,2})\)?$", h_side),
        rule(r"^A?\(?N(\d{1,2})(V?)\)?$", n_side),
        rule(r"^A?\(?H[?X-]?/?N[?X-]?\)?$", bare_a),
    ]
});

fn antigen_number(text: &str, max: u8) -> Option<u8> {
    let value: u8 = text.parse().ok()?;
    (1..=max).contains(&value).then_some(value)
}

fn full_spec(caps: &Captures) -> Option<String> {
    let h = antigen_number(&caps[1], H_MAX)?;
    let n = antigen_number(&caps[2], N_MAX)?;
    Some(format!("A(H{h}N{n}{})", &caps[3]))
}

fn h_side(caps: &Captures) -> Option<String> {
    let h = antigen_number(&caps[1], H_MAX)?;
    Some(format!("A(H{h})"))
}

fn n_side(caps: &Captures) -> Option<String> {
    let n = antigen_number(&caps[1], N_MAX)?;
    Some(format!("A(N{n}{})", &caps[2]))
}

fn bare_a(_caps: &Captures) -> Option<String> {
    Some("A".to_string())
}

/// Normalize a subtype token to canonical form.
///
/// Returns `None` when the token is not a recognizable subtype; the caller
/// records the diagnostic and continues, this is never fatal to a parse.
pub fn normalize_subtype(token: &str) -> Option<String> {
    let trimmed = token.trim().to_uppercase();
    if trimmed == "A" || trimmed == "B" {
        return Some(trimmed);
    }
    // High-yield marker prefix, then the remainder is re-normalized.
    if let Some(rest) = trimmed.strip_prefix("HY ") {
        return normalize_subtype(rest);
    }
    for (pattern, canonicalize) in RULES.iter() {
        if let Some(caps) = pattern.captures(&trimmed) {
            return canonicalize(&caps);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_types_pass_through() {
        assert_eq!(normalize_subtype("A").as_deref(), Some("A"));
        assert_eq!(normalize_subtype("B").as_deref(), Some("B"));
        assert_eq!(normalize_subtype("b").as_deref(), Some("B"));
    }

    #[test]
    fn full_spec_normalizes() {
        assert_eq!(normalize_subtype("A(H3N2)").as_deref(), Some("A(H3N2)"));
        assert_eq!(normalize_subtype("H3N2").as_deref(), Some("A(H3N2)"));
        assert_eq!(normalize_subtype("A(H1/N1)").as_deref(), Some("A(H1N1)"));
        assert_eq!(normalize_subtype("H5N1V").as_deref(), Some("A(H5N1V)"));
    }

    #[test]
    fn unknown_side_is_dropped() {
        assert_eq!(normalize_subtype("A(H3N?)").as_deref(), Some("A(H3)"));
        assert_eq!(normalize_subtype("H3N?").as_deref(), Some("A(H3)"));
        assert_eq!(normalize_subtype("H?N2").as_deref(), Some("A(N2)"));
        assert_eq!(normalize_subtype("A(HXN2)").as_deref(), Some("A(N2)"));
    }

    #[test]
    fn both_sides_unknown_reduce_to_a() {
        assert_eq!(normalize_subtype("A(H?N?)").as_deref(), Some("A"));
        assert_eq!(normalize_subtype("H-N-").as_deref(), Some("A"));
        assert_eq!(normalize_subtype("HxNx").as_deref(), Some("A"));
    }

    #[test]
    fn high_yield_prefix_is_stripped() {
        assert_eq!(normalize_subtype("HY A").as_deref(), Some("A"));
        assert_eq!(normalize_subtype("HY H3N2").as_deref(), Some("A(H3N2)"));
    }

    #[test]
    fn out_of_range_and_garbage_fail() {
        assert_eq!(normalize_subtype("H19N2"), None);
        assert_eq!(normalize_subtype("H3N12"), None);
        assert_eq!(normalize_subtype("C"), None);
        assert_eq!(normalize_subtype("SINGAPORE"), None);
    }

    #[test]
    fn lone_sides_keep_parenthesized_form() {
        assert_eq!(normalize_subtype("H7").as_deref(), Some("A(H7)"));
        assert_eq!(normalize_subtype("A(N9)").as_deref(), Some("A(N9)"));
    }
}
