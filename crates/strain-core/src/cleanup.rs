//! Extra-text cleanup and mutation scanning.
//!
//! Whatever text is left after structured-field extraction is scrubbed in
//! a fixed-point loop: reassortant, mutations and passage are peeled off
//! first, then a table of cleanup rules removes meaningless tokens until
//! no rule fires.

use regex::Regex;
use std::sync::LazyLock;

use strain_model::{EventKey, StrainName};

use crate::passage::parse_passage;
use crate::reassortant::parse_reassortant;
use crate::subtype::normalize_subtype;
use crate::text_utils::collapse_spaces;

/// Amino-acid substitution shorthand: optional letter, 1-3 digits, letter,
/// optionally `HA-` prefixed.
static MUTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:HA-)?([A-Z]?\d{1,3}[A-Z])").expect("valid mutation pattern"));

/// Standalone NEW marker.
static NEW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[ /])NEW(?:[ /]|$)").expect("valid NEW pattern"));

/// Parenthesized MIXED annotations.
static MIXED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(MIXED[^)]*\)").expect("valid MIXED pattern"));

/// A parenthesized or question-mark-delimited subtype spec.
static SUBTYPE_SPEC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[(?]\s*(H\d{1,2}N\d{1,2}V?|H\d{1,2}|N\d{1,2}V?)\s*[)?]")
        .expect("valid subtype spec pattern")
});

/// Scrub the record's leftover text.
pub(crate) fn scrub_extra(record: &mut StrainName, extract_passage: bool) {
    let mut passage_attempt_failed = false;
    loop {
        let mut changed = false;

        if record.reassortant.is_empty() && !record.extra.is_empty() {
            let (code, rest) = parse_reassortant(&record.extra);
            if !code.is_empty() {
                record.reassortant = code;
                record.extra = rest;
                changed = true;
            }
        }

        if record.mutations.is_empty() && !record.extra.is_empty() {
            let (mutations, rest) = scan_mutations(&record.extra);
            if !mutations.is_empty() {
                record.mutations = mutations;
                record.extra = rest;
                changed = true;
            }
        }

        if extract_passage && record.passage.is_empty() && !record.extra.is_empty() {
            let (passage, unrecognized) = parse_passage(&record.extra);
            if !passage.is_empty() {
                record.passage = passage;
                record.extra.clear();
                changed = true;
            } else if !unrecognized.is_empty() {
                passage_attempt_failed = true;
            }
        }

        if apply_cleanup_rules(record) {
            changed = true;
        }
        if !changed {
            break;
        }
    }
    if passage_attempt_failed && record.passage.is_empty() && !record.extra.is_empty() {
        record.note(EventKey::UnrecognizedPassage, record.extra.clone());
    }
}

/// Apply the first cleanup rule that fires. Returns whether one did.
fn apply_cleanup_rules(record: &mut StrainName) -> bool {
    if record.extra.is_empty() {
        return false;
    }

    if let std::borrow::Cow::Owned(next) = NEW_RE.replace(&record.extra, " ") {
        record.extra = collapse_spaces(&next);
        return true;
    }

    if let std::borrow::Cow::Owned(next) = MIXED_RE.replace(&record.extra, " ") {
        record.extra = collapse_spaces(&next);
        return true;
    }

    // A stray subtype spec is dropped; it refines the subtype only while
    // that is still the bare unqualified A.
    if let Some(caps) = SUBTYPE_SPEC_RE.captures(&record.extra) {
        let inner = caps[1].to_string();
        let span = caps.get(0).expect("whole match").range();
        if record.subtype == "A"
            && let Some(canonical) = normalize_subtype(&inner)
        {
            record.subtype = canonical;
        }
        let mut next = record.extra.clone();
        next.replace_range(span, " ");
        record.extra = collapse_spaces(&next);
        return true;
    }

    let stripped = record
        .extra
        .trim_start_matches([' ', '/', ',', ';', ':', '+', '-', '.']);
    if stripped.len() != record.extra.len() {
        record.extra = stripped.to_string();
        return true;
    }

    if !record.extra.chars().any(|c| c.is_ascii_alphanumeric()) {
        record.extra.clear();
        return true;
    }

    if let Some(inner) = enclosing_parens(&record.extra) {
        record.extra = inner.trim().to_string();
        return true;
    }

    false
}

/// The inner text when one pair of parentheses encloses the whole string.
fn enclosing_parens(text: &str) -> Option<&str> {
    if text.len() < 2 || !text.starts_with('(') || !text.ends_with(')') {
        return None;
    }
    let mut depth = 0i32;
    for (i, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 && i != text.len() - 1 {
                    return None;
                }
            }
            _ => {}
        }
    }
    (depth == 0).then(|| &text[1..text.len() - 1])
}

/// Repeatedly extract substitution tokens, in the order found.
pub(crate) fn scan_mutations(text: &str) -> (Vec<String>, String) {
    let mut found = Vec::new();
    let mut remaining = text.to_string();
    while let Some((range, token)) = next_mutation(&remaining) {
        found.push(token);
        remaining.replace_range(range, " ");
    }
    if found.is_empty() {
        (found, remaining)
    } else {
        let cleaned = collapse_spaces(&remaining);
        (found, cleaned)
    }
}

fn next_mutation(text: &str) -> Option<(std::ops::Range<usize>, String)> {
    for caps in MUTATION_RE.captures_iter(text) {
        let whole = caps.get(0).expect("whole match");
        let token = caps.get(1).expect("substitution group");
        let before_ok = text[..whole.start()]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_ascii_alphanumeric());
        let after_ok = text[whole.end()..]
            .chars()
            .next()
            .is_none_or(|c| !(c.is_ascii_alphanumeric() || c == '?' || c == ')'));
        if before_ok && after_ok {
            return Some((whole.range(), token.as_str().to_string()));
        }
    }
    None
}
