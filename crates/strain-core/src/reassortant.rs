//! Reassortant lineage code recognition.
//!
//! Lineage codes are written many ways (`X-307A`, `NYMC X-307A`, `BX-51B`,
//! `NIBRG-121`, `PR8-IDCDC-RG42A`, ...). Recognition is an ordered cascade
//! of (pattern, canonicalizer) pairs tried against the whole candidate
//! text; the first pattern that matches anywhere wins and its span is
//! excised from the text.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::text_utils::join_spaced;

type Canonicalizer = fn(&Captures) -> String;

static CASCADE: LazyLock<Vec<(Regex, Canonicalizer)>> = LazyLock::new(|| {
    let rule = |pattern: &str, canonicalize: Canonicalizer| {
        (
            Regex::new(pattern).expect("valid reassortant pattern"),
            canonicalize,
        )
    };
    vec![
        rule(
            r"\b(?:NYMC[ _-]?(?:BX|X)?|BX|X)[ _-]?(\d+[A-Z]*)\b",
            |caps| format!("NYMC-{}", &caps[1]),
        ),
        rule(r"\bNIB(?:SC|RG)?[ _-]?(\d+[A-Z]*)\b", |caps| {
            format!("NIB-{}", &caps[1])
        }),
        rule(r"\b(?:CBER|BVR)[ _-]?(\d+[A-Z]*)\b", |caps| {
            format!("CBER-{}", &caps[1])
        }),
        rule(r"\bCDC[ _-]?(LV\d+[AB]?)\b", |caps| {
            format!("CDC-{}", &caps[1])
        }),
        rule(
            r"\b(?:PR8[ _-]?IDCDC[ _-]?|IDCDC[ _-]?)?RG[ _-]?([0-9][0-9A-Z.]*)\b",
            |caps| format!("RG-{}", &caps[1]),
        ),
        rule(r"\bX[ _-]?PR8\b", |_| "X-PR8".to_string()),
        rule(r"\bIVR[ _-]?(\d+[A-Z]*)\b", |caps| {
            format!("IVR-{}", &caps[1])
        }),
    ]
});

/// Extract a reassortant lineage code from anywhere in the text.
///
/// Returns the canonical code plus the text with the matched span removed,
/// prefix and suffix trimmed and rejoined with one space. With no match
/// the code is empty and the text comes back unchanged.
pub fn parse_reassortant(raw: &str) -> (String, String) {
    let text = raw.trim();
    if text.is_empty() {
        return (String::new(), String::new());
    }
    let upper = text.to_uppercase();
    for (pattern, canonicalize) in CASCADE.iter() {
        if let Some(caps) = pattern.captures(&upper) {
            let span = caps.get(0).expect("whole match");
            let code = canonicalize(&caps);
            let remaining = join_spaced(&upper[..span.start()], &upper[span.end()..]);
            return (code, remaining);
        }
    }
    (String::new(), text.to_string())
}

/// A lineage code extracted from the front of a full name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FrontReassortant {
    pub code: String,
    /// The strain name the code was attached to, empty when absent.
    pub name: String,
    /// Front text left over after excising the code.
    pub leftover: String,
}

/// First-character dispatch: only tokens starting with one of the lineage
/// family letters go through the cascade, and `A/`/`B/` type prefixes are
/// never candidates.
fn front_candidate(text: &str) -> bool {
    matches!(
        text.as_bytes().first(),
        Some(b'I' | b'N' | b'R' | b'S' | b'X' | b'B' | b'C' | b'A')
    ) && !text.starts_with("A/")
        && !text.starts_with("B/")
}

/// Find the closer matching the opener at byte offset `open`.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0i32;
    for (offset, ch) in text[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extract a reassortant written in front of a name, either
/// `CODE (A/Name/.../Year)` or `CODE A/Name/.../Year`.
///
/// Returns `None` when the text does not start with a lineage code; the
/// caller then parses the text as a plain name.
pub(crate) fn extract_front(text: &str) -> Option<FrontReassortant> {
    if !front_candidate(text) {
        return None;
    }
    if let Some(open) = text.find('(') {
        let close = matching_paren(text, open)?;
        let front = &text[..open];
        let inner = text[open + 1..close].trim();
        let tail = text[close + 1..].trim();
        let (code, front_left) = parse_reassortant(front);
        if code.is_empty() {
            return None;
        }
        if inner.starts_with("A/") || inner.starts_with("B/") {
            return Some(FrontReassortant {
                code,
                name: inner.to_string(),
                leftover: join_spaced(&front_left, tail),
            });
        }
        return Some(FrontReassortant {
            code,
            name: String::new(),
            leftover: join_spaced(&join_spaced(&front_left, inner), tail),
        });
    }
    let (code, remaining) = parse_reassortant(text);
    if code.is_empty() {
        return None;
    }
    if remaining.starts_with("A/") || remaining.starts_with("B/") {
        return Some(FrontReassortant {
            code,
            name: remaining,
            leftover: String::new(),
        });
    }
    Some(FrontReassortant {
        code,
        name: String::new(),
        leftover: remaining,
    })
}
