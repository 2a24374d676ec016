//! Core-facing gazetteer adapter.
//!
//! Wraps the external [`Gazetteer`] with the normalization the pipeline
//! needs: case-folding, a small abbreviation table for short tokens, and a
//! script-range heuristic for untranslated locality names.

use strain_model::{Gazetteer, LocationMatch};

/// Abbreviations tried when an exact lookup of a short token fails.
const ABBREVIATIONS: [(&str, &str); 5] = [
    ("UK", "UNITED KINGDOM"),
    ("NY", "NEW YORK"),
    ("HK", "HONG KONG"),
    ("DE", "GERMANY"),
    ("TX", "TEXAS"),
];

/// Maximum token length eligible for abbreviation expansion.
const ABBREVIATION_MAX_LEN: usize = 2;

pub struct GazetteerAdapter<'g> {
    inner: &'g dyn Gazetteer,
}

impl<'g> GazetteerAdapter<'g> {
    pub fn new(inner: &'g dyn Gazetteer) -> Self {
        Self { inner }
    }

    /// Resolve a candidate location token.
    ///
    /// The candidate is trimmed and uppercased before lookup. A failed
    /// exact lookup of a short token is retried through the abbreviation
    /// table; a failed lookup of a token in the CJK script range is
    /// reported as [`LocationMatch::AmbiguousScript`] rather than a plain
    /// miss.
    pub fn locate(&self, candidate: &str) -> LocationMatch {
        let normalized = candidate.trim().to_uppercase();
        if normalized.is_empty() {
            return LocationMatch::NotFound;
        }
        match self.inner.lookup(&normalized) {
            hit @ LocationMatch::Found { .. } => hit,
            LocationMatch::AmbiguousScript => LocationMatch::AmbiguousScript,
            LocationMatch::NotFound => {
                if normalized.chars().count() <= ABBREVIATION_MAX_LEN
                    && let Some(expansion) = expand_abbreviation(&normalized)
                    && let hit @ LocationMatch::Found { .. } = self.inner.lookup(expansion)
                {
                    return hit;
                }
                if contains_cjk(&normalized) {
                    LocationMatch::AmbiguousScript
                } else {
                    LocationMatch::NotFound
                }
            }
        }
    }
}

fn expand_abbreviation(token: &str) -> Option<&'static str> {
    ABBREVIATIONS
        .iter()
        .find(|(short, _)| *short == token)
        .map(|(_, long)| *long)
}

/// CJK unified ideograph ranges: untranslated Chinese locality names land
/// here and are known-unresolvable.
fn contains_cjk(token: &str) -> bool {
    token
        .chars()
        .any(|ch| matches!(ch, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}'))
}
