//! The normalized strain name record.

use crate::diagnostics::{EventKey, EventLog};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured result of normalizing one free-form isolate name.
///
/// One record is built up per `normalize` call and returned by value; the
/// pipeline owns no state outside it. `raw` holds the (whitespace-trimmed)
/// input verbatim so no information is lost even on total parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrainName {
    /// Original input, immutable once set.
    pub raw: String,
    /// Canonical subtype: `A`, `B`, `A(H3N2)`, `A(H3)`, `A(N2)`, or empty.
    pub subtype: String,
    /// Animal host, uppercased; empty means human.
    pub host: String,
    /// Resolved location name, or the unresolved raw token in degraded mode.
    pub location: String,
    /// Country of the resolved location; empty in degraded mode.
    pub country: String,
    /// Continent of the resolved location; empty in degraded mode.
    pub continent: String,
    /// Lab isolate identifier within location/year.
    pub isolation: String,
    /// Four-digit collection year, or empty.
    pub year: String,
    /// Canonical reassortant lineage code, or empty.
    pub reassortant: String,
    /// Canonical passage-history string, or empty.
    pub passage: String,
    /// Amino-acid substitution tokens, in the order found.
    pub mutations: Vec<String>,
    /// Leftover unclassified text.
    pub extra: String,
    /// Ordered diagnostic events explaining every decision taken.
    pub messages: EventLog,
}

impl StrainName {
    /// Create an empty record holding the trimmed raw input.
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.trim().to_string(),
            ..Self::default()
        }
    }

    /// Whether the record is complete: location and isolation assigned and
    /// the year is exactly four digits. Only a complete record may render
    /// its canonical composed name.
    pub fn is_complete(&self) -> bool {
        !self.location.is_empty()
            && !self.isolation.is_empty()
            && self.year.len() == 4
            && self.year.chars().all(|c| c.is_ascii_digit())
    }

    /// Whether every structured field except `reassortant` is empty.
    pub fn is_bare_reassortant(&self) -> bool {
        !self.reassortant.is_empty()
            && self.subtype.is_empty()
            && self.host.is_empty()
            && self.location.is_empty()
            && self.isolation.is_empty()
            && self.year.is_empty()
    }

    /// Render the canonical composed name.
    ///
    /// Complete records render `subtype/host/location/isolation/year` with
    /// empty components omitted. Incomplete records fall back to `raw`, or
    /// to the bare reassortant code when nothing else was assigned.
    pub fn canonical_name(&self) -> String {
        if self.is_complete() {
            let mut parts = Vec::with_capacity(5);
            if !self.subtype.is_empty() {
                parts.push(self.subtype.as_str());
            }
            if !self.host.is_empty() {
                parts.push(self.host.as_str());
            }
            parts.push(self.location.as_str());
            parts.push(self.isolation.as_str());
            parts.push(self.year.as_str());
            return parts.join("/");
        }
        if self.is_bare_reassortant() {
            return self.reassortant.clone();
        }
        self.raw.clone()
    }

    /// Append a diagnostic event.
    pub fn note(&mut self, key: EventKey, value: impl Into<String>) {
        self.messages.push(key, value);
    }

    /// Append a diagnostic event attributed to a slash part index.
    pub fn note_at(&mut self, key: EventKey, value: impl Into<String>, position: usize) {
        self.messages.push_at(key, value, position);
    }
}

impl fmt::Display for StrainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}
