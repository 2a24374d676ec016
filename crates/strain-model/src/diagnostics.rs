//! Typed diagnostic events emitted during name normalization.
//!
//! Every fallback or failure taken by the pipeline appends one event to the
//! record's log. The log is append-only and preserves emission order so a
//! downstream reporter can explain each decision in the order it was made.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic event key.
///
/// Closed set: every key the pipeline can emit has a variant here, so
/// reporters can match exhaustively instead of comparing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKey {
    /// Subtype token present but not normalizable.
    InvalidSubtype,
    /// Host token outside the known vocabulary, or a TEST-prefixed host.
    InvalidHost,
    /// A token looked like a location but the gazetteer had no entry.
    LocationNotFound,
    /// No positional heuristic produced a location field at all.
    LocationFieldNotFound,
    /// The isolation field is genuinely empty.
    IsolationAbsent,
    /// Isolation token present but unusable.
    InvalidIsolation,
    /// Year token present but not a valid 2- or 4-digit year.
    InvalidYear,
    /// Passage text did not match the passage grammar.
    UnrecognizedPassage,
    /// A reassortant code was found with no strain name attached.
    ReassortantWithoutName,
    /// Advisory: the resolved location may actually have been a host.
    LocationOrHost,
    /// Two gazetteer matches that could not be reconciled.
    DoubleLocation,
    /// Three or more gazetteer matches.
    MultipleLocation,
    /// Leftover text that no rule could classify.
    Unrecognized,
    /// The input string was empty.
    EmptyName,
}

impl EventKey {
    /// Stable string form of the key, as consumed by external reporters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidSubtype => "invalid-subtype",
            Self::InvalidHost => "invalid-host",
            Self::LocationNotFound => "location-not-found",
            Self::LocationFieldNotFound => "location-field-not-found",
            Self::IsolationAbsent => "isolation-absent",
            Self::InvalidIsolation => "invalid-isolation",
            Self::InvalidYear => "invalid-year",
            Self::UnrecognizedPassage => "unrecognized-passage",
            Self::ReassortantWithoutName => "reassortant-without-name",
            Self::LocationOrHost => "location-or-host",
            Self::DoubleLocation => "double-location",
            Self::MultipleLocation => "multiple-location",
            Self::Unrecognized => "unrecognized",
            Self::EmptyName => "empty-name",
        }
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic event: key, offending value, and (when known) the slash
/// part index the value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseEvent {
    pub key: EventKey,
    pub value: String,
    /// Zero-based index of the slash-delimited part, when attributable.
    pub position: Option<usize>,
}

impl fmt::Display for ParseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(f, "{}: {:?} (part {})", self.key, self.value, pos),
            None => write!(f, "{}: {:?}", self.key, self.value),
        }
    }
}

/// Append-only ordered list of diagnostic events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<ParseEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event with no source position.
    pub fn push(&mut self, key: EventKey, value: impl Into<String>) {
        self.events.push(ParseEvent {
            key,
            value: value.into(),
            position: None,
        });
    }

    /// Append an event attributed to a slash part index.
    pub fn push_at(&mut self, key: EventKey, value: impl Into<String>, position: usize) {
        self.events.push(ParseEvent {
            key,
            value: value.into(),
            position: Some(position),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParseEvent> {
        self.events.iter()
    }

    /// Whether any event with the given key was recorded.
    pub fn contains(&self, key: EventKey) -> bool {
        self.events.iter().any(|event| event.key == key)
    }

    pub fn events(&self) -> &[ParseEvent] {
        &self.events
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a ParseEvent;
    type IntoIter = std::slice::Iter<'a, ParseEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
