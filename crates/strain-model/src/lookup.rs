//! Gazetteer lookup contract.
//!
//! The pipeline never talks to a concrete geographic database; it queries
//! anything implementing [`Gazetteer`] and matches exhaustively on the
//! returned [`LocationMatch`].

use serde::{Deserialize, Serialize};

/// Outcome of a single gazetteer query.
///
/// Closed union: call sites must handle all three cases, there is no
/// catch-all branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationMatch {
    /// The candidate resolved to a canonical place.
    Found {
        name: String,
        country: String,
        continent: String,
    },
    /// No entry for the candidate.
    NotFound,
    /// The candidate falls in a script range the gazetteer does not carry
    /// (untranslated Chinese locality names). Known-unresolvable, still
    /// logged by the caller.
    AmbiguousScript,
}

impl LocationMatch {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Canonical name when found.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Found { name, .. } => Some(name),
            Self::NotFound | Self::AmbiguousScript => None,
        }
    }
}

/// A read-only geographic name database.
///
/// Candidates are case-normalized (uppercased, trimmed) by the caller
/// before lookup. Implementations must be immutable after load, or
/// externally synchronized; the pipeline performs no locking of its own.
pub trait Gazetteer: Sync {
    /// Look up a candidate location string.
    fn lookup(&self, candidate: &str) -> LocationMatch;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_accessors() {
        let hit = LocationMatch::Found {
            name: "SINGAPORE".to_string(),
            country: "SINGAPORE".to_string(),
            continent: "ASIA".to_string(),
        };
        assert!(hit.is_found());
        assert_eq!(hit.name(), Some("SINGAPORE"));
        assert_eq!(LocationMatch::NotFound.name(), None);
        assert!(!LocationMatch::AmbiguousScript.is_found());
    }
}
