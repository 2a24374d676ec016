//! In-memory gazetteer index.

use std::collections::BTreeMap;

use strain_model::{Gazetteer, LocationMatch};

/// One canonical place: name plus its country and continent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GazetteerEntry {
    pub name: String,
    pub country: String,
    pub continent: String,
}

/// Immutable-after-load geographic name index keyed by uppercased name.
///
/// Lookups are exact; callers are expected to case-normalize candidates
/// first. The index takes no locks, so concurrent read-only use from
/// multiple threads is safe.
#[derive(Debug, Clone, Default)]
pub struct GazetteerIndex {
    entries: BTreeMap<String, GazetteerEntry>,
}

impl GazetteerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, keyed by its uppercased name. Later inserts win.
    pub fn insert(&mut self, name: &str, country: &str, continent: &str) {
        let key = name.trim().to_uppercase();
        self.entries.insert(
            key.clone(),
            GazetteerEntry {
                name: key,
                country: country.trim().to_uppercase(),
                continent: continent.trim().to_uppercase(),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&GazetteerEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Gazetteer for GazetteerIndex {
    fn lookup(&self, candidate: &str) -> LocationMatch {
        match self.entries.get(candidate) {
            Some(entry) => LocationMatch::Found {
                name: entry.name.clone(),
                country: entry.country.clone(),
                continent: entry.continent.clone(),
            },
            None => LocationMatch::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact_on_uppercased_names() {
        let mut index = GazetteerIndex::new();
        index.insert("Singapore", "Singapore", "Asia");

        assert!(index.lookup("SINGAPORE").is_found());
        assert_eq!(index.lookup("singapore"), LocationMatch::NotFound);
        assert_eq!(index.lookup("SINGAPOR"), LocationMatch::NotFound);
    }
}
