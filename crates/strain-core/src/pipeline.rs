//! The normalization pipeline.
//!
//! Control flow: strip/upcase copy, optional front reassortant extraction,
//! slash split, gazetteer search over the parts, field disambiguation,
//! then extra-text cleanup. Every call returns a record; malformed input
//! degrades the record and adds diagnostics, it never fails the call.

use chrono::Datelike;
use tracing::{debug, warn};

use strain_model::{EventKey, Gazetteer, LocationMatch, NormalizeOptions, StrainName};

use crate::cleanup::scrub_extra;
use crate::disambiguate::{LocatedPart, disambiguate};
use crate::lookup::GazetteerAdapter;
use crate::reassortant::extract_front;
use crate::text_utils::{collapse_spaces, join_spaced};

/// Strain name normalizer bound to a gazetteer.
///
/// The normalizer holds no mutable state; one instance may serve any
/// number of calls, concurrently when the gazetteer allows it.
pub struct Normalizer<'g> {
    adapter: GazetteerAdapter<'g>,
}

impl<'g> Normalizer<'g> {
    pub fn new(gazetteer: &'g dyn Gazetteer) -> Self {
        Self {
            adapter: GazetteerAdapter::new(gazetteer),
        }
    }

    /// Normalize one free-form isolate name.
    pub fn normalize(&self, raw: &str, options: &NormalizeOptions) -> StrainName {
        let mut record = StrainName::new(raw);
        if record.raw.is_empty() {
            if options.warn_on_empty {
                warn!("empty strain name");
                record.note(EventKey::EmptyName, "");
            }
            return record;
        }

        let mut text = collapse_spaces(&record.raw).to_uppercase();

        if let Some(front) = extract_front(&text) {
            debug!(code = %front.code, "front reassortant");
            record.reassortant = front.code.clone();
            if !front.leftover.is_empty() {
                record.extra = join_spaced(&record.extra, &front.leftover);
            }
            if front.name.is_empty() {
                record.note(EventKey::ReassortantWithoutName, &front.code);
                scrub_extra(&mut record, options.extract_passage);
                return record;
            }
            text = front.name;
        }

        let parts: Vec<String> = text
            .split('/')
            .map(|part| part.trim().to_string())
            .collect();

        let mut located = Vec::new();
        let mut script_positions = Vec::new();
        for (index, part) in parts.iter().enumerate() {
            match self.adapter.locate(part) {
                LocationMatch::Found {
                    name,
                    country,
                    continent,
                } => located.push(LocatedPart {
                    index,
                    name,
                    country,
                    continent,
                }),
                LocationMatch::AmbiguousScript => script_positions.push(index),
                LocationMatch::NotFound => {}
            }
        }
        debug!(
            parts = parts.len(),
            located = located.len(),
            "disambiguating"
        );

        disambiguate(
            &mut record,
            &parts,
            &located,
            &script_positions,
            &self.adapter,
            current_year(),
        );

        scrub_extra(&mut record, options.extract_passage);
        if !record.extra.is_empty() {
            record.note(EventKey::Unrecognized, record.extra.clone());
        }
        record
    }
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}
