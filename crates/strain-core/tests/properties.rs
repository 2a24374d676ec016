//! Contract properties checked over generated inputs.

use std::sync::LazyLock;

use proptest::prelude::*;

use strain_core::{Normalizer, parse_passage};
use strain_gazetteer::{GazetteerIndex, load_builtin};
use strain_model::NormalizeOptions;

static GAZETTEER: LazyLock<GazetteerIndex> =
    LazyLock::new(|| load_builtin().expect("builtin gazetteer"));

proptest! {
    // normalize always terminates, never fails, and keeps the trimmed
    // input verbatim so nothing is ever lost.
    #[test]
    fn normalize_preserves_raw(input in ".{0,80}") {
        let normalizer = Normalizer::new(&*GAZETTEER);
        let record = normalizer.normalize(&input, &NormalizeOptions::default());
        prop_assert_eq!(record.raw.as_str(), input.trim());
    }

    // The unrecognized remainder is non-empty exactly when the canonical
    // passage is empty, except for blank input where both are empty.
    #[test]
    fn passage_remainder_marks_failure(input in "[A-Za-z0-9/,+? -]{0,24}") {
        let (canonical, unrecognized) = parse_passage(&input);
        if input.trim().is_empty() {
            prop_assert!(canonical.is_empty() && unrecognized.is_empty());
        } else {
            prop_assert_eq!(canonical.is_empty(), !unrecognized.is_empty());
        }
    }
}
