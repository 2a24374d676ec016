//! End-to-end pipeline tests against the built-in gazetteer.

use std::sync::LazyLock;

use strain_core::Normalizer;
use strain_gazetteer::{GazetteerIndex, load_builtin};
use strain_model::{EventKey, NormalizeOptions, StrainName};

static GAZETTEER: LazyLock<GazetteerIndex> =
    LazyLock::new(|| load_builtin().expect("builtin gazetteer"));

fn normalize(raw: &str) -> StrainName {
    Normalizer::new(&*GAZETTEER).normalize(raw, &NormalizeOptions::default())
}

// =========================================================================
// Standard shapes
// =========================================================================

#[test]
fn plain_four_part_name() {
    let record = normalize("A/SINGAPORE/INFIMH-16-0019/2016");
    assert_eq!(record.subtype, "A");
    assert_eq!(record.host, "");
    assert_eq!(record.location, "SINGAPORE");
    assert_eq!(record.country, "SINGAPORE");
    assert_eq!(record.continent, "ASIA");
    assert_eq!(record.isolation, "INFIMH-16-0019");
    assert_eq!(record.year, "2016");
    assert!(record.is_complete());
    assert!(record.messages.is_empty());
    assert_eq!(record.canonical_name(), "A/SINGAPORE/INFIMH-16-0019/2016");
}

#[test]
fn host_form_with_five_parts() {
    let record = normalize("A/SWINE/IOWA/533/76");
    assert_eq!(record.host, "SWINE");
    assert_eq!(record.location, "IOWA");
    assert_eq!(record.isolation, "533");
    assert_eq!(record.year, "1976");
    assert_eq!(record.canonical_name(), "A/SWINE/IOWA/533/1976");
}

#[test]
fn subtype_token_is_normalized() {
    let record = normalize("A(H3N2)/PERTH/16/2009");
    assert_eq!(record.subtype, "A(H3N2)");
    assert_eq!(record.location, "PERTH");
    assert_eq!(record.canonical_name(), "A(H3N2)/PERTH/16/2009");
}

#[test]
fn type_b_name() {
    let record = normalize("B/BRISBANE/60/2008");
    assert_eq!(record.subtype, "B");
    assert_eq!(record.location, "BRISBANE");
    assert_eq!(record.country, "AUSTRALIA");
    assert_eq!(record.canonical_name(), "B/BRISBANE/60/2008");
}

#[test]
fn leading_zeros_are_stripped_from_isolation() {
    let record = normalize("A/CALIFORNIA/07/2009");
    assert_eq!(record.isolation, "7");
    assert_eq!(record.canonical_name(), "A/CALIFORNIA/7/2009");
}

#[test]
fn short_location_abbreviations_expand() {
    let record = normalize("A/HK/8/68");
    assert_eq!(record.location, "HONG KONG");
    assert_eq!(record.country, "CHINA");
    assert_eq!(record.year, "1968");
}

// =========================================================================
// Reassortants
// =========================================================================

#[test]
fn trailing_reassortant_and_leftover_passage_text() {
    let record = normalize("A/SINGAPORE/INFIMH-16-0019/2016 CL2  X-307A");
    assert_eq!(record.canonical_name(), "A/SINGAPORE/INFIMH-16-0019/2016");
    assert_eq!(record.reassortant, "NYMC-307A");
    assert_eq!(record.passage, "");
    assert_eq!(record.extra, "CL2");
    assert!(record.messages.contains(EventKey::UnrecognizedPassage));
}

#[test]
fn front_reassortant_with_parenthesized_name() {
    let record = normalize("IVR-153 (A/CALIFORNIA/07/2009)");
    assert_eq!(record.canonical_name(), "A/CALIFORNIA/7/2009");
    assert_eq!(record.reassortant, "IVR-153");
    assert!(record.is_complete());
}

#[test]
fn bare_reassortant_code() {
    let record = normalize("X-157");
    assert_eq!(record.reassortant, "NYMC-157");
    assert_eq!(record.canonical_name(), "NYMC-157");
    assert!(record.messages.contains(EventKey::ReassortantWithoutName));
    assert!(!record.is_complete());
}

// =========================================================================
// Hosts
// =========================================================================

#[test]
fn misspelled_host_is_corrected() {
    let record = normalize("A/TURKY/ENGLAND/384/79");
    assert_eq!(record.host, "TURKEY");
    assert_eq!(record.location, "ENGLAND");
    assert_eq!(record.year, "1979");
    assert!(record.messages.is_empty());
}

#[test]
fn test_host_is_kept_but_flagged() {
    let record = normalize("A/TEST/BERLIN/1/2016");
    assert_eq!(record.host, "TEST");
    assert!(record.messages.contains(EventKey::InvalidHost));
    assert!(record.is_complete());
}

#[test]
fn unknown_host_is_kept_but_flagged() {
    let record = normalize("A/ALPACA/BERLIN/1/2016");
    assert_eq!(record.host, "ALPACA");
    assert!(record.messages.contains(EventKey::InvalidHost));
}

// =========================================================================
// Location fallbacks
// =========================================================================

#[test]
fn unresolved_location_degrades_but_completes() {
    let record = normalize("A/XANADU/7/2012");
    assert_eq!(record.location, "XANADU");
    assert_eq!(record.country, "");
    assert_eq!(record.continent, "");
    assert!(record.messages.contains(EventKey::LocationNotFound));
    assert!(record.is_complete());
}

#[test]
fn location_prefix_split_recovers_isolation() {
    let record = normalize("A/BERLIN55/3/2016");
    assert_eq!(record.location, "BERLIN");
    assert_eq!(record.isolation, "55-3");
    assert_eq!(record.year, "2016");
}

#[test]
fn script_range_token_is_known_unresolvable() {
    let record = normalize("A/北京/1/16");
    assert_eq!(record.location, "北京");
    assert_eq!(record.country, "");
    assert!(record.messages.contains(EventKey::LocationNotFound));
    assert_eq!(record.year, "2016");
}

#[test]
fn no_location_field_at_all() {
    let record = normalize("A/SWINE/2016");
    assert!(record.messages.contains(EventKey::LocationFieldNotFound));
    assert_eq!(record.host, "SWINE");
    assert_eq!(record.year, "2016");
    assert!(!record.is_complete());
    // Compound positional failures carry the + marker in the payload.
    let event = record
        .messages
        .iter()
        .find(|e| e.key == EventKey::LocationFieldNotFound)
        .expect("event present");
    assert!(event.value.starts_with('+'));
}

#[test]
fn missing_isolation_is_flagged() {
    let record = normalize("A/SINGAPORE/2016");
    assert_eq!(record.location, "SINGAPORE");
    assert_eq!(record.year, "2016");
    assert!(record.messages.contains(EventKey::IsolationAbsent));
    assert!(!record.is_complete());
}

// =========================================================================
// Double and multiple locations
// =========================================================================

#[test]
fn host_place_collision_discards_the_false_location() {
    let record = normalize("A/TURKEY/ENGLAND/384/79");
    assert_eq!(record.host, "TURKEY");
    assert_eq!(record.location, "ENGLAND");
    assert_eq!(record.country, "UNITED KINGDOM");
    assert_eq!(record.isolation, "384");
    assert_eq!(record.year, "1979");
}

#[test]
fn city_country_pair_collapses_to_the_city() {
    let record = normalize("A/DAKAR/SENEGAL/5/2016");
    assert_eq!(record.location, "DAKAR");
    assert_eq!(record.country, "SENEGAL");
    assert_eq!(record.isolation, "5");
    assert!(record.is_complete());
}

#[test]
fn same_country_pair_merges_into_one_location() {
    let record = normalize("A/CASTILLA/LEON/2/2015");
    assert_eq!(record.location, "CASTILLA LEON");
    assert_eq!(record.country, "SPAIN");
    assert_eq!(record.isolation, "2");
    assert_eq!(record.year, "2015");
}

#[test]
fn irreconcilable_double_location_is_reported() {
    let record = normalize("A/BERLIN/3/TOKYO");
    assert!(record.messages.contains(EventKey::DoubleLocation));
    assert!(!record.is_complete());
    assert_eq!(record.canonical_name(), record.raw);
}

#[test]
fn three_or_more_matches_are_reported() {
    let record = normalize("A/BERLIN/TOKYO/PERTH/1/16");
    assert!(record.messages.contains(EventKey::MultipleLocation));
    assert!(!record.is_complete());
}

#[test]
fn location_that_is_also_a_host_gets_an_advisory() {
    let record = normalize("A/TURKEY/A27/2016");
    assert_eq!(record.location, "TURKEY");
    assert_eq!(record.isolation, "A27");
    assert!(record.messages.contains(EventKey::LocationOrHost));
    // The advisory does not alter the result.
    assert!(record.is_complete());
}

// =========================================================================
// Extra text, mutations, passage
// =========================================================================

#[test]
fn mutations_are_collected_in_order() {
    let record = normalize("A/SINGAPORE/19/2016 K163E T192A");
    assert_eq!(record.mutations, vec!["K163E", "T192A"]);
    assert_eq!(record.extra, "");
    assert!(record.is_complete());
}

#[test]
fn passage_is_extracted_from_leftover_text() {
    let record = normalize("A/PERTH/16/2009 MDCK2");
    assert_eq!(record.passage, "MDCK2");
    assert_eq!(record.extra, "");
}

#[test]
fn passage_extraction_can_be_disabled() {
    let gazetteer = &*GAZETTEER;
    let options = NormalizeOptions::new().with_extract_passage(false);
    let record = Normalizer::new(gazetteer).normalize("A/PERTH/16/2009 MDCK2", &options);
    assert_eq!(record.passage, "");
    assert_eq!(record.extra, "MDCK2");
    assert!(record.messages.contains(EventKey::Unrecognized));
}

#[test]
fn stray_subtype_spec_folds_into_bare_a() {
    let record = normalize("A/SINGAPORE/19/2016 (H3N2)");
    assert_eq!(record.subtype, "A(H3N2)");
    assert_eq!(record.extra, "");
    assert_eq!(record.canonical_name(), "A(H3N2)/SINGAPORE/19/2016");
}

#[test]
fn invalid_year_is_flagged() {
    let record = normalize("A/SINGAPORE/19/20166");
    assert_eq!(record.year, "");
    assert!(record.messages.contains(EventKey::InvalidYear));
    assert!(!record.is_complete());
}

// =========================================================================
// Contract properties
// =========================================================================

#[test]
fn empty_input_yields_empty_record() {
    let record = normalize("");
    assert_eq!(record, StrainName::default());

    let options = NormalizeOptions::new().with_warn_on_empty(true);
    let record = Normalizer::new(&*GAZETTEER).normalize("   ", &options);
    assert!(record.messages.contains(EventKey::EmptyName));
}

#[test]
fn raw_is_the_trimmed_input() {
    let record = normalize("  A/SINGAPORE/19/2016  ");
    assert_eq!(record.raw, "A/SINGAPORE/19/2016");
}

#[test]
fn normalizing_a_canonical_name_is_a_fixed_point() {
    let first = normalize("A/SWINE/IOWA/533/76");
    assert!(first.is_complete());
    let second = normalize(&first.canonical_name());
    assert_eq!(second.canonical_name(), first.canonical_name());
    assert_eq!(second.subtype, first.subtype);
    assert_eq!(second.host, first.host);
    assert_eq!(second.location, first.location);
    assert_eq!(second.isolation, first.isolation);
    assert_eq!(second.year, first.year);

    // A name already in canonical form round-trips to an identical record.
    let canonical = normalize("A/SINGAPORE/INFIMH-16-0019/2016");
    let again = normalize(&canonical.canonical_name());
    assert_eq!(again, canonical);
}
