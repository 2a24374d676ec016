//! Field disambiguation.
//!
//! Given the slash-split token sequence and the tokens the gazetteer
//! resolved, decide which tokens are host, location, isolation and year.
//! The policy branches on how many tokens resolved (zero, one, two, more);
//! within each branch fixed-shape rules keyed by position and token count
//! apply, and every fallback taken is recorded as a diagnostic.

use tracing::debug;

use strain_model::{EventKey, LocationMatch, StrainName};

use crate::fields::{IsolationOutcome, YearOutcome, normalize_isolation, normalize_year};
use crate::host;
use crate::lookup::GazetteerAdapter;
use crate::subtype::normalize_subtype;
use crate::text_utils::{has_excess_closers, join_spaced, strip_outer_quotes};

/// A slash part the gazetteer resolved, tagged with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LocatedPart {
    pub index: usize,
    pub name: String,
    pub country: String,
    pub continent: String,
}

/// Assign host/location/isolation/year/subtype from the token sequence.
pub(crate) fn disambiguate(
    record: &mut StrainName,
    parts: &[String],
    located: &[LocatedPart],
    script_positions: &[usize],
    adapter: &GazetteerAdapter<'_>,
    current_year: i32,
) {
    match located.len() {
        0 => zero_located(record, parts, script_positions, adapter, current_year),
        1 => one_located(record, parts, &located[0], adapter, current_year),
        2 => two_located(record, parts, located, adapter, current_year),
        _ => {
            let names: Vec<&str> = located.iter().map(|part| part.name.as_str()).collect();
            debug!(count = located.len(), "more than two gazetteer matches");
            record.note(EventKey::MultipleLocation, names.join(" "));
        }
    }
    advise_location_or_host(record);
}

/// No token resolved: positional heuristics keyed by token count.
fn zero_located(
    record: &mut StrainName,
    parts: &[String],
    script_positions: &[usize],
    adapter: &GazetteerAdapter<'_>,
    current_year: i32,
) {
    // An untranslated-script token is the location, known-unresolvable.
    if let Some(&pos) = script_positions.first() {
        debug!(position = pos, "script-range token taken as location");
        if pos > 0 {
            assign_subtype(record, parts);
        }
        if pos >= 2 {
            assign_host(record, &parts[pos - 1], pos - 1);
        }
        record.location = parts[pos].clone();
        record.note_at(EventKey::LocationNotFound, &parts[pos], pos);
        assign_isolation_and_year(record, parts, pos + 1, current_year);
        return;
    }

    let n = parts.len();
    if !(3..=5).contains(&n) {
        record.note(
            EventKey::LocationFieldNotFound,
            format!("+{}", parts.join("/")),
        );
        return;
    }
    assign_subtype(record, parts);
    let candidate = &parts[1];

    // Longest gazetteer prefix of the second token: the rest of the token
    // is the start of the isolation text.
    if let Some((found, suffix)) = location_prefix(candidate, adapter) {
        debug!(token = %candidate, location = %found.name, "location prefix split");
        set_location(record, &found);
        if n == 3 {
            assign_isolation(record, &suffix, 1);
            assign_year(record, &parts[2], 2, current_year);
            return;
        }
        let mut middle: Vec<&str> = vec![suffix.as_str()];
        middle.extend(parts[2..n - 1].iter().map(|part| part.as_str()));
        assign_isolation(record, &middle.join("-"), 1);
        assign_year(record, &parts[n - 1], n - 1, current_year);
        return;
    }

    // Second token is a host: there may be no location token at all.
    if host::is_known_host(&host::correct_host_spelling(candidate)) {
        debug!(token = %candidate, "second token is a host, location unknown");
        assign_host(record, candidate, 1);
        if n == 3 {
            record.note(
                EventKey::LocationFieldNotFound,
                format!("+{}", parts.join("/")),
            );
            year_or_isolation(record, &parts[2], 2, current_year);
            return;
        }
        record.location = parts[2].clone();
        record.note_at(EventKey::LocationNotFound, &parts[2], 2);
        assign_isolation_and_year(record, parts, 3, current_year);
        return;
    }

    // Assume an unresolved location in degraded mode.
    debug!(token = %candidate, "assuming unresolved location");
    record.location = candidate.clone();
    record.note_at(EventKey::LocationNotFound, candidate, 1);
    assign_isolation_and_year(record, parts, 2, current_year);
}

/// One token resolved: dispatch on its position and the token count.
fn one_located(
    record: &mut StrainName,
    parts: &[String],
    located: &LocatedPart,
    adapter: &GazetteerAdapter<'_>,
    current_year: i32,
) {
    let p = located.index;
    if p != 0 {
        assign_subtype(record, parts);
    }
    if p >= 2 {
        assign_host(record, &parts[p - 1], p - 1);
        for stray in &parts[1..p - 1] {
            record.extra = join_spaced(&record.extra, stray);
        }
    }
    set_location(record, located);

    // The isolation text may itself start with more of the location name;
    // combined lookups win over hyphenated concatenation.
    let mut first = p + 1;
    while parts.len().saturating_sub(first) >= 2 {
        let candidate = format!("{} {}", record.location, parts[first]);
        match adapter.locate(&candidate) {
            LocationMatch::Found {
                name,
                country,
                continent,
            } => {
                debug!(location = %name, "extended location over next token");
                record.location = name;
                record.country = country;
                record.continent = continent;
                first += 1;
            }
            LocationMatch::NotFound | LocationMatch::AmbiguousScript => break,
        }
    }
    assign_isolation_and_year(record, parts, first, current_year);
}

/// Two tokens resolved: reconcile or report.
fn two_located(
    record: &mut StrainName,
    parts: &[String],
    located: &[LocatedPart],
    adapter: &GazetteerAdapter<'_>,
    current_year: i32,
) {
    let (a, b) = (&located[0], &located[1]);
    if b.index != a.index + 1 {
        record.note(EventKey::DoubleLocation, format!("{} {}", a.name, b.name));
        return;
    }

    // Host names that are also places (TURKEY and friends): the earlier
    // match is a false positive, discard it and re-run.
    if host::is_known_host(&parts[a.index]) {
        debug!(token = %parts[a.index], "earlier location match is a host");
        one_located(record, parts, b, adapter, current_year);
        return;
    }

    // Redundant city/country pair: keep the more specific side.
    if a.country == b.name || b.country == a.name {
        let (kept, dropped_index) = if a.country == b.name {
            (a, b.index)
        } else {
            (b, a.index)
        };
        debug!(kept = %kept.name, "collapsed city/country pair");
        let mut reduced: Vec<String> = parts.to_vec();
        reduced.remove(dropped_index);
        let mut kept = kept.clone();
        if kept.index > dropped_index {
            kept.index -= 1;
        }
        one_located(record, &reduced, &kept, adapter, current_year);
        return;
    }

    // Same country on both sides: one location name split across tokens.
    if a.country == b.country {
        let merged = LocatedPart {
            index: a.index,
            name: format!("{} {}", a.name, b.name),
            country: a.country.clone(),
            continent: a.continent.clone(),
        };
        debug!(location = %merged.name, "merged split location name");
        let mut reduced: Vec<String> = parts.to_vec();
        reduced[a.index] = merged.name.clone();
        reduced.remove(b.index);
        one_located(record, &reduced, &merged, adapter, current_year);
        return;
    }

    record.note(EventKey::DoubleLocation, format!("{} {}", a.name, b.name));
}

/// Advisory: the resolved location is itself a host name and the isolation
/// looks textual, so location and host may never have been distinct parts.
/// The result is left as is.
fn advise_location_or_host(record: &mut StrainName) {
    if !record.isolation.is_empty()
        && record
            .isolation
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
        && host::is_known_host(&record.location)
    {
        record.note(EventKey::LocationOrHost, record.location.clone());
    }
}

fn set_location(record: &mut StrainName, located: &LocatedPart) {
    record.location = located.name.clone();
    record.country = located.country.clone();
    record.continent = located.continent.clone();
}

fn assign_subtype(record: &mut StrainName, parts: &[String]) {
    let token = &parts[0];
    if token.is_empty() {
        return;
    }
    match normalize_subtype(token) {
        Some(canonical) => record.subtype = canonical,
        None => record.note_at(EventKey::InvalidSubtype, token, 0),
    }
}

fn assign_host(record: &mut StrainName, token: &str, position: usize) {
    let corrected = host::correct_host_spelling(strip_outer_quotes(token));
    if host::is_known_host(&corrected) {
        record.host = corrected;
        return;
    }
    // TEST submissions and unknown animals are kept, but flagged.
    record.host = corrected;
    record.note_at(EventKey::InvalidHost, token, position);
}

fn assign_isolation(record: &mut StrainName, token: &str, position: usize) {
    match normalize_isolation(token) {
        IsolationOutcome::Valid(cleaned) => record.isolation = cleaned,
        IsolationOutcome::Opaque(original) => {
            record.note_at(EventKey::InvalidIsolation, &original, position);
            record.isolation = original;
        }
        IsolationOutcome::Absent => record.note_at(EventKey::IsolationAbsent, token, position),
    }
}

fn assign_year(
    record: &mut StrainName,
    token: &str,
    position: usize,
    current_year: i32,
) -> bool {
    match normalize_year(token, current_year) {
        YearOutcome::Valid { year, remainder } => {
            record.year = year;
            if !remainder.is_empty() {
                record.extra = join_spaced(&record.extra, &remainder);
            }
            true
        }
        YearOutcome::Invalid => {
            record.note_at(EventKey::InvalidYear, token, position);
            false
        }
    }
}

/// A lone trailing token is either the year or the isolation.
fn year_or_isolation(record: &mut StrainName, token: &str, position: usize, current_year: i32) {
    match normalize_year(token, current_year) {
        YearOutcome::Valid { year, remainder } => {
            record.year = year;
            if !remainder.is_empty() {
                record.extra = join_spaced(&record.extra, &remainder);
            }
            record.note_at(EventKey::IsolationAbsent, "", position);
        }
        YearOutcome::Invalid => assign_isolation(record, token, position),
    }
}

/// Assign isolation and year from the tokens after the location.
///
/// Trailing tokens that carry more closers than openers are mis-split
/// bracketed annotations; they are peeled into `extra` before the year is
/// re-attempted, as is an unterminated bracket inside the year token
/// itself. Multiple middle tokens concatenate with hyphens.
fn assign_isolation_and_year(
    record: &mut StrainName,
    parts: &[String],
    first: usize,
    current_year: i32,
) {
    let mut end = parts.len();
    while end > first && has_excess_closers(parts[end - 1].trim()) {
        record.extra = join_spaced(&record.extra, parts[end - 1].trim());
        end -= 1;
    }
    if end == first {
        record.note(EventKey::IsolationAbsent, "");
        return;
    }

    let mut year_token = parts[end - 1].trim().to_string();
    if let Some(open) = unmatched_open_index(&year_token) {
        let annotation = year_token[open..].to_string();
        year_token.truncate(open);
        let year_head = year_token.trim_end().to_string();
        record.extra = join_spaced(&record.extra, &annotation);
        year_token = year_head;
    }

    if end - first == 1 {
        year_or_isolation(record, &year_token, end - 1, current_year);
        return;
    }

    let middle: Vec<&str> = parts[first..end - 1]
        .iter()
        .map(|part| part.trim())
        .collect();
    assign_isolation(record, &middle.join("-"), first);
    assign_year(record, &year_token, end - 1, current_year);
}

/// Longest proper gazetteer prefix of a token, at least three characters.
fn location_prefix(
    token: &str,
    adapter: &GazetteerAdapter<'_>,
) -> Option<(LocatedPart, String)> {
    let chars: Vec<char> = token.chars().collect();
    for len in (3..chars.len()).rev() {
        let prefix: String = chars[..len].iter().collect();
        if let LocationMatch::Found {
            name,
            country,
            continent,
        } = adapter.locate(&prefix)
        {
            let suffix: String = chars[len..].iter().collect();
            return Some((
                LocatedPart {
                    index: 1,
                    name,
                    country,
                    continent,
                },
                suffix,
            ));
        }
    }
    None
}

/// Byte index of the first opener that never closes.
fn unmatched_open_index(token: &str) -> Option<usize> {
    let mut stack: Vec<usize> = Vec::new();
    for (i, ch) in token.char_indices() {
        match ch {
            '(' => stack.push(i),
            ')' => {
                stack.pop();
            }
            _ => {}
        }
    }
    stack.first().copied()
}
