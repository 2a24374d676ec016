//! Rendering of normalized records and their diagnostics.

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use strain_model::StrainName;

/// Render a batch of records as an aligned table.
pub fn render_table(records: &[StrainName]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header([
            "Name",
            "Subtype",
            "Host",
            "Location",
            "Isolation",
            "Year",
            "Reassortant",
            "Passage",
            "Extra",
            "Complete",
        ]);
    for record in records {
        table.add_row([
            record.canonical_name(),
            record.subtype.clone(),
            record.host.clone(),
            record.location.clone(),
            record.isolation.clone(),
            record.year.clone(),
            record.reassortant.clone(),
            record.passage.clone(),
            record.extra.clone(),
            if record.is_complete() { "yes" } else { "NO" }.to_string(),
        ]);
    }
    table
}

/// Print the diagnostics of every record that has any.
pub fn print_diagnostics(records: &[StrainName]) {
    for record in records {
        if record.messages.is_empty() {
            continue;
        }
        println!("{}", record.raw);
        for event in &record.messages {
            println!("  {event}");
        }
    }
}

/// Counts for the batch summary line.
pub fn summarize(records: &[StrainName]) -> (usize, usize) {
    let complete = records.iter().filter(|r| r.is_complete()).count();
    (complete, records.len() - complete)
}
