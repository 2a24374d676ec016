//! Subcommand implementations.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use tracing::info;

use strain_core::{Normalizer, parse_passage, parse_reassortant};
use strain_model::{NormalizeOptions, StrainName};

use crate::cli::{NormalizeArgs, OutputFormat, TextArgs};
use crate::report::{print_diagnostics, render_table, summarize};

/// Normalize a batch of names. Returns whether any record came back
/// incomplete, which drives the process exit code.
pub fn run_normalize(args: &NormalizeArgs) -> Result<bool> {
    let gazetteer = strain_gazetteer::load_default().context("loading gazetteer")?;
    let normalizer = Normalizer::new(&gazetteer);
    let options = NormalizeOptions::new()
        .with_warn_on_empty(args.warn_on_empty)
        .with_extract_passage(!args.no_passage);

    let names = collect_names(args)?;
    let records: Vec<StrainName> = names
        .iter()
        .map(|name| normalizer.normalize(name, &options))
        .collect();

    match args.format {
        OutputFormat::Table => {
            println!("{}", render_table(&records));
            print_diagnostics(&records);
        }
        OutputFormat::Json => {
            for record in &records {
                println!("{}", serde_json::to_string(record)?);
            }
        }
        OutputFormat::Line => {
            for record in &records {
                println!("{} -> {}", record.raw, record.canonical_name());
            }
        }
    }

    let (complete, incomplete) = summarize(&records);
    info!(complete, incomplete, "normalized {} names", records.len());
    Ok(incomplete > 0)
}

fn collect_names(args: &NormalizeArgs) -> Result<Vec<String>> {
    let mut names = args.names.clone();
    if let Some(path) = &args.input {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        names.extend(content.lines().map(str::to_string));
    }
    if names.is_empty() {
        for line in io::stdin().lock().lines() {
            names.push(line.context("reading stdin")?);
        }
    }
    names.retain(|name| !name.trim().is_empty());
    Ok(names)
}

pub fn run_passage(args: &TextArgs) -> Result<()> {
    let (canonical, unrecognized) = parse_passage(&args.text);
    if canonical.is_empty() {
        println!("unrecognized: {unrecognized}");
    } else {
        println!("{canonical}");
    }
    Ok(())
}

pub fn run_reassortant(args: &TextArgs) -> Result<()> {
    let (code, remaining) = parse_reassortant(&args.text);
    if code.is_empty() {
        println!("no reassortant code found");
    } else if remaining.is_empty() {
        println!("{code}");
    } else {
        println!("{code} (remaining: {remaining})");
    }
    Ok(())
}
