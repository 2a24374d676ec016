//! Gazetteer loading.
//!
//! The crate ships a built-in seed table; production deployments point
//! `STRAIN_GAZETTEER_DIR` at a directory of `*.csv` files with
//! `name,country,continent` columns, which replaces the seed data.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use crate::index::GazetteerIndex;

/// Seed table compiled into the crate.
const BUILTIN_LOCATIONS: &str = include_str!("../data/locations.csv");

/// Environment variable overriding the gazetteer data directory.
pub const GAZETTEER_DIR_ENV: &str = "STRAIN_GAZETTEER_DIR";

/// Load the gazetteer: the `STRAIN_GAZETTEER_DIR` directory when set,
/// otherwise the built-in seed table.
pub fn load_default() -> Result<GazetteerIndex> {
    if let Ok(root) = std::env::var(GAZETTEER_DIR_ENV) {
        return load_from_dir(PathBuf::from(root).as_path());
    }
    load_builtin()
}

/// Load the built-in seed table.
pub fn load_builtin() -> Result<GazetteerIndex> {
    let mut index = GazetteerIndex::new();
    read_into(&mut index, BUILTIN_LOCATIONS.as_bytes()).context("built-in location table")?;
    Ok(index)
}

/// Load every `*.csv` file in a directory into one index.
pub fn load_from_dir(dir: &Path) -> Result<GazetteerIndex> {
    let mut index = GazetteerIndex::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("reading gazetteer directory {}", dir.display()))?
    {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
            continue;
        }
        let file = std::fs::File::open(&path)
            .with_context(|| format!("opening {}", path.display()))?;
        read_into(&mut index, file).with_context(|| format!("parsing {}", path.display()))?;
    }
    anyhow::ensure!(!index.is_empty(), "no gazetteer rows in {}", dir.display());
    Ok(index)
}

fn read_into<R: std::io::Read>(index: &mut GazetteerIndex, reader: R) -> Result<()> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    for row in csv_reader.records() {
        let row = row?;
        let name = row.get(0).unwrap_or("");
        let country = row.get(1).unwrap_or("");
        let continent = row.get(2).unwrap_or("");
        if name.trim().is_empty() {
            continue;
        }
        index.insert(name, country, continent);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strain_model::{Gazetteer, LocationMatch};

    #[test]
    fn builtin_table_loads() {
        let index = load_builtin().expect("builtin gazetteer");
        assert!(index.len() > 50);

        match index.lookup("SINGAPORE") {
            LocationMatch::Found {
                country, continent, ..
            } => {
                assert_eq!(country, "SINGAPORE");
                assert_eq!(continent, "ASIA");
            }
            other => panic!("unexpected lookup result: {other:?}"),
        }
    }

    #[test]
    fn builtin_table_covers_abbreviation_targets() {
        let index = load_builtin().expect("builtin gazetteer");
        for name in ["UNITED KINGDOM", "NEW YORK", "HONG KONG", "GERMANY", "TEXAS"] {
            assert!(index.lookup(name).is_found(), "missing {name}");
        }
    }
}
