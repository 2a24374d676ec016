pub mod diagnostics;
pub mod error;
pub mod lookup;
pub mod options;
pub mod record;

pub use diagnostics::{EventKey, EventLog, ParseEvent};
pub use error::{Result, StrainError};
pub use lookup::{Gazetteer, LocationMatch};
pub use options::NormalizeOptions;
pub use record::StrainName;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes() {
        let mut record = StrainName::new("A/SINGAPORE/19/2016");
        record.subtype = "A".to_string();
        record.note(EventKey::InvalidYear, "20166");

        let json = serde_json::to_string(&record).expect("serialize record");
        let round: StrainName = serde_json::from_str(&json).expect("deserialize record");
        assert_eq!(round.raw, "A/SINGAPORE/19/2016");
        assert!(round.messages.contains(EventKey::InvalidYear));
    }

    #[test]
    fn options_builders() {
        let options = NormalizeOptions::new()
            .with_warn_on_empty(true)
            .with_extract_passage(false);
        assert!(options.warn_on_empty);
        assert!(!options.extract_passage);
    }
}
