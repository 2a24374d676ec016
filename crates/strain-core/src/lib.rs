mod cleanup;
mod disambiguate;
pub mod fields;
pub mod host;
pub mod lookup;
pub mod passage;
pub mod pipeline;
pub mod reassortant;
pub mod subtype;
pub mod text_utils;

pub use host::{HOST_VOCABULARY, correct_host_spelling, is_known_host};
pub use lookup::GazetteerAdapter;
pub use passage::{
    PassageCategory, classify_passage, is_cell, is_egg, parse_passage, without_date,
};
pub use pipeline::Normalizer;
pub use reassortant::parse_reassortant;
pub use subtype::normalize_subtype;
