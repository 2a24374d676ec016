pub mod index;
pub mod loader;

pub use index::{GazetteerEntry, GazetteerIndex};
pub use loader::{GAZETTEER_DIR_ENV, load_builtin, load_default, load_from_dir};
