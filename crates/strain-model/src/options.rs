//! Configuration options for name normalization.

use serde::{Deserialize, Serialize};

/// Options controlling a single `normalize` call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Emit an `empty-name` diagnostic when the input is empty.
    /// Default: false.
    pub warn_on_empty: bool,

    /// Attempt passage-history extraction from leftover text.
    /// Default: true.
    pub extract_passage: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            warn_on_empty: false,
            extract_passage: true,
        }
    }
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_warn_on_empty(mut self, enable: bool) -> Self {
        self.warn_on_empty = enable;
        self
    }

    pub fn with_extract_passage(mut self, enable: bool) -> Self {
        self.extract_passage = enable;
        self
    }
}
