//! Normalized query word.

use crate::error::{LookupError, Result};
use serde::Serialize;
use std::fmt;

/// A trimmed, lowercased, non-empty word. The only way into the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    /// Trim and lowercase raw user input, rejecting blank strings before any
    /// request is built.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(LookupError::InvalidInput(
                "Please enter a word to search.".to_string(),
            ));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
