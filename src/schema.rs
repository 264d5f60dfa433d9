//! Response shapes of the two upstream services, decoded at the boundary.
//!
//! Required fields are plain types; everything the services omit for some
//! words is `Option` or defaults to empty.

use crate::error::{LookupError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title the dictionary service puts on its "no entry" object.
pub const NOT_FOUND_TITLE: &str = "No Definitions Found";

/// One homograph entry from the dictionary service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
    #[serde(default)]
    pub source_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phonetic {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

/// The object returned in place of an entry list when the word is unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotFoundPayload {
    pub title: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
}

/// A word from the lexical-relations service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedWord {
    pub word: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RelatedWord {
    /// Corpus frequency from an `f:<value>` tag, in occurrences per million.
    pub fn frequency(&self) -> Option<f64> {
        self.tags
            .iter()
            .find_map(|tag| tag.strip_prefix("f:"))
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
    }
}

/// What the primary service said about a word.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryPayload {
    /// The first homograph, plus how many entries followed it.
    Entry {
        first: DictionaryEntry,
        additional: usize,
    },
    NotFound(Option<NotFoundPayload>),
}

/// Classify and decode a primary payload.
///
/// Only the first element of an entry list is decoded; the rest are counted
/// and never read, so a malformed trailing homograph cannot fail the lookup.
/// The sentinel object or an empty list is `NotFound`. Anything else is a
/// decode error.
pub fn decode_primary(value: &Value) -> Result<PrimaryPayload> {
    match value {
        Value::Array(items) => match items.split_first() {
            None => Ok(PrimaryPayload::NotFound(None)),
            Some((first, rest)) => {
                let first: DictionaryEntry = serde_json::from_value(first.clone())
                    .map_err(|e| LookupError::Decode(format!("dictionary entry: {}", e)))?;
                Ok(PrimaryPayload::Entry {
                    first,
                    additional: rest.len(),
                })
            }
        },
        Value::Object(map) if map.get("title").and_then(Value::as_str) == Some(NOT_FOUND_TITLE) => {
            let payload: NotFoundPayload = serde_json::from_value(value.clone())
                .map_err(|e| LookupError::Decode(format!("not-found payload: {}", e)))?;
            Ok(PrimaryPayload::NotFound(Some(payload)))
        }
        other => Err(LookupError::Decode(format!(
            "unexpected dictionary payload: {}",
            describe(other)
        ))),
    }
}

/// Decode a lexical-relations list.
pub fn decode_related(value: &Value) -> Result<Vec<RelatedWord>> {
    serde_json::from_value(value.clone())
        .map_err(|e| LookupError::Decode(format!("related words: {}", e)))
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(_) => "array".to_string(),
        Value::Object(map) => match map.get("title").and_then(Value::as_str) {
            Some(title) => format!("object titled '{}'", title),
            None => "object".to_string(),
        },
    }
}
