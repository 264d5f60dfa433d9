//! Lookup requests: which endpoint, which URL, and whether the result is
//! required for the query to succeed.

use crate::error::{LookupError, Result};
use crate::word::Word;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relation queries sent to the lexical-relations service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Synonym,
    Related,
    Rhyme,
    Frequency,
    SoundsLike,
}

impl RelationKind {
    pub const ALL: [RelationKind; 5] = [
        RelationKind::Synonym,
        RelationKind::Related,
        RelationKind::Rhyme,
        RelationKind::Frequency,
        RelationKind::SoundsLike,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RelationKind::Synonym => "synonym",
            RelationKind::Related => "related",
            RelationKind::Rhyme => "rhyme",
            RelationKind::Frequency => "frequency",
            RelationKind::SoundsLike => "sounds_like",
        }
    }

    /// Service-side result cap used unless configured otherwise.
    pub fn default_cap(self) -> u32 {
        match self {
            RelationKind::Synonym => 50,
            RelationKind::Related => 50,
            RelationKind::Rhyme => 30,
            RelationKind::Frequency => 1,
            RelationKind::SoundsLike => 30,
        }
    }

    /// Query parameters for this relation, excluding `max`.
    fn query_pairs(self, word: &Word) -> Vec<(&'static str, String)> {
        let word = word.as_str().to_string();
        match self {
            RelationKind::Synonym => vec![("rel_syn", word)],
            RelationKind::Related => vec![("ml", word)],
            RelationKind::Rhyme => vec![("rel_rhy", word)],
            // Spelled-like search on the exact word, asking for frequency metadata.
            RelationKind::Frequency => vec![("sp", word), ("md", "f".to_string())],
            RelationKind::SoundsLike => vec![("sl", word)],
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RelationKind {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "synonym" | "synonyms" | "syn" => Ok(RelationKind::Synonym),
            "related" | "means_like" | "ml" => Ok(RelationKind::Related),
            "rhyme" | "rhymes" => Ok(RelationKind::Rhyme),
            "frequency" | "freq" => Ok(RelationKind::Frequency),
            "sounds_like" | "soundslike" | "sl" => Ok(RelationKind::SoundsLike),
            other => Err(LookupError::Config(format!("unknown relation '{}'", other))),
        }
    }
}

/// Identifies the endpoint a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Dictionary,
    Relation(RelationKind),
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Dictionary => f.write_str("dictionary"),
            Endpoint::Relation(kind) => write!(f, "{}", kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    endpoint: Endpoint,
    url: Url,
    authoritative: bool,
}

impl LookupRequest {
    /// Primary dictionary lookup by exact word.
    pub fn dictionary(base_url: &str, word: &Word) -> Result<Self> {
        let mut url = parse_base(base_url)?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Config(format!("'{}' cannot be a base URL", base_url)))?
            .pop_if_empty()
            .push(word.as_str());
        Ok(Self {
            endpoint: Endpoint::Dictionary,
            url,
            authoritative: true,
        })
    }

    /// Auxiliary lexical-relations query capped at `cap` results.
    pub fn relation(base_url: &str, kind: RelationKind, word: &Word, cap: u32) -> Result<Self> {
        let mut url = parse_base(base_url)?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in kind.query_pairs(word) {
                query.append_pair(key, &value);
            }
            query.append_pair("max", &cap.to_string());
        }
        Ok(Self {
            endpoint: Endpoint::Relation(kind),
            url,
            authoritative: false,
        })
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn is_authoritative(&self) -> bool {
        self.authoritative
    }
}

fn parse_base(base_url: &str) -> Result<Url> {
    Url::parse(base_url)
        .map_err(|e| LookupError::Config(format!("invalid service URL '{}': {}", base_url, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DICT: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/";
    const MUSE: &str = "https://api.datamuse.com/words";

    #[test]
    fn test_dictionary_url_appends_word() {
        let word = Word::parse("hello").unwrap();
        let req = LookupRequest::dictionary(DICT, &word).unwrap();
        assert_eq!(
            req.url().as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/hello"
        );
        assert!(req.is_authoritative());
        assert_eq!(req.endpoint(), Endpoint::Dictionary);
    }

    #[test]
    fn test_dictionary_url_without_trailing_slash() {
        let word = Word::parse("hello").unwrap();
        let req = LookupRequest::dictionary("http://127.0.0.1:9/entries/en", &word).unwrap();
        assert_eq!(req.url().as_str(), "http://127.0.0.1:9/entries/en/hello");
    }

    #[test]
    fn test_word_is_percent_encoded() {
        let word = Word::parse("ice cream").unwrap();
        let req = LookupRequest::dictionary(DICT, &word).unwrap();
        assert!(req.url().as_str().ends_with("/ice%20cream"));
    }

    #[test]
    fn test_relation_queries() {
        let word = Word::parse("run").unwrap();
        let cases = [
            (RelationKind::Synonym, "rel_syn=run&max=50"),
            (RelationKind::Related, "ml=run&max=50"),
            (RelationKind::Rhyme, "rel_rhy=run&max=30"),
            (RelationKind::Frequency, "sp=run&md=f&max=1"),
            (RelationKind::SoundsLike, "sl=run&max=30"),
        ];
        for (kind, query) in cases {
            let req = LookupRequest::relation(MUSE, kind, &word, kind.default_cap()).unwrap();
            assert_eq!(req.url().query(), Some(query), "{}", kind);
            assert!(!req.is_authoritative());
            assert_eq!(req.endpoint(), Endpoint::Relation(kind));
        }
    }

    #[test]
    fn test_relation_names_parse_back() {
        for kind in RelationKind::ALL {
            assert_eq!(kind.name().parse::<RelationKind>().unwrap(), kind);
        }
        assert_eq!("sounds-like".parse::<RelationKind>().unwrap(), RelationKind::SoundsLike);
        assert!("antonym".parse::<RelationKind>().is_err());
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let word = Word::parse("run").unwrap();
        let err = LookupRequest::dictionary("not a url", &word).unwrap_err();
        assert!(matches!(err, LookupError::Config(_)));
    }
}
