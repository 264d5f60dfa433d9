//! Lookup configuration: service URLs, per-relation caps, and a few
//! behaviour switches. Defaults mirror the public services.

use crate::error::{LookupError, Result};
use crate::request::RelationKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/";
pub const DEFAULT_DATAMUSE_URL: &str = "https://api.datamuse.com/words";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    pub dictionary_url: String,
    pub datamuse_url: String,
    /// Auxiliary relations to dispatch, in display order.
    #[serde(default = "default_relations")]
    pub relations: Vec<RelationKind>,
    /// Overrides for the per-relation result caps.
    #[serde(default)]
    pub caps: BTreeMap<RelationKind, u32>,
    /// Per-request timeout. `None` leaves it to the HTTP client.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Show transport failures and missing words as different messages.
    #[serde(default)]
    pub precise_errors: bool,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_relations() -> Vec<RelationKind> {
    RelationKind::ALL.to_vec()
}

fn default_user_agent() -> String {
    format!("word-lookup/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            dictionary_url: DEFAULT_DICTIONARY_URL.to_string(),
            datamuse_url: DEFAULT_DATAMUSE_URL.to_string(),
            relations: default_relations(),
            caps: BTreeMap::new(),
            timeout_secs: None,
            precise_errors: false,
            user_agent: default_user_agent(),
        }
    }
}

impl LookupConfig {
    /// Load `.env` if present, then read `WORD_LOOKUP_*` variables on top of
    /// the defaults.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = var("WORD_LOOKUP_DICTIONARY_URL") {
            config.dictionary_url = url;
        }
        if let Some(url) = var("WORD_LOOKUP_DATAMUSE_URL") {
            config.datamuse_url = url;
        }
        if let Some(secs) = var("WORD_LOOKUP_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                LookupError::Config(format!("WORD_LOOKUP_TIMEOUT_SECS='{}': {}", secs, e))
            })?;
            config.timeout_secs = Some(secs);
        }
        if let Some(flag) = var("WORD_LOOKUP_PRECISE_ERRORS") {
            config.precise_errors = parse_flag(&flag)?;
        }
        if let Some(list) = var("WORD_LOOKUP_RELATIONS") {
            config.relations = parse_relations(&list)?;
        }
        if let Some(agent) = var("WORD_LOOKUP_USER_AGENT") {
            config.user_agent = agent;
        }

        Ok(config)
    }

    pub fn cap_for(&self, kind: RelationKind) -> u32 {
        self.caps.get(&kind).copied().unwrap_or_else(|| kind.default_cap())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Parse a comma-separated relation list; duplicates are dropped, order kept.
/// An empty list disables every auxiliary lookup.
pub fn parse_relations(list: &str) -> Result<Vec<RelationKind>> {
    let mut relations = Vec::new();
    for part in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if part.eq_ignore_ascii_case("all") {
            return Ok(default_relations());
        }
        let kind: RelationKind = part.parse()?;
        if !relations.contains(&kind) {
            relations.push(kind);
        }
    }
    Ok(relations)
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(LookupError::Config(format!("expected a boolean, got '{}'", other))),
    }
}
