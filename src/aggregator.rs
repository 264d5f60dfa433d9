//! Result Aggregator
//!
//! Turns a settled outcome set into one `AggregatedResult` or one failure.
//! The dictionary outcome is required; every relation outcome is best-effort
//! and degrades to an empty list.

use crate::error::{LookupError, Result};
use crate::outcome::{LookupOutcome, OutcomeSet};
use crate::request::{Endpoint, RelationKind};
use crate::schema::{decode_primary, decode_related, DictionaryEntry, PrimaryPayload, RelatedWord};
use crate::word::Word;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Merged view of one successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedResult {
    pub word: Word,
    /// First homograph entry returned by the dictionary.
    pub entry: DictionaryEntry,
    /// Homograph entries beyond the first, which are not shown.
    pub additional_entries: usize,
    /// Decoded relation lists, one per dispatched relation. Failed lookups
    /// are present and empty.
    pub relations: BTreeMap<RelationKind, Vec<RelatedWord>>,
    /// Relations whose lookup failed or could not be decoded.
    pub degraded: Vec<RelationKind>,
}

impl AggregatedResult {
    pub fn related(&self, kind: RelationKind) -> &[RelatedWord] {
        self.relations.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Corpus frequency of the word, if the frequency lookup produced one.
    pub fn frequency(&self) -> Option<f64> {
        self.related(RelationKind::Frequency)
            .first()
            .and_then(RelatedWord::frequency)
    }
}

pub struct ResultAggregator;

impl ResultAggregator {
    pub fn aggregate(word: &Word, outcomes: OutcomeSet) -> Result<AggregatedResult> {
        let payload = match outcomes.primary {
            LookupOutcome::Success(value) => value,
            LookupOutcome::Failure(reason) => {
                return Err(LookupError::transport(Endpoint::Dictionary.to_string(), reason));
            }
        };

        let (entry, additional_entries) = match decode_primary(&payload)? {
            PrimaryPayload::Entry { first, additional } => (first, additional),
            PrimaryPayload::NotFound(_) => {
                return Err(LookupError::NotFound(word.to_string()));
            }
        };
        if additional_entries > 0 {
            debug!("'{}' has {} more entries; using the first", word, additional_entries);
        }

        let mut relations = BTreeMap::new();
        let mut degraded = Vec::new();
        for settled in outcomes.auxiliary {
            let Endpoint::Relation(kind) = settled.endpoint else {
                continue;
            };
            let words = match &settled.outcome {
                LookupOutcome::Success(value) => match decode_related(value) {
                    Ok(words) => words,
                    Err(e) => {
                        warn!("Ignoring {} results for '{}': {}", kind, word, e);
                        degraded.push(kind);
                        Vec::new()
                    }
                },
                LookupOutcome::Failure(reason) => {
                    warn!("{} lookup for '{}' failed: {}", kind, word, reason);
                    degraded.push(kind);
                    Vec::new()
                }
            };
            relations.insert(kind, words);
        }

        Ok(AggregatedResult {
            word: word.clone(),
            entry,
            additional_entries,
            relations,
            degraded,
        })
    }
}
