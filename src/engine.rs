//! Lookup Engine: normalize → dispatch → aggregate.

use crate::aggregator::{AggregatedResult, ResultAggregator};
use crate::config::LookupConfig;
use crate::dispatcher::QueryDispatcher;
use crate::error::Result;
use crate::transport::{HttpTransport, LexicalTransport};
use crate::word::Word;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct LookupEngine {
    dispatcher: QueryDispatcher,
    config: Arc<LookupConfig>,
}

impl LookupEngine {
    pub fn new(config: LookupConfig, transport: Arc<dyn LexicalTransport>) -> Self {
        let config = Arc::new(config);
        Self {
            dispatcher: QueryDispatcher::new(transport, Arc::clone(&config)),
            config,
        }
    }

    /// Engine talking to the configured services over HTTP.
    pub fn http(config: LookupConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Look up raw user input. Blank input fails before anything is sent.
    pub async fn lookup(&self, raw: &str) -> Result<AggregatedResult> {
        let word = Word::parse(raw)?;
        self.lookup_word(&word).await
    }

    pub async fn lookup_word(&self, word: &Word) -> Result<AggregatedResult> {
        let outcomes = self.dispatcher.dispatch(word).await?;
        let result = ResultAggregator::aggregate(word, outcomes)?;
        info!(
            "Lookup for '{}' complete: {} meanings, {} degraded relations",
            word,
            result.entry.meanings.len(),
            result.degraded.len()
        );
        Ok(result)
    }
}
