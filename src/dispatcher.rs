//! Query Dispatcher
//!
//! Fans one word out to the dictionary and the lexical-relations service and
//! waits until every request has settled. A failed or slow request never
//! fails or cancels the others.

use crate::config::LookupConfig;
use crate::error::{LookupError, Result};
use crate::outcome::{LookupOutcome, OutcomeSet, SettledLookup};
use crate::request::{Endpoint, LookupRequest};
use crate::transport::LexicalTransport;
use crate::word::Word;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Requests for one word: the authoritative lookup plus the auxiliaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchPlan {
    pub primary: LookupRequest,
    pub auxiliary: Vec<LookupRequest>,
}

impl DispatchPlan {
    pub fn request_count(&self) -> usize {
        1 + self.auxiliary.len()
    }
}

#[derive(Clone)]
pub struct QueryDispatcher {
    transport: Arc<dyn LexicalTransport>,
    config: Arc<LookupConfig>,
}

impl QueryDispatcher {
    pub fn new(transport: Arc<dyn LexicalTransport>, config: Arc<LookupConfig>) -> Self {
        Self { transport, config }
    }

    /// Build the requests for `word`: the dictionary lookup, then one request
    /// per enabled relation in configured order.
    pub fn plan(&self, word: &Word) -> Result<DispatchPlan> {
        let primary = LookupRequest::dictionary(&self.config.dictionary_url, word)?;
        let auxiliary = self
            .config
            .relations
            .iter()
            .map(|&kind| {
                LookupRequest::relation(
                    &self.config.datamuse_url,
                    kind,
                    word,
                    self.config.cap_for(kind),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(DispatchPlan { primary, auxiliary })
    }

    /// Issue every planned request concurrently and return once all have
    /// settled. Only planning errors (bad configuration) are returned as
    /// `Err`; request failures become `Failure` outcomes.
    pub async fn dispatch(&self, word: &Word) -> Result<OutcomeSet> {
        let plan = self.plan(word)?;
        info!(
            "Dispatching {} lookups for '{}' via {}",
            plan.request_count(),
            word,
            self.transport.name()
        );

        // Spawn all requests before awaiting any of them
        let primary = self.spawn_lookup(plan.primary);
        let auxiliary: Vec<_> = plan
            .auxiliary
            .into_iter()
            .map(|request| self.spawn_lookup(request))
            .collect();

        let primary = settle(primary).await;
        let mut settled = Vec::with_capacity(auxiliary.len());
        for pending in auxiliary {
            settled.push(settle(pending).await);
        }

        Ok(OutcomeSet {
            primary: primary.outcome,
            auxiliary: settled,
        })
    }

    fn spawn_lookup(&self, request: LookupRequest) -> PendingLookup {
        let transport = Arc::clone(&self.transport);
        let endpoint = request.endpoint();
        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let outcome = match transport.fetch_json(&request).await {
                Ok(value) => LookupOutcome::Success(value),
                // The endpoint is recorded on the settled lookup already.
                Err(LookupError::Transport { message, .. }) => LookupOutcome::Failure(message),
                Err(e) => LookupOutcome::Failure(e.to_string()),
            };
            SettledLookup {
                endpoint: request.endpoint(),
                outcome,
                elapsed: started.elapsed(),
            }
        });
        PendingLookup { endpoint, handle }
    }
}

struct PendingLookup {
    endpoint: Endpoint,
    handle: JoinHandle<SettledLookup>,
}

async fn settle(pending: PendingLookup) -> SettledLookup {
    let lookup = match pending.handle.await {
        Ok(lookup) => lookup,
        Err(e) => SettledLookup {
            endpoint: pending.endpoint,
            outcome: LookupOutcome::Failure(format!("lookup task failed: {}", e)),
            elapsed: Duration::ZERO,
        },
    };
    debug!(
        "{} settled in {:?}: {}",
        lookup.endpoint,
        lookup.elapsed,
        if lookup.outcome.is_success() { "ok" } else { "failed" }
    );
    lookup
}
