//! Settled result of one dispatched request.

use crate::request::Endpoint;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum LookupOutcome {
    Success(Value),
    Failure(String),
}

impl LookupOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LookupOutcome::Success(_))
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            LookupOutcome::Success(_) => None,
            LookupOutcome::Failure(reason) => Some(reason),
        }
    }
}

/// An outcome tagged with the endpoint that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct SettledLookup {
    pub endpoint: Endpoint,
    pub outcome: LookupOutcome,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Every outcome for one query: the primary plus one per auxiliary request,
/// in dispatch order.
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeSet {
    pub primary: LookupOutcome,
    pub auxiliary: Vec<SettledLookup>,
}

impl OutcomeSet {
    pub fn request_count(&self) -> usize {
        1 + self.auxiliary.len()
    }
}
