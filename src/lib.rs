//! Word lookup: one dictionary request and several lexical-relation requests
//! per word, fanned out concurrently and merged into a single view.

pub mod aggregator;
pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod render;
pub mod request;
pub mod schema;
pub mod session;
pub mod transport;
pub mod view;
pub mod word;

pub use aggregator::{AggregatedResult, ResultAggregator};
pub use config::LookupConfig;
pub use dispatcher::QueryDispatcher;
pub use engine::LookupEngine;
pub use error::{ErrorKind, LookupError, Result};
pub use word::Word;
