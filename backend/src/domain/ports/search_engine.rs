//! Driven port for the geocoding engine that answers validated searches.
//!
//! The engine owns indexing, ranking and localisation of result content.
//! Hits cross this boundary as opaque JSON documents so the request layer
//! never depends on an engine's result model.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::SearchRequest;

use super::define_port_error;

define_port_error! {
    /// Errors raised by search engine adapters.
    pub enum SearchEngineError {
        /// The engine could not be reached or timed out.
        Unavailable { message: String } =>
            "search engine is unavailable: {message}",
        /// The engine accepted the request but failed to answer it.
        Query { message: String } =>
            "search engine query failed: {message}",
    }
}

/// Port for executing validated search requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Return at most `request.limit()` hits, best match first.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Value>, SearchEngineError>;
}

/// Fixture engine with an empty index, used until a real engine is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSearchEngine;

#[async_trait]
impl SearchEngine for FixtureSearchEngine {
    async fn search(&self, _request: &SearchRequest) -> Result<Vec<Value>, SearchEngineError> {
        Ok(Vec::new())
    }
}
