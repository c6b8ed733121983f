//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod search_engine;

#[cfg(test)]
pub use search_engine::MockSearchEngine;
pub use search_engine::{FixtureSearchEngine, SearchEngine, SearchEngineError};
