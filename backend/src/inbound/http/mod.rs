//! HTTP inbound adapter exposing the search API.

pub mod error;
pub mod health;
pub mod schemas;
pub mod search;
pub mod state;

pub use error::ApiResult;
