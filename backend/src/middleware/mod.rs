//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every endpoint, currently
//! trace correlation.

pub mod trace;

pub use trace::Trace;
