//! pressline-core
//!
//! The document request model and its boundary validation.
//! No HTTP or PDF dependency: this is the shared vocabulary of the service.

pub mod error;
pub mod models;
