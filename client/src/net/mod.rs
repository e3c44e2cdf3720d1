//! Networking modules for the grants REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` builds typed calls, `transport` sends them, `error` classifies
//! failures, and `types` defines the shared wire schema.

pub mod api;
pub mod error;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
