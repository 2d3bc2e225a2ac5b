//! Project tracker API server library.
//!
//! Exposes the building blocks (config, state, cache, error handling,
//! routes) so integration tests and the binary entrypoint can both access
//! them.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod report;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
