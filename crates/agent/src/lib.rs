//! `hostwatch-agent` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod auth;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod pipeline;
pub mod routes;
pub mod scheduler;
pub mod sink;
pub mod state;
