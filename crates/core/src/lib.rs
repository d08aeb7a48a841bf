//! Host health domain logic.
//!
//! Everything in this crate is pure: payloads go in, typed samples and
//! classifications come out. HTTP transport, scheduling and presentation
//! live in `hostwatch-agent`.

pub mod aggregate;
pub mod alert;
pub mod endpoint;
pub mod error;
pub mod health;
pub mod report;
pub mod sample;
pub mod types;
