//! Shared service plumbing: env config, tracing init, request ids and sea-orm helpers.

pub mod config;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
