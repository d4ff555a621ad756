//! Test utilities for Campus services.
//!
//! Provides `MockSession` for authenticated requests.
//! Import in `#[cfg(test)]` blocks only, never in production code.

pub mod auth;
