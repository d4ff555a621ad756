//! Domain types shared across Campus crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Used by every layer of the school service.

pub mod pagination;
pub mod role;
