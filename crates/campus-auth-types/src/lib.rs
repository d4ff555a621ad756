//! Session token types shared by Campus services.
//!
//! Provides JWT issue/validation and the bearer-token `Session` extractor.

pub mod bearer;
pub mod token;
