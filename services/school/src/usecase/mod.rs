pub mod auth;
pub mod class;
pub mod report;
pub mod search;
