//! Translate a parsed SELECT statement into a search plan.

pub mod error;
pub mod helpers;
pub mod query;
