//! Translate SQL SELECT statements into search request documents.

pub mod convert;
pub mod dialect;
pub mod error;

pub use convert::{convert, convert_pretty, Converted};
pub use error::Error;
pub use es_sql_configuration as configuration;
