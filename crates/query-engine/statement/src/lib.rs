pub mod statement;

pub use statement::error::Error;
pub use statement::parse::{parse, parse_with_dialect};
