//! Errors raised while parsing SQL text into a statement.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("SQL syntax error: {0}")]
    Syntax(#[from] sqlparser::parser::ParserError),
    #[error("Expected exactly one statement, found {0}.")]
    StatementCount(usize),
    #[error("Statements containing {0} are not supported.")]
    NotSupported(String),
    #[error("Invalid {clause} value '{value}': expected a non-negative integer.")]
    InvalidLimit { clause: &'static str, value: String },
}
