//! Errors returned by a conversion.

use query_engine_translation::translation;

/// Why a statement could not be converted.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] query_engine_statement::Error),

    #[error(transparent)]
    Translation(#[from] translation::error::Error),

    /// Only SELECT statements can be converted.
    #[error("{} statements are not supported.", .0.to_uppercase())]
    NotSupported(String),
}

impl Error {
    /// Whether the statement was understood but uses something we cannot express.
    pub fn is_unsupported(&self) -> bool {
        match self {
            Error::Parse(query_engine_statement::Error::NotSupported(_)) | Error::NotSupported(_) => {
                true
            }
            Error::Parse(_) => false,
            Error::Translation(err) => err.is_unsupported(),
        }
    }
}
