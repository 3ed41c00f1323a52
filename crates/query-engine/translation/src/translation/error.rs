//! Errors for query translation.

use std::fmt;

/// A type for translation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    NoFromTarget,
    MultipleFromTargets(usize),
    /// An aggregate function in the select list of a query without GROUP BY.
    AggregateWithoutGroupBy(String),
    EmptyGroupBy,
    ComparisonLeftNotColumn(String),
    ColumnOnRightHandSide(String),
    NotSupported(String),
    UnknownFunction {
        position: FunctionPosition,
        name: String,
    },
    InvalidArity {
        function: String,
        expected: &'static str,
        found: usize,
    },
    UnknownParameter {
        function: String,
        parameter: String,
    },
    DuplicateParameter {
        function: String,
        parameter: String,
    },
    MissingParameter {
        function: String,
        parameter: &'static str,
    },
    MalformedParameter {
        function: String,
        argument: String,
    },
    InvalidValue {
        operator: String,
        reason: &'static str,
    },
}

/// Where a function call appeared in the statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionPosition {
    Where,
    GroupBy,
    /// The right-hand side of a comparison.
    Value,
}

impl Error {
    /// Whether the statement is well formed but uses a construct we cannot express.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Error::NotSupported(_)
                | Error::ColumnOnRightHandSide(_)
                | Error::UnknownFunction { .. }
                | Error::InvalidArity { .. }
        )
    }
}

/// Display errors.
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NoFromTarget => write!(f, "A FROM clause is required."),
            Error::MultipleFromTargets(count) => write!(
                f,
                "Multiple FROM targets are not supported (found {count})."
            ),
            Error::AggregateWithoutGroupBy(function) => write!(
                f,
                "Aggregate function '{function}' requires a GROUP BY clause."
            ),
            Error::EmptyGroupBy => write!(f, "Aggregations need at least one GROUP BY key."),
            Error::ComparisonLeftNotColumn(expression) => write!(
                f,
                "The left of a comparison must be a column name, found '{expression}'."
            ),
            Error::ColumnOnRightHandSide(column) => write!(
                f,
                "Column '{column}' on the right side of a comparison is not supported."
            ),
            Error::NotSupported(thing) => {
                write!(f, "Queries containing {thing} are not supported.")
            }
            Error::UnknownFunction { position, name } => {
                write!(f, "Function '{name}' is not supported {position}.")
            }
            Error::InvalidArity {
                function,
                expected,
                found,
            } => write!(
                f,
                "Function '{function}' takes {expected} arguments, found {found}."
            ),
            Error::UnknownParameter {
                function,
                parameter,
            } => write!(f, "Unknown parameter '{parameter}' for '{function}'."),
            Error::DuplicateParameter {
                function,
                parameter,
            } => write!(f, "Parameter '{parameter}' given twice to '{function}'."),
            Error::MissingParameter {
                function,
                parameter,
            } => write!(f, "Parameter '{parameter}' is required by '{function}'."),
            Error::MalformedParameter { function, argument } => write!(
                f,
                "Parameters of '{function}' must look like name = 'value', found '{argument}'."
            ),
            Error::InvalidValue { operator, reason } => {
                write!(f, "Invalid value for '{operator}': {reason}.")
            }
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Display for FunctionPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FunctionPosition::Where => write!(f, "in WHERE"),
            FunctionPosition::GroupBy => write!(f, "in GROUP BY"),
            FunctionPosition::Value => write!(f, "as a comparison value"),
        }
    }
}
