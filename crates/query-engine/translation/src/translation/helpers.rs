//! Shared helpers for the translation of statement parts.

use std::str::FromStr;

use query_engine_dsl::dsl::ast::Term;
use query_engine_statement::statement::ast::{
    ComparisonOperator, Expression, FunctionArgument, Literal,
};

use super::error::Error;

/// Split a parameter of a named-parameter function such as `date_histogram`
/// into its name and value. Accepts `name = value` and `name => value`.
pub fn named_parameter<'a>(
    function: &str,
    argument: &'a FunctionArgument,
) -> Result<(&'a str, &'a Expression), Error> {
    match argument {
        FunctionArgument::Named { name, value } => Ok((name.as_str(), value)),
        FunctionArgument::Unnamed(Expression::Comparison {
            left,
            operator: ComparisonOperator::Equal,
            right,
        }) => match left.as_ref() {
            Expression::ColumnReference(column) if column.0.len() == 1 => {
                Ok((column.name(), right.as_ref()))
            }
            _ => Err(malformed(function, argument)),
        },
        _ => Err(malformed(function, argument)),
    }
}

/// The text of a parameter value: a literal without its quotes,
/// or a bare identifier as written.
pub fn parameter_text(function: &str, value: &Expression) -> Result<String, Error> {
    match value {
        Expression::Value(literal) => Ok(literal.to_text()),
        Expression::ColumnReference(column) => Ok(column.to_dotted()),
        other => Err(Error::MalformedParameter {
            function: function.to_string(),
            argument: other.to_string(),
        }),
    }
}

fn malformed(function: &str, argument: &FunctionArgument) -> Error {
    Error::MalformedParameter {
        function: function.to_string(),
        argument: argument.to_string(),
    }
}

/// Convert a literal into a `terms` value, keeping numbers as numbers.
pub fn literal_to_term(literal: &Literal) -> Term {
    match literal {
        Literal::String(s) => Term::String(s.clone()),
        Literal::Number(n) => match serde_json::Number::from_str(n) {
            Ok(number) => Term::Number(number),
            Err(_) => Term::String(n.clone()),
        },
        Literal::Boolean(b) => Term::Bool(*b),
        Literal::Null => Term::Null,
    }
}

/// Case-insensitive match of a function name.
pub fn is_function(name: &str, expected: &str) -> bool {
    name.eq_ignore_ascii_case(expected)
}
