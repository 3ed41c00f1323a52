//! Handle the rendering of comparison values.

use query_engine_statement::statement::ast::{Expression, FunctionArgument, FunctionCall, Literal};

use crate::translation::error::{Error, FunctionPosition};
use crate::translation::helpers;

/// The column name that marks a field-existence check instead of a value.
pub const MISSING_SENTINEL: &str = "missing";

/// The right-hand side of a comparison, rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedValue {
    /// A scalar, as text without quotes.
    Text(String),
    /// A parenthesized list of literals.
    List(Vec<Literal>),
    /// The `missing` sentinel.
    Missing,
}

/// Render the right-hand side of a comparison.
pub fn render_value(value: &Expression) -> Result<RenderedValue, Error> {
    match value {
        Expression::Value(literal) => Ok(RenderedValue::Text(literal.to_text())),
        Expression::Tuple(items) => items
            .iter()
            .map(|item| match item {
                Expression::Value(literal) => Ok(literal.clone()),
                other => Err(Error::NotSupported(format!(
                    "non-literal list elements ({other})"
                ))),
            })
            .collect::<Result<Vec<_>, Error>>()
            .map(RenderedValue::List),
        Expression::ColumnReference(column)
            if column.0.len() == 1 && column.name().eq_ignore_ascii_case(MISSING_SENTINEL) =>
        {
            Ok(RenderedValue::Missing)
        }
        Expression::ColumnReference(column) => {
            Err(Error::ColumnOnRightHandSide(column.to_dotted()))
        }
        Expression::FunctionCall(function) if helpers::is_function(&function.name, "group_concat") => {
            render_group_concat(function).map(RenderedValue::Text)
        }
        Expression::FunctionCall(function) => Err(Error::UnknownFunction {
            position: FunctionPosition::Value,
            name: function.name.clone(),
        }),
        Expression::Nested(inner) => render_value(inner),
        other => Err(Error::NotSupported(format!("the comparison value {other}"))),
    }
}

/// `group_concat('%', 'abc', '%')` concatenates its literal arguments.
/// Anything beyond plain literals is MySQL's aggregate `GROUP_CONCAT`, which we do not support.
fn render_group_concat(function: &FunctionCall) -> Result<String, Error> {
    if function.distinct {
        return Err(Error::NotSupported("group_concat(DISTINCT ...)".to_string()));
    }
    function
        .args
        .iter()
        .map(|argument| match argument {
            FunctionArgument::Unnamed(Expression::Value(literal)) => Ok(literal.to_text()),
            other => Err(Error::NotSupported(format!(
                "group_concat over {other}"
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_engine_statement::statement::ast::ColumnName;

    fn string(s: &str) -> Expression {
        Expression::Value(Literal::String(s.to_string()))
    }

    #[test]
    fn it_renders_literals_as_text() {
        assert_eq!(
            render_value(&string("2015-01-01 00:00:00")),
            Ok(RenderedValue::Text("2015-01-01 00:00:00".to_string()))
        );
        assert_eq!(
            render_value(&Expression::Value(Literal::Number("1".to_string()))),
            Ok(RenderedValue::Text("1".to_string()))
        );
    }

    #[test]
    fn it_renders_tuples_as_lists() {
        let tuple = Expression::Tuple(vec![string("232"), string("323")]);
        assert_eq!(
            render_value(&tuple),
            Ok(RenderedValue::List(vec![
                Literal::String("232".to_string()),
                Literal::String("323".to_string())
            ]))
        );
    }

    #[test]
    fn it_recognizes_the_missing_sentinel() {
        let missing = Expression::ColumnReference(ColumnName::from_name("MISSING"));
        assert_eq!(render_value(&missing), Ok(RenderedValue::Missing));
    }

    #[test]
    fn it_rejects_other_columns() {
        let column = Expression::ColumnReference(ColumnName(vec![
            "a".to_string(),
            "missing".to_string(),
        ]));
        assert_eq!(
            render_value(&column),
            Err(Error::ColumnOnRightHandSide("a.missing".to_string()))
        );
    }

    #[test]
    fn it_concatenates_group_concat_literals() {
        let function = Expression::FunctionCall(FunctionCall {
            name: "group_concat".to_string(),
            args: vec![
                FunctionArgument::Unnamed(string("%")),
                FunctionArgument::Unnamed(string("abc")),
                FunctionArgument::Unnamed(string("%")),
            ],
            distinct: false,
        });
        assert_eq!(
            render_value(&function),
            Ok(RenderedValue::Text("%abc%".to_string()))
        );
    }

    #[test]
    fn it_rejects_aggregate_group_concat() {
        let function = Expression::FunctionCall(FunctionCall {
            name: "GROUP_CONCAT".to_string(),
            args: vec![FunctionArgument::Unnamed(Expression::ColumnReference(
                ColumnName::from_name("name"),
            ))],
            distinct: true,
        });
        assert!(render_value(&function).unwrap_err().is_unsupported());
    }

    #[test]
    fn it_rejects_other_functions() {
        let function = Expression::FunctionCall(FunctionCall {
            name: "now".to_string(),
            args: vec![],
            distinct: false,
        });
        assert_eq!(
            render_value(&function),
            Err(Error::UnknownFunction {
                position: FunctionPosition::Value,
                name: "now".to_string(),
            })
        );
    }
}
