//! Handle filtering/where clauses translation.
//!
//! A WHERE expression is translated bottom-up. AND and OR chains are flattened:
//! a conjunction whose parent is also a conjunction hands its clauses up
//! unwrapped, so `a AND b AND c` becomes a single `bool.must` with three clauses.
//! Parentheses do not break a chain, and AND never merges with OR.

use query_engine_dsl::dsl::ast::{Query, RangeBound, Term};
use query_engine_dsl::dsl::helpers;
use query_engine_statement::statement::ast::{
    ColumnName, ComparisonOperator, Expression, FunctionCall,
};

use super::values::{self, RenderedValue};
use crate::translation::error::{Error, FunctionPosition};
use crate::translation::helpers as translation_helpers;

/// The kind of chain an expression is a member of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentKind {
    Conjunction,
    Disjunction,
}

/// Translate an optional WHERE clause into the request's query.
pub fn translate_where(selection: Option<&Expression>) -> Result<Query, Error> {
    selection.map_or_else(|| Ok(helpers::match_all_query()), translate_root)
}

/// The root of a WHERE clause is always a single `bool` query.
fn translate_root(expression: &Expression) -> Result<Query, Error> {
    match expression {
        Expression::And { left, right } => {
            translate_chain(left, right, ParentKind::Conjunction).map(helpers::bool_must)
        }
        Expression::Or { left, right } => {
            translate_chain(left, right, ParentKind::Disjunction).map(helpers::bool_should)
        }
        Expression::Nested(inner) => translate_root(inner),
        leaf => translate_leaf(leaf).map(|clause| helpers::bool_must(vec![clause])),
    }
}

/// Translate a member of an AND/OR chain into one or more clauses.
///
/// An AND (OR) whose parent is itself an AND (OR) returns its clauses
/// unwrapped, and the parent splices them into its own clause list.
pub fn translate_expression(
    expression: &Expression,
    parent: ParentKind,
) -> Result<Vec<Query>, Error> {
    match expression {
        Expression::And { left, right } => {
            let clauses = translate_chain(left, right, ParentKind::Conjunction)?;
            if parent == ParentKind::Conjunction {
                Ok(clauses)
            } else {
                Ok(vec![helpers::bool_must(clauses)])
            }
        }
        Expression::Or { left, right } => {
            let clauses = translate_chain(left, right, ParentKind::Disjunction)?;
            if parent == ParentKind::Disjunction {
                Ok(clauses)
            } else {
                Ok(vec![helpers::bool_should(clauses)])
            }
        }
        Expression::Nested(inner) => translate_expression(inner, parent),
        leaf => Ok(vec![translate_leaf(leaf)?]),
    }
}

/// Translate both sides of an AND/OR, collecting their clauses in order.
fn translate_chain(
    left: &Expression,
    right: &Expression,
    kind: ParentKind,
) -> Result<Vec<Query>, Error> {
    let mut clauses = translate_expression(left, kind)?;
    clauses.extend(translate_expression(right, kind)?);
    Ok(clauses)
}

/// Translate an expression that is not an AND, OR or grouping.
fn translate_leaf(expression: &Expression) -> Result<Query, Error> {
    match expression {
        Expression::Comparison {
            left,
            operator,
            right,
        } => translate_comparison(left, *operator, right),
        Expression::Between { left, from, to } => translate_between(left, from, to),
        Expression::FunctionCall(function) => translate_function(function),
        Expression::Not(_) => Err(Error::NotSupported("NOT expressions".to_string())),
        Expression::IsNull { negated: false, .. } => {
            Err(Error::NotSupported("IS NULL checks".to_string()))
        }
        Expression::IsNull { negated: true, .. } => {
            Err(Error::NotSupported("IS NOT NULL checks".to_string()))
        }
        Expression::Unsupported(description) => Err(Error::NotSupported(description.clone())),
        other => Err(Error::NotSupported(format!(
            "the non-boolean expression {other} as a filter"
        ))),
    }
}

fn comparison_column(left: &Expression) -> Result<String, Error> {
    match left {
        Expression::ColumnReference(ColumnName(path)) => Ok(path.join(".")),
        other => Err(Error::ComparisonLeftNotColumn(other.to_string())),
    }
}

fn translate_comparison(
    left: &Expression,
    operator: ComparisonOperator,
    right: &Expression,
) -> Result<Query, Error> {
    let column = comparison_column(left)?;
    let value = values::render_value(right)?;

    match operator {
        ComparisonOperator::Equal => equality(column, value, operator),
        ComparisonOperator::NotEqual => Ok(helpers::must_not(equality(column, value, operator)?)),
        ComparisonOperator::GreaterThan => Ok(helpers::range(
            column,
            RangeBound::Gt,
            scalar(value, operator)?,
        )),
        ComparisonOperator::LessThan => Ok(helpers::range(
            column,
            RangeBound::Lt,
            scalar(value, operator)?,
        )),
        ComparisonOperator::GreaterThanOrEqual => Ok(helpers::range(
            column,
            RangeBound::From,
            scalar(value, operator)?,
        )),
        ComparisonOperator::LessThanOrEqual => Ok(helpers::range(
            column,
            RangeBound::To,
            scalar(value, operator)?,
        )),
        ComparisonOperator::In => Ok(helpers::terms(column, list(value, operator)?)),
        ComparisonOperator::NotIn => Ok(helpers::must_not(helpers::terms(
            column,
            list(value, operator)?,
        ))),
        ComparisonOperator::Like => Ok(like(column, scalar(value, operator)?)),
        ComparisonOperator::NotLike => {
            Ok(helpers::must_not(like(column, scalar(value, operator)?)))
        }
    }
}

/// `=`: a phrase match, or an existence check against the `missing` sentinel.
fn equality(
    column: String,
    value: RenderedValue,
    operator: ComparisonOperator,
) -> Result<Query, Error> {
    match value {
        RenderedValue::Missing => Ok(helpers::missing(column)),
        other => Ok(helpers::match_phrase(column, scalar(other, operator)?)),
    }
}

/// `%` wildcards are dropped; substring matching is approximated by a phrase match.
fn like(column: String, pattern: String) -> Query {
    helpers::match_phrase(column, pattern.replace('%', ""))
}

fn scalar(value: RenderedValue, operator: ComparisonOperator) -> Result<String, Error> {
    match value {
        RenderedValue::Text(text) => Ok(text),
        RenderedValue::List(_) => Err(Error::InvalidValue {
            operator: operator.to_string(),
            reason: "a list is only allowed with IN and NOT IN",
        }),
        RenderedValue::Missing => Err(Error::InvalidValue {
            operator: operator.to_string(),
            reason: "`missing` is only allowed with = and !=",
        }),
    }
}

fn list(value: RenderedValue, operator: ComparisonOperator) -> Result<Vec<Term>, Error> {
    match value {
        RenderedValue::List(items) => Ok(items
            .iter()
            .map(translation_helpers::literal_to_term)
            .collect()),
        RenderedValue::Text(_) | RenderedValue::Missing => Err(Error::InvalidValue {
            operator: operator.to_string(),
            reason: "expected a parenthesized list of values",
        }),
    }
}

fn translate_between(left: &Expression, from: &Expression, to: &Expression) -> Result<Query, Error> {
    let column = comparison_column(left)?;
    let bound = |value: &Expression| -> Result<String, Error> {
        match values::render_value(value)? {
            RenderedValue::Text(text) => Ok(text),
            _ => Err(Error::InvalidValue {
                operator: "between".to_string(),
                reason: "bounds must be single values",
            }),
        }
    };
    Ok(helpers::range_between(column, bound(from)?, bound(to)?))
}

const MULTI_MATCH: &str = "multi_match";

/// `multi_match(query='...', fields=(a, b), type='...')`
fn translate_function(function: &FunctionCall) -> Result<Query, Error> {
    if !translation_helpers::is_function(&function.name, MULTI_MATCH) {
        return Err(Error::UnknownFunction {
            position: FunctionPosition::Where,
            name: function.name.clone(),
        });
    }
    if !(2..=3).contains(&function.args.len()) {
        return Err(Error::InvalidArity {
            function: MULTI_MATCH.to_string(),
            expected: "2 or 3",
            found: function.args.len(),
        });
    }

    let mut query = None;
    let mut fields = None;
    let mut r#type = None;
    for argument in &function.args {
        let (name, value) = translation_helpers::named_parameter(MULTI_MATCH, argument)?;
        let lowered = name.to_ascii_lowercase();
        let duplicate = match lowered.as_str() {
            "query" => query
                .replace(translation_helpers::parameter_text(MULTI_MATCH, value)?)
                .is_some(),
            "type" => r#type
                .replace(translation_helpers::parameter_text(MULTI_MATCH, value)?)
                .is_some(),
            "fields" => fields.replace(field_list(value)?).is_some(),
            _ => {
                return Err(Error::UnknownParameter {
                    function: MULTI_MATCH.to_string(),
                    parameter: name.to_string(),
                })
            }
        };
        if duplicate {
            return Err(Error::DuplicateParameter {
                function: MULTI_MATCH.to_string(),
                parameter: name.to_string(),
            });
        }
    }

    Ok(Query::MultiMatch {
        query: query.ok_or(Error::MissingParameter {
            function: MULTI_MATCH.to_string(),
            parameter: "query",
        })?,
        fields: fields.ok_or(Error::MissingParameter {
            function: MULTI_MATCH.to_string(),
            parameter: "fields",
        })?,
        r#type,
    })
}

/// The `fields` of a `multi_match`: `(a, b)`, a single column,
/// or a quoted comma-separated list.
fn field_list(value: &Expression) -> Result<Vec<String>, Error> {
    match value {
        Expression::Tuple(items) => items.iter().map(field_name).collect(),
        Expression::Nested(inner) => field_list(inner),
        Expression::Value(literal) => Ok(literal
            .to_text()
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(str::to_string)
            .collect()),
        other => field_name(other).map(|field| vec![field]),
    }
}

fn field_name(value: &Expression) -> Result<String, Error> {
    translation_helpers::parameter_text(MULTI_MATCH, value)
}
