//! Handle GROUP BY and aggregate function translation.

use query_engine_dsl::dsl::ast::{Aggregation, AggregationKind, Aggregations};
use query_engine_dsl::dsl::helpers;
use query_engine_statement::statement::ast::{
    FunctionArgument, FunctionCall, GroupByKey, SelectItem,
};

use crate::translation::error::{Error, FunctionPosition};
use crate::translation::helpers as translation_helpers;

/// The number of buckets returned for the outermost grouping key.
pub const PRIMARY_BUCKET_SIZE: u32 = 200;
/// Nested grouping keys return every bucket.
pub const NESTED_BUCKET_SIZE: u32 = 0;

pub const DEFAULT_INTERVAL: &str = "1h";
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd HH:mm:ss";

/// `count(*)` counts the `_index` field, which every document has.
const COUNT_ALL_FIELD: &str = "_index";

const DATE_HISTOGRAM: &str = "date_histogram";

/// Translate the GROUP BY keys and the aggregate functions of the select list
/// into a chain of nested bucket aggregations, one level per key, with the
/// metrics attached to the innermost level.
pub fn translate(
    group_by: &[GroupByKey],
    projection: &[SelectItem],
) -> Result<Aggregations, Error> {
    if group_by.is_empty() {
        return Err(Error::EmptyGroupBy);
    }

    let metrics = translate_metrics(projection)?;

    // Innermost first, so every level is complete before it is nested.
    group_by
        .iter()
        .enumerate()
        .rev()
        .try_fold(metrics, |child, (position, key)| {
            let (name, kind) = translate_group_by_key(key, position)?;
            Ok(helpers::single_aggregation(
                name,
                helpers::bucket(kind, Some(child)),
            ))
        })
}

/// The aggregate functions of the select list, keyed by their display name.
pub fn translate_metrics(projection: &[SelectItem]) -> Result<Aggregations, Error> {
    let mut metrics = Aggregations::default();
    for item in projection {
        if let SelectItem::Function(function) = item {
            let (name, aggregation) = translate_metric(function)?;
            metrics.0.insert(name, aggregation);
        }
    }
    Ok(metrics)
}

fn translate_metric(function: &FunctionCall) -> Result<(String, Aggregation), Error> {
    let name = function.name.to_ascii_lowercase();
    if name == "group_concat" {
        return Err(Error::NotSupported("group_concat in the select list".to_string()));
    }
    if function.distinct {
        return Err(Error::NotSupported(format!("{name}(DISTINCT ...)")));
    }

    let argument = match function.args.as_slice() {
        [argument] => argument,
        args => {
            return Err(Error::InvalidArity {
                function: function.name.clone(),
                expected: "1",
                found: args.len(),
            })
        }
    };

    let (argument_text, kind) = match argument {
        FunctionArgument::Wildcard if name == "count" => (
            "*".to_string(),
            AggregationKind::ValueCount {
                field: COUNT_ALL_FIELD.to_string(),
            },
        ),
        FunctionArgument::Wildcard => {
            return Err(Error::NotSupported(format!("{name}(*)")));
        }
        FunctionArgument::Unnamed(value) => {
            let column = translation_helpers::parameter_text(&function.name, value)?;
            let kind = if name == "count" {
                AggregationKind::ValueCount {
                    field: column.clone(),
                }
            } else {
                AggregationKind::Metric {
                    function: name.clone(),
                    field: column.clone(),
                }
            };
            (column, kind)
        }
        FunctionArgument::Named { .. } => {
            return Err(Error::MalformedParameter {
                function: function.name.clone(),
                argument: argument.to_string(),
            })
        }
    };

    Ok((
        format!("{}({argument_text})", name.to_ascii_uppercase()),
        helpers::metric(kind),
    ))
}

/// The bucket name and definition of one GROUP BY key.
fn translate_group_by_key(
    key: &GroupByKey,
    position: usize,
) -> Result<(String, AggregationKind), Error> {
    match key {
        GroupByKey::Column(column) => {
            let field = column.to_dotted();
            let size = if position == 0 {
                PRIMARY_BUCKET_SIZE
            } else {
                NESTED_BUCKET_SIZE
            };
            Ok((field.clone(), AggregationKind::Terms { field, size }))
        }
        GroupByKey::Function(function)
            if translation_helpers::is_function(&function.name, DATE_HISTOGRAM) =>
        {
            translate_date_histogram(function)
        }
        GroupByKey::Function(function) => Err(Error::UnknownFunction {
            position: FunctionPosition::GroupBy,
            name: function.name.clone(),
        }),
    }
}

/// `date_histogram(field='create_time', interval='1h', format='yyyy-MM-dd')`
///
/// The bucket is named after the call with quotes and spaces removed,
/// e.g. `date_histogram(field=create_time,interval=1h)`.
fn translate_date_histogram(function: &FunctionCall) -> Result<(String, AggregationKind), Error> {
    let mut field = None;
    let mut interval = None;
    let mut format = None;
    let mut key_parameters = Vec::with_capacity(function.args.len());

    for argument in &function.args {
        let (name, value) = translation_helpers::named_parameter(DATE_HISTOGRAM, argument)?;
        let text = translation_helpers::parameter_text(DATE_HISTOGRAM, value)?;
        let slot = match name.to_ascii_lowercase().as_str() {
            "field" => &mut field,
            "interval" => &mut interval,
            "format" => &mut format,
            _ => {
                return Err(Error::UnknownParameter {
                    function: DATE_HISTOGRAM.to_string(),
                    parameter: name.to_string(),
                })
            }
        };
        if slot.replace(text.clone()).is_some() {
            return Err(Error::DuplicateParameter {
                function: DATE_HISTOGRAM.to_string(),
                parameter: name.to_string(),
            });
        }
        key_parameters.push(format!("{name}={text}"));
    }

    let field = field.ok_or(Error::MissingParameter {
        function: DATE_HISTOGRAM.to_string(),
        parameter: "field",
    })?;

    let key: String = format!("{DATE_HISTOGRAM}({})", key_parameters.join(","))
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    Ok((
        key,
        AggregationKind::DateHistogram {
            field,
            interval: interval.unwrap_or_else(|| DEFAULT_INTERVAL.to_string()),
            format: format.unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
        },
    ))
}
