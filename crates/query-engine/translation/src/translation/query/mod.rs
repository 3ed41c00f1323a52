//! Translate a parsed SELECT statement.

pub mod aggregates;
pub mod filtering;
pub mod root;
pub mod sorting;
pub mod values;

use query_engine_dsl::dsl;
use query_engine_statement::statement::ast::{Select, SelectItem};

use crate::translation::error::Error;

/// Translate a SELECT statement into a search plan against a single index.
pub fn translate(select: &Select) -> Result<dsl::plan::SearchPlan, Error> {
    let index = root::translate_from(&select.from)?;
    let query = filtering::translate_where(select.selection.as_ref())?;

    let is_aggregation = !select.group_by.is_empty();
    let aggregations = if is_aggregation {
        Some(aggregates::translate(&select.group_by, &select.projection)?)
    } else {
        reject_aggregate_functions(&select.projection)?;
        None
    };

    let (from, size) = root::translate_paging(&select.limit, is_aggregation);

    // buckets are ordered by the aggregation itself
    let sort = if is_aggregation {
        vec![]
    } else {
        sorting::translate_order_by(&select.order_by)
    };

    let request = dsl::ast::SearchRequest {
        query,
        from,
        size,
        sort,
        aggregations,
    };

    // log and return
    tracing::debug!(index = %index, "Search request: {:?}", request);
    Ok(dsl::plan::simple_search_plan(index, request))
}

/// Without GROUP BY there are no buckets to hang metrics on.
fn reject_aggregate_functions(projection: &[SelectItem]) -> Result<(), Error> {
    match projection.iter().find_map(|item| match item {
        SelectItem::Function(function) => Some(function),
        _ => None,
    }) {
        Some(function) => Err(Error::AggregateWithoutGroupBy(function.name.clone())),
        None => Ok(()),
    }
}
