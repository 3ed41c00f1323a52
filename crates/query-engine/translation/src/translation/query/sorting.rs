//! Handle ORDER BY translation.

use query_engine_dsl::dsl::ast::{Sort, SortDirection};
use query_engine_statement::statement::ast::{OrderByDirection, OrderByElement};

/// Convert the ORDER BY elements to a `sort` array, in source order.
pub fn translate_order_by(order_by: &[OrderByElement]) -> Vec<Sort> {
    order_by
        .iter()
        .map(|element| Sort {
            field: element.column.to_dotted(),
            direction: match element.direction {
                OrderByDirection::Asc => SortDirection::Asc,
                OrderByDirection::Desc => SortDirection::Desc,
            },
        })
        .collect()
}
