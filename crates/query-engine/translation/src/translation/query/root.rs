//! Handle the FROM target and paging of a statement.

use query_engine_statement::statement::ast::{Limit, TableName};

use crate::translation::error::Error;

pub const DEFAULT_FROM: u64 = 0;
pub const DEFAULT_SIZE: u64 = 1;
/// Aggregation queries return buckets, not hits.
pub const AGGREGATION_SIZE: u64 = 0;

/// The index a statement targets. Exactly one FROM target is supported.
pub fn translate_from(from: &[TableName]) -> Result<String, Error> {
    match from {
        [] => Err(Error::NoFromTarget),
        [table] => Ok(table.to_dotted()),
        tables => Err(Error::MultipleFromTargets(tables.len())),
    }
}

/// Compute `from` and `size`. An explicit LIMIT overrides the aggregation default.
pub fn translate_paging(limit: &Limit, is_aggregation: bool) -> (u64, u64) {
    let default_size = if is_aggregation {
        AGGREGATION_SIZE
    } else {
        DEFAULT_SIZE
    };
    (
        limit.offset.unwrap_or(DEFAULT_FROM),
        limit.count.unwrap_or(default_size),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_requires_exactly_one_table() {
        assert_eq!(translate_from(&[]), Err(Error::NoFromTarget));
        assert_eq!(
            translate_from(&[
                TableName(vec!["a".to_string()]),
                TableName(vec!["b".to_string()])
            ]),
            Err(Error::MultipleFromTargets(2))
        );
        assert_eq!(
            translate_from(&[TableName(vec!["logs".to_string(), "2023".to_string()])]),
            Ok("logs.2023".to_string())
        );
    }

    #[test]
    fn it_defaults_paging() {
        assert_eq!(translate_paging(&Limit::default(), false), (0, 1));
        assert_eq!(translate_paging(&Limit::default(), true), (0, 0));
    }

    #[test]
    fn an_explicit_limit_wins() {
        let limit = Limit {
            offset: Some(5),
            count: Some(10),
        };
        assert_eq!(translate_paging(&limit, false), (5, 10));
        assert_eq!(translate_paging(&limit, true), (5, 10));
    }
}
