//! Helpers for building dsl::ast types in certain shapes and patterns.

use super::ast::*;
use indexmap::IndexMap;

// Compound queries //

/// `{"bool": {"must": [...]}}`
pub fn bool_must(clauses: Vec<Query>) -> Query {
    Query::Bool {
        occur: Occur::Must,
        clauses,
    }
}

/// `{"bool": {"should": [...]}}`
pub fn bool_should(clauses: Vec<Query>) -> Query {
    Query::Bool {
        occur: Occur::Should,
        clauses,
    }
}

/// `{"bool": {"must_not": [query]}}`
pub fn must_not(query: Query) -> Query {
    Query::Bool {
        occur: Occur::MustNot,
        clauses: vec![query],
    }
}

/// The query used when a statement has no filter at all.
pub fn match_all_query() -> Query {
    bool_must(vec![Query::MatchAll])
}

// Leaf queries //

pub fn match_phrase(field: String, query: String) -> Query {
    Query::MatchPhrase { field, query }
}

pub fn missing(field: String) -> Query {
    Query::Missing { field }
}

/// A `range` query with a single bound.
pub fn range(field: String, bound: RangeBound, value: String) -> Query {
    Query::Range {
        field,
        bounds: vec![(bound, value)],
    }
}

/// A `range` query with inclusive bounds on both sides, as produced by `BETWEEN`.
pub fn range_between(field: String, from: String, to: String) -> Query {
    Query::Range {
        field,
        bounds: vec![(RangeBound::From, from), (RangeBound::To, to)],
    }
}

pub fn terms(field: String, values: Vec<Term>) -> Query {
    Query::Terms { field, values }
}

// Aggregations //

/// A single named aggregation.
pub fn single_aggregation(name: String, aggregation: Aggregation) -> Aggregations {
    let mut aggregations = IndexMap::new();
    aggregations.insert(name, aggregation);
    Aggregations(aggregations)
}

/// Attach sub-aggregations to a bucket aggregation. Empty sets are dropped.
pub fn bucket(kind: AggregationKind, child: Option<Aggregations>) -> Aggregation {
    Aggregation {
        kind,
        aggregations: child.filter(|aggregations| !aggregations.is_empty()),
    }
}

pub fn metric(kind: AggregationKind) -> Aggregation {
    Aggregation {
        kind,
        aggregations: None,
    }
}
