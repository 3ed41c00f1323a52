//! Type definitions of a search request document.

use indexmap::IndexMap;

/// A full search request: the body sent to the `_search` endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: Query,
    pub from: u64,
    pub size: u64,
    pub sort: Vec<Sort>,
    pub aggregations: Option<Aggregations>,
}

/// A query clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// A compound query combining clauses with a single occurrence type.
    Bool { occur: Occur, clauses: Vec<Query> },
    MatchPhrase {
        field: String,
        query: String,
    },
    /// Matches documents in which the field has no value.
    Missing { field: String },
    Range {
        field: String,
        bounds: Vec<(RangeBound, String)>,
    },
    Terms {
        field: String,
        values: Vec<Term>,
    },
    MultiMatch {
        query: String,
        fields: Vec<String>,
        r#type: Option<String>,
    },
    MatchAll,
}

/// How the clauses of a `bool` query participate in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occur {
    Must,
    Should,
    MustNot,
}

/// A bound of a `range` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    /// Exclusive lower bound.
    Gt,
    /// Exclusive upper bound.
    Lt,
    /// Inclusive lower bound.
    From,
    /// Inclusive upper bound.
    To,
}

/// A single value of a `terms` query.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
}

/// A named set of aggregations, in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregations(pub IndexMap<String, Aggregation>);

/// One aggregation, optionally with sub-aggregations computed per bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub kind: AggregationKind,
    pub aggregations: Option<Aggregations>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AggregationKind {
    // buckets
    Terms {
        field: String,
        size: u32,
    },
    DateHistogram {
        field: String,
        interval: String,
        format: String,
    },
    // metrics
    ValueCount {
        field: String,
    },
    /// A single-field metric named after its function, e.g. `avg` or `max`.
    Metric {
        function: String,
        field: String,
    },
}

/// One element of a `sort` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Aggregations {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
