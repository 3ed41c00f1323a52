//! Convert a search request AST to JSON.
//!
//! Keys are emitted in insertion order, so the rendered document has a stable layout.

use super::ast::*;
use serde_json::{Map, Value};

/// A JSON object with a single key.
fn object(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

impl SearchRequest {
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("query".to_string(), self.query.to_json());
        map.insert("from".to_string(), Value::from(self.from));
        map.insert("size".to_string(), Value::from(self.size));
        if !self.sort.is_empty() {
            map.insert(
                "sort".to_string(),
                Value::Array(self.sort.iter().map(Sort::to_json).collect()),
            );
        }
        if let Some(aggregations) = &self.aggregations {
            map.insert("aggregations".to_string(), aggregations.to_json());
        }
        Value::Object(map)
    }
}

impl Query {
    pub fn to_json(&self) -> Value {
        match self {
            Query::Bool { occur, clauses } => object(
                "bool",
                object(
                    occur.as_str(),
                    Value::Array(clauses.iter().map(Query::to_json).collect()),
                ),
            ),
            Query::MatchPhrase { field, query } => object(
                "match_phrase",
                object(field, object("query", Value::from(query.as_str()))),
            ),
            Query::Missing { field } => {
                object("missing", object("field", Value::from(field.as_str())))
            }
            Query::Range { field, bounds } => {
                let mut range = Map::new();
                for (bound, value) in bounds {
                    range.insert(bound.as_str().to_string(), Value::from(value.as_str()));
                }
                object("range", object(field, Value::Object(range)))
            }
            Query::Terms { field, values } => object(
                "terms",
                object(
                    field,
                    Value::Array(values.iter().map(Term::to_json).collect()),
                ),
            ),
            Query::MultiMatch {
                query,
                fields,
                r#type,
            } => {
                let mut multi_match = Map::new();
                multi_match.insert("query".to_string(), Value::from(query.as_str()));
                if let Some(r#type) = r#type {
                    multi_match.insert("type".to_string(), Value::from(r#type.as_str()));
                }
                multi_match.insert(
                    "fields".to_string(),
                    Value::Array(fields.iter().map(|f| Value::from(f.as_str())).collect()),
                );
                object("multi_match", Value::Object(multi_match))
            }
            Query::MatchAll => object("match_all", Value::Object(Map::new())),
        }
    }
}

impl Occur {
    pub fn as_str(self) -> &'static str {
        match self {
            Occur::Must => "must",
            Occur::Should => "should",
            Occur::MustNot => "must_not",
        }
    }
}

impl RangeBound {
    pub fn as_str(self) -> &'static str {
        match self {
            RangeBound::Gt => "gt",
            RangeBound::Lt => "lt",
            RangeBound::From => "from",
            RangeBound::To => "to",
        }
    }
}

impl Term {
    pub fn to_json(&self) -> Value {
        match self {
            Term::String(s) => Value::from(s.as_str()),
            Term::Number(n) => Value::Number(n.clone()),
            Term::Bool(b) => Value::Bool(*b),
            Term::Null => Value::Null,
        }
    }
}

impl Aggregations {
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(name, aggregation)| (name.clone(), aggregation.to_json()))
                .collect(),
        )
    }
}

impl Aggregation {
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        let (name, body) = self.kind.to_json();
        map.insert(name, body);
        if let Some(aggregations) = &self.aggregations {
            map.insert("aggregations".to_string(), aggregations.to_json());
        }
        Value::Object(map)
    }
}

impl AggregationKind {
    /// The aggregation type name and its definition.
    pub fn to_json(&self) -> (String, Value) {
        match self {
            AggregationKind::Terms { field, size } => {
                let mut terms = Map::new();
                terms.insert("field".to_string(), Value::from(field.as_str()));
                terms.insert("size".to_string(), Value::from(*size));
                ("terms".to_string(), Value::Object(terms))
            }
            AggregationKind::DateHistogram {
                field,
                interval,
                format,
            } => {
                let mut histogram = Map::new();
                histogram.insert("field".to_string(), Value::from(field.as_str()));
                histogram.insert("interval".to_string(), Value::from(interval.as_str()));
                histogram.insert("format".to_string(), Value::from(format.as_str()));
                ("date_histogram".to_string(), Value::Object(histogram))
            }
            AggregationKind::ValueCount { field } => (
                "value_count".to_string(),
                object("field", Value::from(field.as_str())),
            ),
            AggregationKind::Metric { function, field } => (
                function.clone(),
                object("field", Value::from(field.as_str())),
            ),
        }
    }
}

impl Sort {
    pub fn to_json(&self) -> Value {
        object(&self.field, Value::from(self.direction.as_str()))
    }
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::helpers;
    use super::*;
    use serde_json::json;
    use similar_asserts::assert_eq;

    #[test]
    fn it_renders_a_bool_of_leaves() {
        let query = helpers::bool_must(vec![
            helpers::range("id".to_string(), RangeBound::Gt, "1".to_string()),
            helpers::must_not(helpers::match_phrase(
                "status".to_string(),
                "1".to_string(),
            )),
        ]);
        assert_eq!(
            query.to_json(),
            json!({"bool": {"must": [
                {"range": {"id": {"gt": "1"}}},
                {"bool": {"must_not": [{"match_phrase": {"status": {"query": "1"}}}]}}
            ]}})
        );
    }

    #[test]
    fn it_keeps_term_types() {
        let query = helpers::terms(
            "id".to_string(),
            vec![
                Term::Number(serde_json::Number::from(1)),
                Term::String("2".to_string()),
                Term::Bool(true),
                Term::Null,
            ],
        );
        assert_eq!(query.to_json(), json!({"terms": {"id": [1, "2", true, null]}}));
    }

    #[test]
    fn it_escapes_strings() {
        let query = helpers::match_phrase("content".to_string(), "say \"hi\"".to_string());
        assert_eq!(
            query.to_json().to_string(),
            r#"{"match_phrase":{"content":{"query":"say \"hi\""}}}"#
        );
    }

    #[test]
    fn it_orders_request_keys() {
        let request = SearchRequest {
            query: helpers::match_all_query(),
            from: 5,
            size: 0,
            sort: vec![Sort {
                field: "id".to_string(),
                direction: SortDirection::Desc,
            }],
            aggregations: Some(helpers::single_aggregation(
                "COUNT(*)".to_string(),
                helpers::metric(AggregationKind::ValueCount {
                    field: "_index".to_string(),
                }),
            )),
        };
        assert_eq!(
            request.to_json().to_string(),
            r#"{"query":{"bool":{"must":[{"match_all":{}}]}},"from":5,"size":0,"sort":[{"id":"desc"}],"aggregations":{"COUNT(*)":{"value_count":{"field":"_index"}}}}"#
        );
    }

    #[test]
    fn it_nests_bucket_aggregations() {
        let inner = helpers::single_aggregation(
            "AVG(price)".to_string(),
            helpers::metric(AggregationKind::Metric {
                function: "avg".to_string(),
                field: "price".to_string(),
            }),
        );
        let outer = helpers::single_aggregation(
            "channel".to_string(),
            helpers::bucket(
                AggregationKind::Terms {
                    field: "channel".to_string(),
                    size: 200,
                },
                Some(inner),
            ),
        );
        assert_eq!(
            outer.to_json(),
            json!({"channel": {
                "terms": {"field": "channel", "size": 200},
                "aggregations": {"AVG(price)": {"avg": {"field": "price"}}}
            }})
        );
    }

    #[test]
    fn it_drops_empty_sub_aggregations() {
        let aggregation = helpers::bucket(
            AggregationKind::Terms {
                field: "id".to_string(),
                size: 0,
            },
            Some(Aggregations::default()),
        );
        assert_eq!(
            aggregation.to_json(),
            json!({"terms": {"field": "id", "size": 0}})
        );
    }

    #[test]
    fn it_omits_absent_multi_match_type() {
        let query = Query::MultiMatch {
            query: "foo".to_string(),
            fields: vec!["title".to_string(), "body".to_string()],
            r#type: None,
        };
        assert_eq!(
            query.to_json(),
            json!({"multi_match": {"query": "foo", "fields": ["title", "body"]}})
        );
    }
}
