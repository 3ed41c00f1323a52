//! The result of translating one statement.

use super::ast::SearchRequest;

/// The index a request targets, together with the request body.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan {
    pub index: String,
    pub request: SearchRequest,
}

impl SearchPlan {
    /// The request body as compact JSON text.
    pub fn body(&self) -> String {
        self.request.to_json().to_string()
    }

    /// The request body as indented JSON text.
    pub fn pretty_body(&self) -> String {
        let value = self.request.to_json();
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
    }
}

/// Build a plan for a single index.
pub fn simple_search_plan(index: String, request: SearchRequest) -> SearchPlan {
    SearchPlan { index, request }
}
