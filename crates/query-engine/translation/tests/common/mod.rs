use std::fs;
use std::path::PathBuf;

use query_engine_dsl::dsl::plan::SearchPlan;
use query_engine_statement::statement::ast::Statement;
use query_engine_translation::translation;

/// Translate the statement of a golden-file test, returning the request body.
pub fn test_translation(testname: &str) -> anyhow::Result<serde_json::Value> {
    let directory = PathBuf::from("tests/goldenfiles").join(testname);
    let sql = fs::read_to_string(directory.join("request.sql"))?;
    let plan = translate_sql(&sql)?;
    Ok(plan.request.to_json())
}

/// The expected request body of a golden-file test.
pub fn expected(testname: &str) -> serde_json::Value {
    let directory = PathBuf::from("tests/goldenfiles").join(testname);
    let expected = fs::read_to_string(directory.join("expected.json")).unwrap();
    serde_json::from_str(&expected).unwrap()
}

/// Parse and translate a SELECT statement. Parsing failures panic; they are
/// not what these tests are about.
pub fn translate_sql(sql: &str) -> Result<SearchPlan, translation::error::Error> {
    match query_engine_statement::parse(sql).unwrap() {
        Statement::Select(select) => translation::query::translate(&select),
        other => panic!("expected a SELECT statement, got {other:?}"),
    }
}
