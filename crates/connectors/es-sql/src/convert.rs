//! The conversion entry points.

use tracing::info_span;

use es_sql_configuration::{Configuration, OutputFormat};
use query_engine_dsl::dsl::plan::SearchPlan;
use query_engine_statement::statement::ast::Statement;
use query_engine_translation::translation;

use crate::dialect::parser_dialect;
use crate::error::Error;

/// A converted statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    /// The search request document.
    pub dsl: String,
    /// The index named in the FROM clause.
    pub index: String,
}

/// Convert a SELECT statement, printing the document as configured.
pub fn convert(sql: &str, configuration: &Configuration) -> Result<Converted, Error> {
    convert_with_output(sql, configuration, configuration.output)
}

/// Convert a SELECT statement, always printing an indented document.
pub fn convert_pretty(sql: &str, configuration: &Configuration) -> Result<Converted, Error> {
    convert_with_output(sql, configuration, OutputFormat::Pretty)
}

fn convert_with_output(
    sql: &str,
    configuration: &Configuration,
    output: OutputFormat,
) -> Result<Converted, Error> {
    let plan = plan(sql, configuration).map_err(|err| {
        tracing::error!(
            event.name = "Conversion error",
            body = %err,
            unsupported = err.is_unsupported(),
            error = true,
        );
        err
    })?;

    let dsl = match output {
        OutputFormat::Compact => plan.body(),
        OutputFormat::Pretty => plan.pretty_body(),
    };
    Ok(Converted {
        dsl,
        index: plan.index,
    })
}

/// Parse and translate a statement.
fn plan(sql: &str, configuration: &Configuration) -> Result<SearchPlan, Error> {
    let dialect = parser_dialect(configuration.dialect);
    let statement = info_span!("parse statement")
        .in_scope(|| query_engine_statement::parse_with_dialect(sql, dialect.as_ref()))?;

    match statement {
        Statement::Select(select) => {
            Ok(info_span!("translate statement")
                .in_scope(|| translation::query::translate(&select))?)
        }
        Statement::Insert => Err(Error::NotSupported("insert".to_string())),
        Statement::Update => Err(Error::NotSupported("update".to_string())),
        Statement::Delete => Err(Error::NotSupported("delete".to_string())),
        Statement::Other(kind) => Err(Error::NotSupported(kind.to_lowercase())),
    }
}
