//! Map the configured dialect onto a parser dialect.

use es_sql_configuration::SqlDialect;
use sqlparser::dialect::{AnsiDialect, Dialect, GenericDialect, MySqlDialect, PostgreSqlDialect};

pub fn parser_dialect(dialect: SqlDialect) -> Box<dyn Dialect> {
    match dialect {
        SqlDialect::Mysql => Box::new(MySqlDialect {}),
        SqlDialect::Generic => Box::new(GenericDialect {}),
        SqlDialect::Postgresql => Box::new(PostgreSqlDialect {}),
        SqlDialect::Ansi => Box::new(AnsiDialect {}),
    }
}
