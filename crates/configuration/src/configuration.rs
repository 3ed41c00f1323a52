//! Configuration for the translator.

use schemars::schema::RootSchema;

use crate::version1::{OutputFormat, ParsedConfiguration, SqlDialect};

/// The 'Configuration' type collects all the information necessary to translate statements.
///
/// 'ParsedConfiguration' is the serialized, versioned format; it is interpreted into
/// a 'Configuration' using 'make_runtime_configuration'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Configuration {
    pub dialect: SqlDialect,
    pub output: OutputFormat,
}

/// Interpret a parsed configuration.
pub fn make_runtime_configuration(parsed_config: ParsedConfiguration) -> Configuration {
    Configuration {
        dialect: parsed_config.dialect,
        output: parsed_config.output,
    }
}

/// The JSON schema of the configuration file.
pub fn generate_schema() -> RootSchema {
    schemars::schema_for!(ParsedConfiguration)
}
