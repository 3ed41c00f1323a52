//! The first version of the configuration file format.

use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::configuration::generate_schema;
use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};

pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";

/// The contents of `configuration.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    // Which version of the configuration format are we using
    pub version: Version,
    /// The SQL dialect statements are parsed with.
    #[serde(default)]
    pub dialect: SqlDialect,
    /// How the generated documents are printed.
    #[serde(default)]
    pub output: OutputFormat,
}

impl ParsedConfiguration {
    pub fn initial() -> Self {
        ParsedConfiguration {
            version: Version::This,
            dialect: SqlDialect::default(),
            output: OutputFormat::default(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
pub enum Version {
    #[serde(rename = "1")]
    This,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    /// Backtick-quoted identifiers, `!=`, `LIMIT x OFFSET y`.
    #[default]
    Mysql,
    Generic,
    Postgresql,
    Ansi,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A single line.
    #[default]
    Compact,
    /// Indented with two spaces.
    Pretty,
}

/// Read `configuration.json` from a directory.
pub fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents =
        fs::read_to_string(&configuration_file).map_err(|source| {
            ParseConfigurationError::IoError {
                file_path: configuration_file.clone(),
                source,
            }
        })?;

    let parsed_config: ParsedConfiguration = serde_json::from_str(&configuration_file_contents)
        .map_err(|error| ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        })?;

    tracing::debug!(
        file = %configuration_file.display(),
        "Parsed configuration: {:?}",
        parsed_config
    );
    Ok(parsed_config)
}

/// Write the parsed configuration into a directory on disk, along with its JSON schema.
pub fn write_parsed_configuration(
    parsed_config: &ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let configuration_file = out_dir.as_ref().join(CONFIGURATION_FILENAME);
    fs::create_dir_all(out_dir.as_ref())?;

    // create the configuration file
    fs::write(
        configuration_file,
        serde_json::to_string_pretty(parsed_config)? + "\n",
    )?;

    // create the jsonschema file
    let configuration_jsonschema_file_path =
        out_dir.as_ref().join(CONFIGURATION_JSONSCHEMA_FILENAME);
    fs::write(
        configuration_jsonschema_file_path,
        serde_json::to_string_pretty(&generate_schema())? + "\n",
    )?;

    Ok(())
}
