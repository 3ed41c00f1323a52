//! The command-line interface of the translator.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use es_sql_configuration as configuration;

/// The commands understood by the CLI.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Translate a SELECT statement into a search request.
    Translate {
        /// The statement. Read from standard input when omitted.
        sql: Option<String>,
        /// A directory containing `configuration.json`.
        #[arg(long, env = "ES_SQL_CONFIGURATION")]
        configuration: Option<PathBuf>,
        /// Indent the output.
        #[arg(long)]
        pretty: bool,
        /// Print the target index on standard error.
        #[arg(long)]
        show_index: bool,
    },
    /// Write a default configuration and its schema into a directory.
    Initialize {
        #[arg(long, default_value = ".")]
        context_path: PathBuf,
    },
    /// Print the JSON schema of the configuration file.
    PrintSchema,
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Output {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

/// Run a command. `stdin` is only read when a statement is needed and none was given.
pub fn run(command: Command, stdin: impl Read) -> anyhow::Result<Output> {
    match command {
        Command::Translate {
            sql,
            configuration,
            pretty,
            show_index,
        } => translate(sql, configuration, pretty, show_index, stdin),
        Command::Initialize { context_path } => initialize(&context_path),
        Command::PrintSchema => {
            let schema = configuration::generate_schema();
            Ok(Output {
                stdout: Some(serde_json::to_string_pretty(&schema)?),
                stderr: None,
            })
        }
    }
}

fn translate(
    sql: Option<String>,
    configuration_dir: Option<PathBuf>,
    pretty: bool,
    show_index: bool,
    mut stdin: impl Read,
) -> anyhow::Result<Output> {
    let configuration = match configuration_dir {
        Some(dir) => {
            configuration::make_runtime_configuration(configuration::parse_configuration(dir)?)
        }
        None => configuration::Configuration::default(),
    };

    let sql = match sql {
        Some(sql) => sql,
        None => {
            let mut buffer = String::new();
            stdin.read_to_string(&mut buffer)?;
            buffer
        }
    };
    let sql = sql.trim().trim_end_matches(';');
    if sql.is_empty() {
        anyhow::bail!("no statement given");
    }

    let converted = if pretty {
        es_sql::convert_pretty(sql, &configuration)?
    } else {
        es_sql::convert(sql, &configuration)?
    };
    tracing::info!(index = %converted.index, "converted statement");

    Ok(Output {
        stdout: Some(converted.dsl),
        stderr: show_index.then_some(converted.index),
    })
}

fn initialize(context_path: &Path) -> anyhow::Result<Output> {
    let initial = configuration::ParsedConfiguration::initial();
    configuration::write_parsed_configuration(&initial, context_path)?;
    Ok(Output {
        stdout: None,
        stderr: Some(format!(
            "Wrote a default configuration to {}",
            context_path.display()
        )),
    })
}
