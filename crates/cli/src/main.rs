use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use es_sql_cli::{run, Command};

/// Translate SQL into search requests.
#[derive(Parser)]
#[command(name = "es-sql", version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

pub fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    match run(args.command, std::io::stdin()) {
        Ok(output) => {
            if let Some(stdout) = output.stdout {
                println!("{stdout}");
            }
            if let Some(stderr) = output.stderr {
                eprintln!("{stderr}");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
