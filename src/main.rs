use clap::{Parser as ClapParser, Subcommand};
use dml_lang::cli::{self, CheckMode, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(ClapParser)]
#[command(name = "dml")]
#[command(about = "dml - check and canonicalize SET/DELETE change-event statements")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate DML statements
    Check {
        /// DML source (reads from stdin if not provided)
        source: Option<String>,
    },

    /// Print statements in canonical form
    Fmt {
        /// DML source (reads from stdin if not provided)
        source: Option<String>,
    },

    /// Print parsed statements as JSON
    Json {
        /// DML source (reads from stdin if not provided)
        source: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { source } => run(source, CheckMode::Validate, false),
        Commands::Fmt { source } => run(source, CheckMode::Format, false),
        Commands::Json { source, pretty } => run(source, CheckMode::Json, pretty),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(source: Option<String>, mode: CheckMode, pretty: bool) -> Result<(), CliError> {
    let input = match source {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions { input, mode };

    match cli::execute_check(&options)? {
        CheckResult::Valid(count) => println!("{} statement(s) valid", count),
        CheckResult::Canonical(text) => println!("{}", text),
        CheckResult::Json(output) => {
            let json = if pretty {
                serde_json::to_string_pretty(&output)
            } else {
                serde_json::to_string(&output)
            }?;
            println!("{}", json);
        }
    }
    Ok(())
}
