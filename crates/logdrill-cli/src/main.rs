//! logdrill CLI: drill logarithm tables from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use logdrill_core::Mode;

mod commands;

#[derive(Parser)]
#[command(name = "logdrill", version, about = "Logarithm table drill trainer")]
struct Cli {
    /// Log session details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive drill session
    Drill {
        /// First table index (1 = 1.01)
        #[arg(long)]
        min: Option<u32>,

        /// Last table index (100 = 2.00)
        #[arg(long)]
        max: Option<u32>,

        /// Drill mode: normal, shuffled, reverse
        #[arg(long)]
        mode: Option<Mode>,

        /// Pause before outstanding queries are asked again
        #[arg(long)]
        retry_delay_ms: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the logarithm table
    Table {
        /// First table index
        #[arg(long, default_value = "1")]
        min: u32,

        /// Last table index
        #[arg(long, default_value = "100")]
        max: u32,

        /// Significant digits shown for each logarithm
        #[arg(long, default_value = "5")]
        digits: usize,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check a single answer
    Check {
        /// Table index the answer belongs to
        #[arg(long)]
        index: u32,

        /// The answer to check
        #[arg(long, allow_hyphen_values = true)]
        answer: String,

        /// Check an argument for the index's logarithm instead
        #[arg(long)]
        reverse: bool,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "logdrill=debug"
    } else {
        "logdrill=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Drill {
            min,
            max,
            mode,
            retry_delay_ms,
            config,
        } => commands::drill::execute(min, max, mode, retry_delay_ms, config).await,
        Commands::Table {
            min,
            max,
            digits,
            format,
        } => commands::table::execute(min, max, digits, format),
        Commands::Check {
            index,
            answer,
            reverse,
        } => commands::check::execute(index, answer, reverse),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
