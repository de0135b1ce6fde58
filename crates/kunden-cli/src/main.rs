//! CLI application for managing customer records extracted from German invoices.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, import, list, parse};

/// Kundenverwaltung - Extract customer records from German invoice PDFs
#[derive(Parser)]
#[command(name = "kunden")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract customer and job data from a single invoice PDF
    Parse(parse::ParseArgs),

    /// Import invoice PDFs as customer records
    Import(import::ImportArgs),

    /// List stored customers
    List(list::ListArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Parse(args) => parse::run(args, cli.config.as_deref()),
        Commands::Import(args) => import::run(args, cli.config.as_deref()),
        Commands::List(args) => list::run(args, cli.config.as_deref()),
        Commands::Config(args) => config::run(args),
    }
}
