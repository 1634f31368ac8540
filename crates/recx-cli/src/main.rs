//! CLI application for receipt extraction.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, extract, schema};

/// Receipt extraction - Turn HTML and PDF receipts into one CSV table
#[derive(Parser)]
#[command(name = "recx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Command to run (default: extract)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every receipt in a directory into one CSV file
    Extract(extract::ExtractArgs),

    /// Show the loaded output schema
    Schema(schema::SchemaArgs),

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
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Some(Commands::Extract(args)) => extract::run(args, cli.config.as_deref()),
        Some(Commands::Schema(args)) => schema::run(args, cli.config.as_deref()),
        Some(Commands::Config(args)) => config::run(args, cli.config.as_deref()),
        None => extract::run(extract::ExtractArgs::default(), cli.config.as_deref()),
    }
}
