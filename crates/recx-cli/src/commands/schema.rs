//! Schema command - show the output columns a schema file declares.

use std::path::PathBuf;

use clap::Args;
use console::style;

use recx_core::load_schema;

use super::load_config;

/// Arguments for the schema command.
#[derive(Args)]
pub struct SchemaArgs {
    /// Schema spreadsheet (default from config: schema.xlsx)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Print the schema as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SchemaArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let schema_path = args.schema.unwrap_or(config.input.schema_path);

    let schema = load_schema(&schema_path)
        .map_err(|e| anyhow::anyhow!("Failed to load schema {}: {}", schema_path.display(), e))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    for entry in schema.entries() {
        println!("{}\t{}", entry.name, entry.data_type);
    }
    eprintln!(
        "{} {} columns from {}",
        style("ℹ").blue(),
        schema.len(),
        schema_path.display()
    );

    Ok(())
}
