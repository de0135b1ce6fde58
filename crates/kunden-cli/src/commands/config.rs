//! Config command - inspect and create the configuration file.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use kunden_core::models::config::KundenConfig;

use super::resolve_data_dir;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with the default settings
    Init(InitArgs),

    /// Show the configuration file and data directory locations
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for the configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed the store data directory in the generated file
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(),
        ConfigCommand::Init(init_args) => init_config(init_args),
        ConfigCommand::Path => show_path(),
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kunden")
        .join("config.json")
}

/// Print the settings that the other commands will actually run with,
/// section by section, with the config file falling back to defaults.
fn show_config() -> anyhow::Result<()> {
    let config_path = default_config_path();

    let config = if config_path.exists() {
        KundenConfig::from_file(&config_path)?
    } else {
        println!(
            "{} No config file at {}, showing defaults.",
            style("ℹ").blue(),
            config_path.display()
        );
        KundenConfig::default()
    };

    println!("pdf:");
    println!("  timeout_secs:   {}", config.pdf.timeout_secs);
    println!("  max_text_bytes: {}", config.pdf.max_text_bytes);
    println!("import:");
    println!("  skip_duplicates: {}", config.import.skip_duplicates);
    println!("  copy_files:      {}", config.import.copy_files);
    println!("store:");
    println!(
        "  data_dir: {}",
        resolve_data_dir(None, &config).display()
    );

    Ok(())
}

fn init_config(args: InitArgs) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(default_config_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut config = KundenConfig::default();
    config.store.data_dir = args.data_dir;
    config.save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn show_path() -> anyhow::Result<()> {
    let config_path = default_config_path();

    let status = if config_path.exists() {
        style("exists").green()
    } else {
        style("not created").yellow()
    };
    println!("Configuration file: {} ({})", config_path.display(), status);

    let config = if config_path.exists() {
        KundenConfig::from_file(&config_path)?
    } else {
        KundenConfig::default()
    };
    println!(
        "Data directory:     {}",
        resolve_data_dir(None, &config).display()
    );

    if !config_path.exists() {
        println!();
        println!("Run 'kunden config init' to create a configuration file.");
    }

    Ok(())
}
