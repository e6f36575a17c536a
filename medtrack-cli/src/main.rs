use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod models;
mod sync;

use commands::{ClearCommand, ConfigCommand, PersonCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "medtrack")]
#[command(version)]
#[command(about = "A personal medication tracker", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage people and their medications
    Person(PersonCommand),

    /// Delete all data on the server
    Clear(ClearCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medtrack=warn,medtrack_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Keep the explicit path for config init/show
    let cli_config_path = cli.config.clone();

    let config = Config::load(cli.config)?;

    match &cli.command {
        Some(Commands::Person(cmd)) => {
            cmd.run(&config)?;
        }
        Some(Commands::Clear(cmd)) => {
            cmd.run(&config)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config, cli_config_path)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
