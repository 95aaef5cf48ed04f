//! QwickApps CLI - validate, round-trip and render component documents.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;
mod documents;

use config::Config;

#[derive(Parser)]
#[command(name = "qwickapps")]
#[command(about = "Validate, round-trip and render QwickApps component documents")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to qwickapps.toml config file
    #[arg(short, long, default_value = "qwickapps.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a documents project in the current directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Check that every document deserializes against the standard components
    Validate {
        /// File or directory to check (defaults to the configured documents dir)
        path: Option<PathBuf>,
    },

    /// Deserialize and re-serialize a document, printing the canonical form
    Roundtrip {
        /// Document to round-trip
        file: PathBuf,

        /// Write the canonical document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a document to static HTML
    Render {
        /// Document to render
        file: PathBuf,

        /// Hide data-binding errors instead of rendering them inline
        #[arg(long)]
        production: bool,

        /// Write HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Init { yes } = cli.command {
        return commands::init::run(&std::env::current_dir()?, &cli.config, yes).await;
    }

    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Init { .. } => {}
        Commands::Validate { path } => {
            commands::validate::run(&config, path).await?;
        }
        Commands::Roundtrip { file, output } => {
            commands::roundtrip::run(&file, output).await?;
        }
        Commands::Render {
            file,
            production,
            output,
        } => {
            commands::render::run(&config, &file, production, output).await?;
        }
    }

    Ok(())
}
