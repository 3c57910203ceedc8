mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Skypaper sets the astronomy picture of the day as your desktop background
#[derive(Parser)]
#[command(name = "skypaper", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the picture for a date, cache it, and set the desktop background
    Update {
        /// Directory in which downloaded images are cached
        image_dir: PathBuf,
        /// Picture date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// NASA API key
        #[arg(long, default_value_t = default_api_key())]
        api_key: String,
    },
    /// List previously cached images
    History {
        /// Directory in which downloaded images are cached
        image_dir: PathBuf,
    },
}

fn default_api_key() -> String {
    std::env::var("NASA_API_KEY").unwrap_or_else(|_| "DEMO_KEY".to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Update {
            image_dir,
            date,
            api_key,
        } => commands::update::run(&image_dir, date.as_deref(), &api_key)?,
        Commands::History { image_dir } => commands::history::run(&image_dir)?,
    }

    Ok(())
}
