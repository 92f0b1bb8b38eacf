//! Atlas Control - CLI client for the Atlas assistant
//!
//! Sends queries to atlasd, or routes them in-process with --local.

mod client;
mod commands;
mod output;

use anyhow::Result;
use atlas_common::config::CONFIG_PATH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "atlasctl")]
#[command(about = "Atlas Assistant - routes questions to weather, fact and math agents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question
    Ask {
        /// The question, e.g. "What's the weather in Paris?"
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,

        /// Route in-process instead of calling atlasd
        #[arg(long)]
        local: bool,

        /// atlasd base URL
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },

    /// Run the built-in demonstration queries
    Demo {
        /// Route in-process instead of calling atlasd
        #[arg(long)]
        local: bool,

        /// atlasd base URL
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },

    /// Write a default config file
    InitConfig {
        /// Destination path
        #[arg(long, default_value = CONFIG_PATH)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ask {
            words,
            local,
            server,
        } => commands::ask(words.join(" "), local, &server).await,
        Commands::Demo { local, server } => commands::demo(local, &server).await,
        Commands::InitConfig { path, force } => commands::init_config(&path, force),
    }
}
