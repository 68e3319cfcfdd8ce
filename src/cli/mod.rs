pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::console::Console;

#[derive(Parser)]
#[command(name = "kairowan")]
#[command(about = "Kairowan Console - session, permissions and navigation for the admin backend")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Authentication and session management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Navigation and route inspection")]
    Nav {
        #[command(subcommand)]
        cmd: commands::navigate::NavCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let console = Console::from_config()?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(&console, cmd, output_format).await,
        Commands::Nav { cmd } => commands::navigate::handle(&console, cmd, output_format).await,
    }
}
