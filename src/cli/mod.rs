pub mod commands;
pub mod render;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "campus")]
#[command(about = "Campus CLI - browse department branches, years and subject content")]
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
    #[command(about = "Browse branches")]
    Branches {
        #[command(subcommand)]
        cmd: commands::branches::BranchesCommands,
    },

    #[command(about = "Browse a branch's years and subjects")]
    Years {
        #[command(subcommand)]
        cmd: commands::years::YearsCommands,
    },

    #[command(about = "Subject content and faculty uploads")]
    Subject {
        #[command(subcommand)]
        cmd: commands::subject::SubjectCommands,
    },

    #[command(about = "Authentication and token management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Faculty dashboard")]
    Faculty {
        #[command(subcommand)]
        cmd: commands::faculty::FacultyCommands,
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

    match cli.command {
        Commands::Branches { cmd } => commands::branches::handle(cmd, output_format).await,
        Commands::Years { cmd } => commands::years::handle(cmd, output_format).await,
        Commands::Subject { cmd } => commands::subject::handle(cmd, output_format).await,
        Commands::Auth { cmd } => commands::auth::handle(cmd, output_format).await,
        Commands::Faculty { cmd } => commands::faculty::handle(cmd, output_format).await,
    }
}
