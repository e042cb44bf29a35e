// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Blog-to-infographic CLI
#[derive(Parser, Debug)]
#[command(name = "infographic-cli")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Turn a blog post or prompt into an AI-generated infographic", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an infographic and save it to the output directory
    Generate(commands::GenerateArgs),

    /// Extract and print the main content of a page
    Scrape(commands::ScrapeArgs),

    /// Print the prompt that would be sent to the image model
    Prompt(commands::PromptArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => commands::generate(args).await,
        Commands::Scrape(args) => commands::scrape(args).await,
        Commands::Prompt(args) => commands::prompt(args).await,
    }
}
