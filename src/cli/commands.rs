// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::InfographicConfig;
use crate::errors::InfographicError;
use crate::generation::{FalQueueClient, ImageQuality, ImageSize};
use crate::orchestrator::{DirectoryHost, InfographicOrchestrator};
use crate::prompt::PromptSynthesizer;
use crate::scrape::{extract_content, DocumentFetcher, HttpFetcher};

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Blog post to turn into an infographic
    #[arg(long)]
    pub url: Option<String>,

    /// Custom instructions, used alone or on top of the page
    #[arg(long)]
    pub prompt: Option<String>,

    /// Image size: 1024x1536 (portrait), 1024x1024 (square) or 1536x1024 (landscape)
    #[arg(long, default_value = "1024x1536")]
    pub size: ImageSize,

    /// Image quality: low, medium or high
    #[arg(long, default_value = "high")]
    pub quality: ImageQuality,

    /// Directory the generated image is saved into
    #[arg(long, env = "INFOGRAPHIC_OUTPUT_DIR", default_value = "infographics")]
    pub output_dir: PathBuf,

    /// Only print the image URL, don't download it
    #[arg(long)]
    pub no_save: bool,
}

/// Arguments for the scrape command
#[derive(Args, Debug)]
pub struct ScrapeArgs {
    /// Page to extract
    #[arg(long)]
    pub url: String,
}

/// Arguments for the prompt command
#[derive(Args, Debug)]
pub struct PromptArgs {
    /// Page to build the prompt from
    #[arg(long)]
    pub url: Option<String>,

    /// Custom instructions
    #[arg(long)]
    pub prompt: Option<String>,
}

fn load_config() -> Result<InfographicConfig> {
    dotenv::dotenv().ok();
    let config = InfographicConfig::from_env();
    config.validate()?;
    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// Run the full pipeline and optionally save the image
pub async fn generate(args: GenerateArgs) -> Result<()> {
    let config = load_config()?;
    if !config.backend.has_credentials() {
        return Err(anyhow!("FAL_KEY is not set. Export it or add it to .env"));
    }

    let fetcher = Arc::new(HttpFetcher::new(&config.scrape)?);
    let backend = Arc::new(FalQueueClient::new(config.backend.clone())?);
    let host = Arc::new(DirectoryHost::new(args.output_dir.clone()));

    let orchestrator = InfographicOrchestrator::new(
        fetcher,
        backend,
        host.clone(),
        PromptSynthesizer::new(config.prompt.clone()),
        config.orchestrator.clone(),
    );

    orchestrator.set_url(args.url.unwrap_or_default());
    orchestrator.set_custom_prompt(args.prompt.unwrap_or_default());
    orchestrator.set_size(args.size);
    orchestrator.set_quality(args.quality);

    let mut updates = orchestrator.subscribe();
    let progress = tokio::spawn(async move {
        let mut last_shown: Option<String> = None;
        while updates.changed().await.is_ok() {
            let current = updates.borrow_and_update().progress().map(str::to_string);
            if let Some(label) = &current {
                if last_shown.as_ref() != Some(label) {
                    println!("⏳ {}", label);
                }
            }
            last_shown = current;
        }
    });

    let result = orchestrator.generate().await;
    let artifact = match result {
        Ok(artifact) => artifact,
        Err(e) => {
            progress.abort();
            return Err(anyhow!(e.user_message()));
        }
    };

    println!("{}", serde_json::to_string_pretty(&artifact)?);

    if !args.no_save {
        orchestrator
            .add_to_canvas()
            .await
            .map_err(|e| anyhow!(e.user_message()))?;
        if let Some(path) = host.last_written() {
            println!("💾 Saved to {}", path.display());
        }
    }

    progress.abort();
    info!("Done");
    Ok(())
}

/// Print the extracted content of a page
pub async fn scrape(args: ScrapeArgs) -> Result<()> {
    let config = load_config()?;
    let fetcher = HttpFetcher::new(&config.scrape)?;

    let html = fetcher
        .fetch_html(&args.url)
        .await
        .map_err(|e| anyhow!(e.user_message()))?;
    let content = extract_content(&html);

    info!(
        "Extracted {} chars (title: {:?})",
        content.content_chars(),
        content.title
    );
    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(())
}

/// Print the prompt for a page and/or custom instructions
pub async fn prompt(args: PromptArgs) -> Result<()> {
    let config = load_config()?;
    let url = args.url.as_deref().map(str::trim).filter(|u| !u.is_empty());
    let custom = args.prompt.as_deref().map(str::trim).filter(|p| !p.is_empty());

    if url.is_none() && custom.is_none() {
        return Err(anyhow!(InfographicError::EmptyInput.user_message()));
    }

    let scraped = match url {
        Some(url) => {
            let fetcher = HttpFetcher::new(&config.scrape)?;
            let html = fetcher
                .fetch_html(url)
                .await
                .map_err(|e| anyhow!(e.user_message()))?;
            let content = extract_content(&html);
            if !content.is_sufficient(config.orchestrator.min_content_chars) {
                return Err(anyhow!(InfographicError::InsufficientContent {
                    found: content.content_chars(),
                    required: config.orchestrator.min_content_chars,
                }
                .user_message()));
            }
            Some(content)
        }
        None => None,
    };

    let request = PromptSynthesizer::new(config.prompt).synthesize(scraped.as_ref(), custom);
    println!("{}", request);
    if request.content_truncated() {
        eprintln!("(page content was truncated)");
    }
    Ok(())
}

