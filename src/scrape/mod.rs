// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Page scraping: fetch a URL and extract its article content
//!
//! ## Architecture
//!
//! ```text
//! URL → HttpFetcher → HTML → extract_content → ScrapedContent
//!                               ├─ metadata (title, description, author, date)
//!                               ├─ noise removal
//!                               ├─ longest content region
//!                               └─ normalize_text
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let fetcher = HttpFetcher::new(&ScrapeConfig::from_env())?;
//! let html = fetcher.fetch_html("https://example.com/post").await?;
//! let content = extract_content(&html);
//! ```

pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod normalize;
pub mod types;

pub use config::ScrapeConfig;
pub use extractor::{extract_content, CONTENT_SELECTORS, NOISE_SELECTORS};
pub use fetcher::{validate_url, DocumentFetcher, HttpFetcher};
pub use normalize::{normalize_text, TextNormalizer};
pub use types::ScrapedContent;
