//! HTML content extraction
//!
//! Pulls the article body and page metadata out of raw markup using CSS
//! selectors. Pure: no network access, never fails. Missing pieces come back
//! as empty fields and the caller decides whether that is good enough.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::debug;

use super::normalize::normalize_text;
use super::types::ScrapedContent;

/// Elements removed before the content region is chosen
pub const NOISE_SELECTORS: &[&str] = &[
    "script",
    "style",
    "noscript",
    "iframe",
    "nav",
    "header",
    "footer",
    "aside",
    ".sidebar",
    ".nav",
    ".menu",
    ".comments",
    ".ad",
    ".advertisement",
    "form",
];

/// Candidate content regions. Every candidate is evaluated and the longest
/// text wins; ties keep the earlier candidate.
pub const CONTENT_SELECTORS: &[&str] = &[
    "article",
    ".post-content",
    ".article-content",
    ".entry-content",
    ".content",
    "main",
    "#content",
    ".post",
    ".article",
    ".blog-post",
    ".post-body",
    ".story-body",
    ".entry",
    ".single-post",
    ".blog-content",
    ".article-body",
    ".post-text",
    ".content-area",
    ".main-content",
    "[role='main']",
    ".entry-summary",
    ".post-excerpt",
];

/// Extract title, metadata and normalized body text from HTML
pub fn extract_content(html: &str) -> ScrapedContent {
    let mut document = Html::parse_document(html);

    // Metadata comes from the untouched document; an author byline may well
    // live inside a header that noise removal drops.
    let title = first_text(&document, "title")
        .or_else(|| first_text(&document, "h1"))
        .unwrap_or_default();
    let description = first_attr(&document, r#"meta[name="description"]"#, "content")
        .or_else(|| first_attr(&document, r#"meta[property="og:description"]"#, "content"));
    let date = first_attr(&document, r#"meta[property="article:published_time"]"#, "content")
        .or_else(|| first_attr(&document, "time[datetime]", "datetime"));
    let author = first_attr(&document, r#"meta[name="author"]"#, "content")
        .or_else(|| first_attr(&document, r#"meta[property="article:author"]"#, "content"))
        .or_else(|| first_text(&document, ".author"));

    let removed = remove_noise(&mut document);

    let raw_body = match select_main_region(&document) {
        Some((selector, text)) => {
            debug!("Content region '{}' selected ({} chars)", selector, text.chars().count());
            text
        }
        None => {
            debug!("No content region matched, falling back to <body>");
            body_text(&document)
        }
    };
    let content = normalize_text(&raw_body);

    debug!(
        "Extracted '{}': {} chars of content, {} noise elements removed",
        title,
        content.chars().count(),
        removed
    );

    ScrapedContent {
        title,
        content,
        description,
        author,
        date,
    }
}

/// Detach every element matching [`NOISE_SELECTORS`]. Returns how many were removed.
pub fn remove_noise(document: &mut Html) -> usize {
    let mut ids = Vec::new();
    let mut seen = HashSet::new();
    for selector_str in NOISE_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.root_element().select(&selector) {
                if seen.insert(element.id()) {
                    ids.push(element.id());
                }
            }
        }
    }

    let mut removed = 0;
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
            removed += 1;
        }
    }
    removed
}

/// Longest trimmed text among the first match of each content selector
///
/// Searches from the root element so detached noise is never visited.
pub fn select_main_region(document: &Html) -> Option<(&'static str, String)> {
    let root = document.root_element();
    let mut best: Option<(&'static str, String, usize)> = None;

    for &selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        let Some(element) = root.select(&selector).next() else {
            continue;
        };

        let text = element_text(&element);
        let len = text.chars().count();
        if len == 0 {
            continue;
        }
        if best.as_ref().map_or(true, |(_, _, best_len)| len > *best_len) {
            best = Some((selector_str, text, len));
        }
    }

    best.map(|(selector, text, _)| (selector, text))
}

/// Trimmed text of `<body>`, or empty when there is none
fn body_text(document: &Html) -> String {
    Selector::parse("body")
        .ok()
        .and_then(|selector| document.root_element().select(&selector).next())
        .map(|body| element_text(&body))
        .unwrap_or_default()
}

/// Elements whose boundaries separate words
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Text of an element, trimmed
///
/// Inline markup is concatenated as written, so `Rust<em>aceans</em>` stays
/// one word; block boundaries become spaces.
fn element_text(element: &ElementRef) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out.trim().to_string()
}

fn collect_text(element: &ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let block = BLOCK_ELEMENTS.contains(&child.value().name());
            if block {
                out.push(' ');
            }
            collect_text(&child, out);
            if block {
                out.push(' ');
            }
        }
    }
}

/// Whitespace-collapsed text of the first match, if non-empty
fn first_text(document: &Html, selector_str: &str) -> Option<String> {
    let selector = Selector::parse(selector_str).ok()?;
    let element = document.select(&selector).next()?;
    let text = element_text(&element);
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

/// Trimmed attribute of the first match, if non-empty
fn first_attr(document: &Html, selector_str: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector_str).ok()?;
    let value = document.select(&selector).next()?.value().attr(attr)?.trim();
    (!value.is_empty()).then(|| value.to_string())
}
