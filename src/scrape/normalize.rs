//! Text normalization for extracted page content
//!
//! Turns raw element text into clean prose. Each step is a pure rewrite and
//! the steps run in a fixed order:
//!
//! 1. collapse whitespace runs (newlines included) to a single space
//! 2. strip bare URLs
//! 3. strip HTML entity residues (`&amp;`, `&#8217;`, ...)
//! 4. replace characters outside word characters, whitespace, punctuation
//!    and quotes with a space
//! 5. collapse `..`+ to `...`, `!!`+ to `!`, `??`+ to `?`
//! 6. put exactly one space between punctuation and a following letter
//! 7. re-collapse whitespace and trim
//!
//! URL and entity stripping run before the character filter, otherwise the
//! filter would break them into fragments the later patterns no longer match.
//! The output is a fixed point: normalizing it again returns it unchanged.

use regex::Regex;
use std::sync::OnceLock;

/// Compiled normalization patterns
pub struct TextNormalizer {
    whitespace: Regex,
    url: Regex,
    entity: Regex,
    disallowed: Regex,
    dots: Regex,
    bangs: Regex,
    questions: Regex,
    sentence_gap: Regex,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            whitespace: Regex::new(r"\s+").expect("whitespace pattern"),
            url: Regex::new(r"https?://\S+").expect("url pattern"),
            entity: Regex::new(r"&(?:[a-zA-Z]+|#[0-9]+|#[xX][0-9a-fA-F]+);").expect("entity pattern"),
            // Word characters are ASCII only
            disallowed: Regex::new(r#"[^A-Za-z0-9_\s.,?!;:()"'\-]"#).expect("character filter pattern"),
            dots: Regex::new(r"\.{2,}").expect("dots pattern"),
            bangs: Regex::new(r"!{2,}").expect("bangs pattern"),
            questions: Regex::new(r"\?{2,}").expect("questions pattern"),
            sentence_gap: Regex::new(r"([.,!?;:])\s*([A-Za-z])").expect("sentence gap pattern"),
        }
    }

    /// Normalize `text` into clean single-spaced prose
    pub fn normalize(&self, text: &str) -> String {
        let text = self.whitespace.replace_all(text, " ");
        let text = self.url.replace_all(&text, "");
        let text = self.entity.replace_all(&text, " ");
        let text = self.disallowed.replace_all(&text, " ");
        let text = self.dots.replace_all(&text, "...");
        let text = self.bangs.replace_all(&text, "!");
        let text = self.questions.replace_all(&text, "?");
        let text = self.sentence_gap.replace_all(&text, "$1 $2");
        let text = self.whitespace.replace_all(&text, " ");
        text.trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize text with a shared, lazily compiled normalizer
pub fn normalize_text(text: &str) -> String {
    static NORMALIZER: OnceLock<TextNormalizer> = OnceLock::new();
    NORMALIZER.get_or_init(TextNormalizer::new).normalize(text)
}
