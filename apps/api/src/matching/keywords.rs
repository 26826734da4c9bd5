//! Keyword-set builder: turns free text into the normalized token set the
//! scorer compares.

use std::collections::BTreeSet;

use regex::Regex;

/// A letter followed by letters, digits, `_`, `-`, `+` or `.`, so "c++",
/// "node.js" and "ci-cd" survive as single tokens.
pub const TOKEN_PATTERN: &str = r"[A-Za-z][A-Za-z0-9_\-+.]*";

/// Tokens shorter than this are dropped.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Common English function words that carry no signal for matching.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "of", "to", "a", "in", "for", "on", "with", "at", "by", "an", "be", "as", "is",
    "are", "that", "this", "from", "or", "it", "you", "your", "our", "we", "will", "have", "has",
    "i", "he", "she", "they", "them", "their", "his", "her",
];

/// Deduplicated, lowercased keywords. Ordered so that set algebra yields
/// sorted lists without an extra sort.
pub type KeywordSet = BTreeSet<String>;

/// Compiled tokenizer. Built once at startup and shared through `AppState`.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    token_re: Regex,
    stopwords: BTreeSet<&'static str>,
}

impl KeywordExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            token_re: Regex::new(TOKEN_PATTERN)?,
            stopwords: STOPWORDS.iter().copied().collect(),
        })
    }

    /// Lowercased tokens in text order, with short words and stopwords removed.
    pub fn tokenize<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.token_re
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .filter(|w| w.chars().count() >= MIN_KEYWORD_LEN)
            .filter(|w| !self.is_stopword(w))
    }

    pub fn keywords(&self, text: &str) -> KeywordSet {
        self.tokenize(text).collect()
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}
