use std::path::Path;

use anyhow::{Context, Result, anyhow};
use rand::Rng;
use tracing::info;

/// The answer pool: a newline-separated word file filtered down to the
/// configured word length.
pub struct WordList {
    words: Vec<String>,
    word_length: usize,
}

impl WordList {
    /// Parse a newline-separated list. Entries are trimmed and lowercased;
    /// blanks, `#` comments and words of the wrong length are dropped.
    pub fn parse(raw: &str, word_length: usize) -> Self {
        let words = raw
            .lines()
            .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
            .map(|word| word.trim().to_lowercase())
            .filter(|word| word.chars().count() == word_length)
            .collect();

        Self { words, word_length }
    }

    pub fn load<P: AsRef<Path>>(path: P, word_length: usize) -> Result<Self> {
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("reading word list {}", path.as_ref().display()))?;
        let list = Self::parse(&raw, word_length);
        info!(
            "loaded {} {}-letter words from {}",
            list.len(),
            word_length,
            path.as_ref().display()
        );
        Ok(list)
    }

    pub fn random_word(&self) -> Result<String> {
        if self.words.is_empty() {
            return Err(anyhow!(
                "no {}-letter words available",
                self.word_length
            ));
        }
        let index = rand::rng().random_range(0..self.words.len());
        Ok(self.words[index].clone())
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
