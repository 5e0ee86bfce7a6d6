use super::dictionary::{Dictionary, DIC_EXTENSION};
use super::{suggestions, tokenizer, MisspelledRange, SpellcheckerEngine};
use dashmap::DashSet;
use parking_lot::RwLock;
use std::fs;
use std::path::Path;

/// Default number of corrections offered per word.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Engine backed by plain Hunspell word lists.
///
/// Words added or removed during the session survive dictionary switches.
/// Added words keep their case the way dictionary stems do: `add("rust")`
/// also accepts `Rust` and `RUST`, while `add("NASA")` accepts only `NASA`.
/// Removal ignores case, so `remove("Cat")` rejects every casing of `cat`.
pub struct WordListEngine {
    dictionary: RwLock<Option<Dictionary>>,
    added: DashSet<String>,
    removed: DashSet<String>,
    max_suggestions: usize,
}

impl WordListEngine {
    pub fn new(max_suggestions: usize) -> Self {
        Self {
            dictionary: RwLock::new(None),
            added: DashSet::new(),
            removed: DashSet::new(),
            max_suggestions,
        }
    }

    /// Language of the active dictionary.
    pub fn language(&self) -> Option<String> {
        self.dictionary
            .read()
            .as_ref()
            .map(|d| d.language().to_string())
    }

    /// Replace the active dictionary with one built elsewhere.
    pub fn install(&self, dictionary: Dictionary) {
        *self.dictionary.write() = Some(dictionary);
    }

    fn is_known(&self, dictionary: Option<&Dictionary>, word: &str) -> bool {
        let lower = word.to_lowercase();

        if self.removed.contains(&lower) {
            return false;
        }
        if self.added.contains(word) || self.added.contains(&lower) {
            return true;
        }

        dictionary.is_some_and(|d| d.contains(word) || d.contains(&lower))
    }
}

impl Default for WordListEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SUGGESTIONS)
    }
}

impl SpellcheckerEngine for WordListEngine {
    fn set_dictionary(&self, language: &str, directory: &Path) -> bool {
        match Dictionary::load(language, directory) {
            Ok(dictionary) => {
                self.install(dictionary);
                true
            }
            Err(e) => {
                log::warn!("could not load dictionary '{}': {}", language, e);
                false
            }
        }
    }

    fn is_misspelled(&self, word: &str) -> bool {
        let dictionary = self.dictionary.read();
        !self.is_known(dictionary.as_ref(), word)
    }

    fn add(&self, word: &str) {
        let word = word.trim();
        if word.is_empty() {
            return;
        }
        self.removed.remove(&word.to_lowercase());
        self.added.insert(word.to_string());
    }

    fn remove(&self, word: &str) {
        let word = word.trim();
        if word.is_empty() {
            return;
        }
        let lower = word.to_lowercase();
        self.added.retain(|added| added.to_lowercase() != lower);
        self.removed.insert(lower);
    }

    fn get_corrections_for_misspelling(&self, word: &str) -> Vec<String> {
        let dictionary = self.dictionary.read();
        let added: Vec<String> = self.added.iter().map(|w| w.key().clone()).collect();

        suggestions::generate(
            word,
            dictionary.as_ref(),
            added.iter().map(String::as_str),
            self.max_suggestions,
        )
        .into_iter()
        .filter(|candidate| !self.removed.contains(&candidate.to_lowercase()))
        .collect()
    }

    fn get_available_dictionaries(&self, directory: &Path) -> Vec<String> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("cannot list {}: {}", directory.display(), e);
                return Vec::new();
            }
        };

        let mut languages: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(DIC_EXTENSION))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect();

        languages.sort();
        languages
    }

    fn check_spelling(&self, corpus: &[u16]) -> Vec<MisspelledRange> {
        let dictionary = self.dictionary.read();

        tokenizer::words(corpus)
            .into_iter()
            .filter(|token| !self.is_known(dictionary.as_ref(), &token.text))
            .map(|token| MisspelledRange {
                start: token.start,
                end: token.end,
            })
            .collect()
    }
}
