use crate::error::{Error, Result};
use fst::automaton::Levenshtein;
use fst::{IntoStreamer, Set, Streamer};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of Hunspell word lists.
pub const DIC_EXTENSION: &str = "dic";

/// Word list loaded from a Hunspell `.dic` file.
///
/// Only stems are kept: affix flags and morphological fields are dropped,
/// so inflected forms must be listed explicitly to be accepted.
pub struct Dictionary {
    language: String,
    path: PathBuf,
    set: Set<Vec<u8>>,
}

impl Dictionary {
    /// Load the dictionary for `language` from `dir`.
    ///
    /// `en-US` and `en_US` are treated as the same tag when only one of the
    /// two files exists.
    pub fn load(language: &str, dir: &Path) -> Result<Self> {
        let path = Self::locate(language, dir).ok_or_else(|| Error::DictionaryNotFound {
            language: language.to_string(),
            dir: dir.to_path_buf(),
        })?;

        let mut dict = Self::load_from_path(&path)?;
        dict.language = language.to_string();
        Ok(dict)
    }

    /// Load a dictionary from a specific `.dic` file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::DictionaryRead {
            path: path.to_path_buf(),
            source,
        })?;

        let set = Self::build_set(parse_dic(&content))?;
        let language = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        log::debug!("loaded {} words from {}", set.len(), path.display());

        Ok(Self {
            language,
            path: path.to_path_buf(),
            set,
        })
    }

    /// Build an in-memory dictionary from a word list.
    pub fn from_words<I, S>(language: &str, words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            language: language.to_string(),
            path: PathBuf::new(),
            set: Self::build_set(words.into_iter().map(Into::into).collect())?,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Check if word exists in dictionary
    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.as_bytes())
    }

    /// Words within `distance` edits of `word`.
    pub fn within_distance(&self, word: &str, distance: u32) -> Vec<String> {
        let automaton = match Levenshtein::new(word, distance) {
            Ok(automaton) => automaton,
            Err(e) => {
                log::debug!("skipping suggestions for '{}': {}", word, e);
                return Vec::new();
            }
        };

        let mut results = Vec::new();
        let mut stream = self.set.search(&automaton).into_stream();
        while let Some(key) = stream.next() {
            if let Ok(candidate) = String::from_utf8(key.to_vec()) {
                results.push(candidate);
            }
        }
        results
    }

    /// Path of the `.dic` file for `language` in `dir`, if present.
    pub fn locate(language: &str, dir: &Path) -> Option<PathBuf> {
        let swapped = if language.contains('-') {
            language.replace('-', "_")
        } else {
            language.replace('_', "-")
        };

        let found = [language, swapped.as_str()]
            .into_iter()
            .map(|tag| dir.join(format!("{tag}.{DIC_EXTENSION}")))
            .find(|path| path.is_file());
        found
    }

    fn build_set(mut words: Vec<String>) -> Result<Set<Vec<u8>>> {
        words.sort();
        words.dedup();
        Ok(Set::from_iter(words)?)
    }
}

/// Extract the stems of a Hunspell `.dic` file.
///
/// The first line holds an approximate word count and is skipped when it
/// parses as a number. A `/` starts the affix flags unless escaped as `\/`.
pub fn parse_dic(content: &str) -> Vec<String> {
    let mut lines = content.lines().peekable();
    if let Some(first) = lines.peek() {
        if first.trim().parse::<usize>().is_ok() {
            lines.next();
        }
    }

    lines.filter_map(parse_dic_line).collect()
}

fn parse_dic_line(line: &str) -> Option<String> {
    let line = line.trim_end_matches('\r');
    // Indented lines are comments in Hunspell word lists.
    if line.starts_with('\t') || line.starts_with('#') {
        return None;
    }

    let entry = line.split_whitespace().next()?;
    let mut word = String::with_capacity(entry.len());
    let mut chars = entry.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('/') => word.push('/'),
                Some(other) => {
                    word.push('\\');
                    word.push(other);
                }
                None => word.push('\\'),
            },
            '/' => break,
            _ => word.push(ch),
        }
    }

    (!word.is_empty()).then_some(word)
}
