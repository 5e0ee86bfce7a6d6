//! Front end over a [`SpellcheckerEngine`].
//!
//! A [`SpellChecker`] owns one engine handle plus the settings needed to
//! pick a default dictionary. The first call that needs a dictionary loads
//! it; the load happens at most once per checker, whether it succeeds or
//! not. Callers who prefer a predictable startup can call
//! [`SpellChecker::initialize`] up front or set `eager_init` in the config.

use crate::engine::{tokenizer, MisspelledRange, SpellcheckerEngine, WordListEngine};
use crate::error::{Error, Result};
use crate::{locale, paths, Config};
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};
use tokio::sync::oneshot;

/// Directory used by `set_dictionary` and `get_available_dictionaries` when
/// the caller does not name one.
const CURRENT_DIR: &str = ".";

pub struct SpellChecker {
    engine: Arc<dyn SpellcheckerEngine>,
    language: Option<String>,
    dictionary_dir: Option<PathBuf>,
    personal_dictionary: Option<PathBuf>,
    init: Once,
}

impl SpellChecker {
    /// Build a checker over the bundled word-list engine.
    pub fn new(config: &Config) -> Self {
        let engine = Arc::new(WordListEngine::new(config.max_suggestions));
        Self::with_engine(engine, config)
    }

    /// Build a checker over any engine.
    pub fn with_engine(engine: Arc<dyn SpellcheckerEngine>, config: &Config) -> Self {
        let checker = Self {
            engine,
            language: config.language.clone(),
            dictionary_dir: config.dictionary_dir.clone(),
            personal_dictionary: config.personal_dictionary.clone(),
            init: Once::new(),
        };

        if config.eager_init {
            checker.initialize();
        }

        checker
    }

    /// Load the default dictionary now rather than on first use.
    pub fn initialize(&self) {
        self.ensure_default_spell_check(None);
    }

    /// Load the default dictionary unless this checker already tried.
    ///
    /// `language` wins over the configured language, which wins over
    /// `$LANG`. Any encoding suffix is stripped before the engine sees it.
    /// Once this has run, later calls do nothing, even if the load failed.
    pub fn ensure_default_spell_check(&self, language: Option<&str>) {
        self.init.call_once(|| {
            let env = locale::env_language();
            let language = locale::resolve(language, self.language.as_deref(), env.as_deref());
            let dir = self.dictionary_dir();

            log::debug!(
                "loading default dictionary '{}' from {}",
                language,
                dir.display()
            );

            if self.engine.set_dictionary(&language, &dir) {
                self.load_personal_dictionary();
            } else {
                log::warn!(
                    "default dictionary '{}' unavailable in {}",
                    language,
                    dir.display()
                );
            }
        });
    }

    /// Whether the default dictionary load has already run.
    pub fn is_initialized(&self) -> bool {
        self.init.is_completed()
    }

    /// Directory the default dictionary is loaded from.
    ///
    /// A configured directory takes precedence over the packaged one.
    pub fn dictionary_dir(&self) -> PathBuf {
        self.dictionary_dir
            .clone()
            .unwrap_or_else(paths::dictionary_path)
    }

    /// Packaged dictionary location, resolved afresh on every call.
    pub fn dictionary_path() -> PathBuf {
        paths::dictionary_path()
    }

    /// Switch dictionaries directly. This does not count as the default
    /// load, so a later first use still runs it.
    pub fn set_dictionary(&self, language: &str, directory: Option<&Path>) -> bool {
        let directory = directory.unwrap_or_else(|| Path::new(CURRENT_DIR));
        self.engine.set_dictionary(language, directory)
    }

    pub fn is_misspelled(&self, word: &str) -> bool {
        self.ensure_default_spell_check(None);
        self.engine.is_misspelled(word)
    }

    pub fn add(&self, word: &str) {
        self.ensure_default_spell_check(None);
        self.engine.add(word);
    }

    pub fn batch_add(&self, words: &[String]) {
        self.ensure_default_spell_check(None);
        self.engine.batch_add(words);
    }

    pub fn remove(&self, word: &str) {
        self.ensure_default_spell_check(None);
        self.engine.remove(word);
    }

    pub fn get_corrections_for_misspelling(&self, word: &str) -> Vec<String> {
        self.ensure_default_spell_check(None);
        self.engine.get_corrections_for_misspelling(word)
    }

    pub fn get_available_dictionaries(&self, directory: Option<&Path>) -> Vec<String> {
        self.ensure_default_spell_check(None);
        let directory = directory.unwrap_or_else(|| Path::new(CURRENT_DIR));
        self.engine.get_available_dictionaries(directory)
    }

    /// Misspelled words in `text`, as UTF-16 code-unit ranges.
    pub fn check_spelling(&self, text: &str) -> Vec<MisspelledRange> {
        self.ensure_default_spell_check(None);
        self.engine.check_spelling(&tokenizer::encode(text))
    }

    /// Check `text` on the engine's worker and resolve once with the result.
    ///
    /// The check is dispatched before this returns; the future only waits
    /// for the answer. It fails if the engine reports an error or drops its
    /// callback without answering.
    pub fn check_spelling_async(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<MisspelledRange>>> + Send + 'static {
        self.ensure_default_spell_check(None);

        let (tx, rx) = oneshot::channel();
        Arc::clone(&self.engine).check_spelling_async(
            tokenizer::encode(text),
            Box::new(move |result| {
                // The receiver is gone only if the caller dropped the future.
                let _ = tx.send(result);
            }),
        );

        async move { rx.await.map_err(|_| Error::WorkerDropped)? }
    }

    fn load_personal_dictionary(&self) {
        let Some(path) = &self.personal_dictionary else {
            return;
        };
        if !path.exists() {
            return;
        }

        match fs::read_to_string(path) {
            Ok(content) => {
                let words = parse_personal_words(&content);
                log::debug!("adding {} personal words from {}", words.len(), path.display());
                self.engine.batch_add(&words);
            }
            Err(e) => log::warn!("failed to read personal dictionary {}: {}", path.display(), e),
        }
    }
}

/// One word per line; blank lines and `#` comments are skipped.
pub fn parse_personal_words(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
