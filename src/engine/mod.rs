//! Spell-checking engines.
//!
//! [`SpellcheckerEngine`] is the surface a backend exposes to the
//! [`SpellChecker`](crate::SpellChecker) front end. It deals in raw UTF-16
//! corpora and never initializes itself: choosing and loading a dictionary
//! is always driven from outside through [`SpellcheckerEngine::set_dictionary`].

pub mod dictionary;
pub mod suggestions;
pub mod tokenizer;
mod wordlist;

pub use wordlist::{WordListEngine, DEFAULT_MAX_SUGGESTIONS};

use crate::error::{Error, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tokio::runtime::Handle;

/// A misspelled word, as a half-open range of UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MisspelledRange {
    pub start: usize,
    pub end: usize,
}

/// Completion callback for [`SpellcheckerEngine::check_spelling_async`].
pub type CheckCallback = Box<dyn FnOnce(Result<Vec<MisspelledRange>>) + Send + 'static>;

pub trait SpellcheckerEngine: Send + Sync + 'static {
    /// Load the dictionary for `language` from `directory`.
    ///
    /// Returns `false` if it could not be loaded; the previous dictionary,
    /// if any, stays active.
    fn set_dictionary(&self, language: &str, directory: &Path) -> bool;

    fn is_misspelled(&self, word: &str) -> bool;

    /// Accept `word` for the rest of the session.
    fn add(&self, word: &str);

    fn batch_add(&self, words: &[String]) {
        for word in words {
            self.add(word);
        }
    }

    /// Stop accepting `word`, whether it came from the dictionary or
    /// from [`add`](Self::add).
    fn remove(&self, word: &str);

    fn get_corrections_for_misspelling(&self, word: &str) -> Vec<String>;

    /// Language tags of the dictionaries installed in `directory`.
    fn get_available_dictionaries(&self, directory: &Path) -> Vec<String>;

    fn check_spelling(&self, corpus: &[u16]) -> Vec<MisspelledRange>;

    /// Check `corpus` off the calling thread and report through `callback`.
    ///
    /// The default queues [`check_spelling`](Self::check_spelling) on the
    /// blocking pool of the current tokio runtime, or on a worker thread
    /// when there is no runtime. If the worker panics, `callback` is
    /// dropped without being called; if it cannot be started, `callback`
    /// receives [`Error::Worker`].
    fn check_spelling_async(self: Arc<Self>, corpus: Vec<u16>, callback: CheckCallback) {
        let job = move |callback: CheckCallback| {
            let ranges = self.check_spelling(&corpus);
            callback(Ok(ranges));
        };

        if let Ok(runtime) = Handle::try_current() {
            runtime.spawn_blocking(move || job(callback));
            return;
        }

        // The callback moves into the closure, so a failed spawn hands it
        // back through a shared slot.
        let slot = Arc::new(Mutex::new(Some(callback)));
        let worker_slot = Arc::clone(&slot);
        let spawned = thread::Builder::new()
            .name("spellcheck-worker".to_string())
            .spawn(move || {
                let callback = worker_slot.lock().take();
                if let Some(callback) = callback {
                    job(callback);
                }
            });

        if let Err(e) = spawned {
            log::warn!("failed to start spell check worker: {}", e);
            if let Some(callback) = slot.lock().take() {
                callback(Err(Error::Worker(e.to_string())));
            }
        }
    }
}
