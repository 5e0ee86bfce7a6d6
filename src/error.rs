use std::path::PathBuf;

/// Errors surfaced by the spell-checking library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("dictionary for '{language}' not found in {}", .dir.display())]
    DictionaryNotFound { language: String, dir: PathBuf },

    #[error("failed to read dictionary {}: {source}", .path.display())]
    DictionaryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build dictionary index: {0}")]
    Index(#[from] fst::Error),

    #[error("spell check worker failed: {0}")]
    Worker(String),

    #[error("spell check worker exited without reporting a result")]
    WorkerDropped,
}

pub type Result<T> = std::result::Result<T, Error>;
