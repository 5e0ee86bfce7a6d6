use crate::engine::DEFAULT_MAX_SUGGESTIONS;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "spellgate";
const LOCAL_CONFIG: &str = ".spellgate.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dictionary language; `None` defers to `$LANG` at initialization.
    pub language: Option<String>,
    /// Directory holding `.dic` files; `None` uses the packaged location.
    pub dictionary_dir: Option<PathBuf>,
    pub personal_dictionary: Option<PathBuf>,
    pub ignore_patterns: Vec<String>,
    pub max_suggestions: usize,
    /// Load the dictionary when the checker is built instead of on first use.
    pub eager_init: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            dictionary_dir: None,
            personal_dictionary: None,
            ignore_patterns: vec![
                r"^[A-Z0-9_]{2,}$".to_string(),            // ALL_CAPS
                r"^https?://\S+$".to_string(),             // URLs
                r"^[a-fA-F0-9]{32,}$".to_string(),         // Hashes
            ],
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            eager_init: false,
        }
    }
}

/// The keys of one configuration file. Keys left out of the file stay
/// `None` and leave the lower layers untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub language: Option<String>,
    pub dictionary_dir: Option<PathBuf>,
    pub personal_dictionary: Option<PathBuf>,
    pub ignore_patterns: Option<Vec<String>>,
    pub max_suggestions: Option<usize>,
    pub eager_init: Option<bool>,
}

impl ConfigFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Command-line values that take precedence over configuration files.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub language: Option<String>,
    pub dictionary_dir: Option<PathBuf>,
    pub personal_dictionary: Option<PathBuf>,
    pub ignore_patterns: Vec<String>,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let layers: Vec<PathBuf> = Self::global_config_path()
            .into_iter()
            .chain(Some(PathBuf::from(LOCAL_CONFIG)))
            .collect();

        let mut config = Self::layered(&layers)?;
        config.apply(overrides);

        if config.personal_dictionary.is_none() {
            config.personal_dictionary = Self::default_personal_dict_path();
        }

        Ok(config)
    }

    /// Defaults overlaid with each existing file in `paths`, later files
    /// winning.
    pub fn layered(paths: &[PathBuf]) -> Result<Self> {
        let mut config = Self::default();
        for path in paths.iter().filter(|p| p.exists()) {
            config = config.merge(ConfigFile::from_file(path)?);
        }
        Ok(config)
    }

    fn merge(mut self, file: ConfigFile) -> Self {
        if file.language.is_some() {
            self.language = file.language;
        }
        if file.dictionary_dir.is_some() {
            self.dictionary_dir = file.dictionary_dir;
        }
        if file.personal_dictionary.is_some() {
            self.personal_dictionary = file.personal_dictionary;
        }
        if let Some(patterns) = file.ignore_patterns {
            self.ignore_patterns = patterns;
        }
        if let Some(max) = file.max_suggestions {
            self.max_suggestions = max;
        }
        if let Some(eager) = file.eager_init {
            self.eager_init = eager;
        }
        self
    }

    fn apply(&mut self, overrides: Overrides) {
        if overrides.language.is_some() {
            self.language = overrides.language;
        }
        if overrides.dictionary_dir.is_some() {
            self.dictionary_dir = overrides.dictionary_dir;
        }
        if overrides.personal_dictionary.is_some() {
            self.personal_dictionary = overrides.personal_dictionary;
        }
        self.ignore_patterns.extend(overrides.ignore_patterns);
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_personal_dict_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("personal.txt"))
    }

    /// Per-user directory where downloaded dictionaries are installed.
    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_dir().join("dictionaries"))
    }
}
