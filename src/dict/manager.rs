use crate::engine::dictionary::{Dictionary, DIC_EXTENSION};
use crate::{locale, paths, Config, SpellChecker};
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DICTIONARY_BASE_URL: &str =
    "https://raw.githubusercontent.com/wooorm/dictionaries/main/dictionaries";

/// Hunspell dictionaries that `dict download` knows how to fetch, keyed by
/// language tag, with the upstream folder holding `index.dic`/`index.aff`.
const DOWNLOADABLE: &[(&str, &str)] = &[
    ("da_DK", "da"),
    ("de_DE", "de"),
    ("en_AU", "en-AU"),
    ("en_CA", "en-CA"),
    ("en_GB", "en-GB"),
    ("en_US", "en"),
    ("es_ES", "es"),
    ("fr_FR", "fr"),
    ("it_IT", "it"),
    ("nb_NO", "nb"),
    ("nl_NL", "nl"),
    ("pl_PL", "pl"),
    ("pt_BR", "pt"),
    ("pt_PT", "pt-PT"),
    ("ru_RU", "ru"),
    ("sv_SE", "sv"),
];

pub struct DictionaryInfo {
    pub language: String,
    pub path: PathBuf,
    pub word_count: usize,
    pub size_bytes: u64,
    pub has_affix_file: bool,
}

impl DictionaryInfo {
    pub fn load(language: &str, dir: &Path) -> Result<Self> {
        let dict = Dictionary::load(language, dir)
            .with_context(|| format!("Failed to load dictionary '{}'", language))?;
        let metadata = fs::metadata(dict.path())?;

        Ok(Self {
            language: language.to_string(),
            path: dict.path().to_path_buf(),
            word_count: dict.len(),
            size_bytes: metadata.len(),
            has_affix_file: dict.path().with_extension("aff").is_file(),
        })
    }
}

/// Directories searched for dictionaries, most specific first: the
/// configured (or packaged) directory, then the per-user download directory.
pub fn search_dirs(config: &Config) -> Vec<PathBuf> {
    let mut dirs = vec![config
        .dictionary_dir
        .clone()
        .unwrap_or_else(paths::dictionary_path)];

    if let Some(data_dir) = Config::data_dir() {
        if !dirs.contains(&data_dir) {
            dirs.push(data_dir);
        }
    }

    dirs
}

/// Pin `config.dictionary_dir` to the first search directory holding the
/// configured language, so downloaded dictionaries are picked up without
/// extra flags. An explicitly configured directory is left alone.
pub fn resolve_dictionary_dir(config: &mut Config) {
    if config.dictionary_dir.is_some() {
        return;
    }

    let env = locale::env_language();
    let language = locale::resolve(None, config.language.as_deref(), env.as_deref());

    if let Some(dir) = search_dirs(config)
        .into_iter()
        .find(|dir| Dictionary::locate(&language, dir).is_some())
    {
        log::debug!("found '{}' in {}", language, dir.display());
        config.dictionary_dir = Some(dir);
    }
}

pub fn list_dictionaries(checker: &SpellChecker, dirs: &[PathBuf]) -> Result<()> {
    println!("{}", "Installed dictionaries:".bold());

    let mut found_any = false;
    for dir in dirs {
        let languages = checker.get_available_dictionaries(Some(dir));
        if languages.is_empty() {
            continue;
        }
        found_any = true;

        println!();
        println!("  {}", dir.display().to_string().dimmed());
        for language in languages {
            let path = dir.join(format!("{}.{}", language, DIC_EXTENSION));
            let size_kb = fs::metadata(&path).map(|m| m.len() / 1024).unwrap_or(0);
            println!(
                "  {} {} ({})",
                "✓".green(),
                language.cyan().bold(),
                format!("{}KB", size_kb).dimmed()
            );
        }
    }

    if !found_any {
        println!("{}", "No dictionaries found.".yellow());
        println!(
            "Run {} to download a dictionary.",
            "spellgate dict download en_US".cyan()
        );
    }

    Ok(())
}

pub fn show_info(language: &str, dirs: &[PathBuf]) -> Result<()> {
    let language = locale::normalize(Some(language));
    let Some(dir) = dirs
        .iter()
        .find(|dir| Dictionary::locate(&language, dir).is_some())
    else {
        println!(
            "{} Dictionary for {} not found.",
            "✗".red().bold(),
            language.yellow()
        );
        println!(
            "Run {} to download it.",
            format!("spellgate dict download {}", language).cyan()
        );
        return Ok(());
    };

    let info = DictionaryInfo::load(&language, dir)?;

    println!("{}", format!("Dictionary: {}", info.language).bold());
    println!("  Path: {}", info.path.display());
    println!("  Size: {} KB", info.size_bytes / 1024);
    println!("  Words: {}", info.word_count.to_string().yellow());
    println!(
        "  Affix file: {}",
        if info.has_affix_file { "present" } else { "missing" }
    );

    Ok(())
}

pub fn download_url(language: &str) -> Option<String> {
    DOWNLOADABLE
        .iter()
        .find(|(tag, _)| *tag == language)
        .map(|(_, folder)| format!("{}/{}", DICTIONARY_BASE_URL, folder))
}

pub fn download_dictionary(language: &str) -> Result<PathBuf> {
    let language = locale::normalize(Some(language));
    let Some(base_url) = download_url(&language) else {
        let supported: Vec<&str> = DOWNLOADABLE.iter().map(|(tag, _)| *tag).collect();
        anyhow::bail!(
            "Language '{}' is not available for download. Supported: {}",
            language,
            supported.join(", ")
        );
    };

    let data_dir = Config::data_dir().context("Failed to get data directory")?;
    fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

    println!(
        "{} dictionary for {}...",
        "Downloading".cyan().bold(),
        language.yellow()
    );
    println!("Source: {}", base_url.dimmed());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    for extension in ["aff", DIC_EXTENSION] {
        pb.set_message(format!("Fetching {}.{}", language, extension));
        let url = format!("{}/index.{}", base_url, extension);
        let body = fetch(&url)?;
        let target = data_dir.join(format!("{}.{}", language, extension));
        fs::write(&target, body)
            .with_context(|| format!("Failed to write {}", target.display()))?;
    }
    pb.finish_with_message("Download complete");

    let info = DictionaryInfo::load(&language, &data_dir)?;
    println!(
        "{} Dictionary installed: {} ({} words)",
        "✓".green().bold(),
        info.path.display().to_string().cyan(),
        info.word_count
    );

    Ok(info.path)
}

fn fetch(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Failed to download {}: HTTP {}", url, response.status());
    }

    Ok(response.bytes()?.to_vec())
}

/// Append words to the personal dictionary, skipping ones already there.
pub fn add_personal_words(path: &Path, words: &[String]) -> Result<usize> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create personal dictionary directory")?;
    }

    let mut content = if path.exists() {
        fs::read_to_string(path).context("Failed to read personal dictionary")?
    } else {
        String::new()
    };
    let mut known = crate::checker::parse_personal_words(&content);

    let mut added = 0;
    for word in words.iter().map(|w| w.trim()).filter(|w| !w.is_empty()) {
        if known.iter().any(|k| k == word) {
            continue;
        }
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(word);
        content.push('\n');
        known.push(word.to_string());
        added += 1;
    }

    fs::write(path, content).context("Failed to write personal dictionary")?;
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_download_url() {
        assert_eq!(
            download_url("en_US").as_deref(),
            Some("https://raw.githubusercontent.com/wooorm/dictionaries/main/dictionaries/en")
        );
        assert_eq!(download_url("xx_XX"), None);
    }

    #[test]
    fn test_dictionary_info() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("en_US.dic"), "3\nhello\nworld\ntest\n").unwrap();
        fs::write(dir.path().join("en_US.aff"), "SET UTF-8\n").unwrap();

        let info = DictionaryInfo::load("en_US", dir.path()).unwrap();
        assert_eq!(info.word_count, 3);
        assert!(info.has_affix_file);
    }

    #[test]
    fn test_resolve_keeps_explicit_dir() {
        let mut config = Config {
            dictionary_dir: Some(PathBuf::from("/explicit")),
            ..Default::default()
        };
        resolve_dictionary_dir(&mut config);
        assert_eq!(config.dictionary_dir, Some(PathBuf::from("/explicit")));
    }

    #[test]
    fn test_add_personal_words() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/personal.txt");

        let added = add_personal_words(&path, &["rustacean".to_string(), "tokio".to_string()]).unwrap();
        assert_eq!(added, 2);

        let added = add_personal_words(&path, &["tokio".to_string(), " serde ".to_string()]).unwrap();
        assert_eq!(added, 1);

        assert_eq!(fs::read_to_string(&path).unwrap(), "rustacean\ntokio\nserde\n");
    }
}
