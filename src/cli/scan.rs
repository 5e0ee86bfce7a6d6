use crate::engine::tokenizer::utf16_to_byte;
use crate::{CheckResult, MisspelledRange, SpellChecker, SpellError};
use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Characters of surrounding text shown on each side of a misspelling.
const CONTEXT_CHARS: usize = 20;

/// Turns engine ranges into a per-file report.
pub struct Scanner {
    ignore_patterns: Vec<Regex>,
}

impl Scanner {
    pub fn new(patterns: &[String]) -> Self {
        let mut ignore_patterns = Vec::new();
        for pattern in patterns {
            match Regex::new(pattern) {
                Ok(re) => ignore_patterns.push(re),
                Err(e) => log::warn!("invalid ignore pattern '{}': {}", pattern, e),
            }
        }

        Self { ignore_patterns }
    }

    /// Check `content` synchronously.
    pub fn check_text(&self, checker: &SpellChecker, content: &str) -> CheckResult {
        let ranges = checker.check_spelling(content);
        self.report(checker, content, &ranges)
    }

    /// Build the report for `content` from the ranges the engine flagged.
    pub fn report(
        &self,
        checker: &SpellChecker,
        content: &str,
        ranges: &[MisspelledRange],
    ) -> CheckResult {
        let mut errors = Vec::new();

        for range in ranges {
            let start = utf16_to_byte(content, range.start);
            let end = utf16_to_byte(content, range.end);
            let word = &content[start..end];

            if self.should_ignore(word) {
                continue;
            }

            let (line, column, context) = locate(content, start, end);
            errors.push(SpellError {
                word: word.to_string(),
                line,
                column,
                context,
                suggestions: checker.get_corrections_for_misspelling(word),
            });
        }

        CheckResult {
            error_count: errors.len(),
            errors,
        }
    }

    fn should_ignore(&self, word: &str) -> bool {
        // Skip single characters
        if word.chars().count() <= 1 {
            return true;
        }

        if word.chars().all(|c| !c.is_alphabetic()) {
            return true;
        }

        self.ignore_patterns.iter().any(|p| p.is_match(word))
    }
}

/// Expand the given paths into the files to check, walking directories.
pub fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry
                    .with_context(|| format!("Failed to walk directory: {}", path.display()))?;
                if entry.file_type().is_file() && !is_hidden(entry.path(), path) {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(path.clone());
        }
    }

    Ok(files)
}

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

fn is_hidden(path: &Path, root: &Path) -> bool {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
}

/// 1-based line and column of the byte range, plus a window of context.
fn locate(content: &str, start: usize, end: usize) -> (usize, usize, String) {
    let line_start = content[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = content[end..].find('\n').map_or(content.len(), |i| end + i);
    let line = content[..start].matches('\n').count() + 1;
    let column = content[line_start..start].chars().count() + 1;

    let text = content[line_start..line_end].trim_end_matches('\r');
    let before: Vec<char> = content[line_start..start].chars().collect();
    let after: Vec<char> = text.get(end - line_start..).unwrap_or_default().chars().collect();

    let lead = before.len().saturating_sub(CONTEXT_CHARS);
    let tail = after.len().min(CONTEXT_CHARS);

    let mut context = String::new();
    if lead > 0 {
        context.push_str("...");
    }
    context.extend(&before[lead..]);
    context.push_str(&content[start..end]);
    context.extend(&after[..tail]);
    if tail < after.len() {
        context.push_str("...");
    }

    (line, column, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use tempfile::tempdir;

    fn checker(dir: &Path) -> SpellChecker {
        fs::write(dir.join("en_US.dic"), "4\nhello\nworld\nthe\nis\n").unwrap();
        SpellChecker::new(&Config {
            language: Some("en_US".to_string()),
            dictionary_dir: Some(dir.to_path_buf()),
            ..Default::default()
        })
    }

    #[test]
    fn test_report_positions() {
        let dir = tempdir().unwrap();
        let checker = checker(dir.path());
        let scanner = Scanner::new(&Config::default().ignore_patterns);

        let result = scanner.check_text(&checker, "hello world\nthe wrold is é wrold");
        assert_eq!(result.error_count, 2);
        assert_eq!(result.errors[0].word, "wrold");
        assert_eq!((result.errors[0].line, result.errors[0].column), (2, 5));
        assert_eq!(result.errors[0].suggestions, vec!["world"]);
        assert_eq!((result.errors[1].line, result.errors[1].column), (2, 16));
    }

    #[test]
    fn test_ignore_patterns() {
        let dir = tempdir().unwrap();
        let checker = checker(dir.path());
        let scanner = Scanner::new(&["^wrold$".to_string(), "[".to_string()]);

        let result = scanner.check_text(&checker, "hello wrold NASA x");
        assert_eq!(result.error_count, 1);
        assert_eq!(result.errors[0].word, "NASA");
    }

    #[test]
    fn test_context_window() {
        let content = "aaaaaaaaaaaaaaaaaaaaaaaaa wrold bbbbbbbbbbbbbbbbbbbbbbbbbbbb";
        let start = content.find("wrold").unwrap();
        let (_, _, context) = locate(content, start, start + 5);
        assert!(context.starts_with("..."));
        assert!(context.ends_with("..."));
        assert!(context.contains(" wrold "));
    }

    #[test]
    fn test_collect_files_walks_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join("docs/b.md"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join(".git/config"), "c").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.txt"), dir.path().join("docs/b.md")]
        );
    }
}
