use crate::CheckResult;
use anyhow::Result;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Suggestions shown per misspelling in text output.
const MAX_SHOWN_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonError {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub word: String,
    pub suggestions: Vec<String>,
    pub context: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput {
    pub files_checked: usize,
    pub total_errors: usize,
    pub errors: Vec<JsonError>,
}

impl JsonOutput {
    pub fn from_reports(reports: &[(PathBuf, CheckResult)]) -> Self {
        let errors: Vec<JsonError> = reports
            .iter()
            .flat_map(|(path, result)| {
                result.errors.iter().map(move |e| JsonError {
                    file: path.display().to_string(),
                    line: e.line,
                    column: e.column,
                    word: e.word.clone(),
                    suggestions: e.suggestions.clone(),
                    context: e.context.clone(),
                })
            })
            .collect();

        Self {
            files_checked: reports.len(),
            total_errors: errors.len(),
            errors,
        }
    }
}

pub fn print_json(reports: &[(PathBuf, CheckResult)]) -> Result<()> {
    let output = JsonOutput::from_reports(reports);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_text_errors(file_path: &Path, result: &CheckResult, colored_output: bool) {
    if result.errors.is_empty() {
        return;
    }

    let file_name = file_path.display().to_string();

    if colored_output {
        println!("\n{}", file_name.bold().underline());
    } else {
        println!("\n{}", file_name);
    }

    for error in &result.errors {
        let line_info = format!("{}:{}", error.line, error.column);

        if colored_output {
            println!(
                "  {} {} {}",
                line_info.blue().bold(),
                error.word.red().bold(),
                format_context(&error.context, &error.word, colored_output)
            );

            if !error.suggestions.is_empty() {
                let suggestions = error
                    .suggestions
                    .iter()
                    .take(MAX_SHOWN_SUGGESTIONS)
                    .map(|s| s.green().to_string())
                    .collect::<Vec<_>>()
                    .join(&", ".dimmed().to_string());
                println!("    {} {}", "→".dimmed(), suggestions);
            }
        } else {
            println!("  {} {} {}", line_info, error.word, &error.context);

            if !error.suggestions.is_empty() {
                let suggestions = error
                    .suggestions
                    .iter()
                    .take(MAX_SHOWN_SUGGESTIONS)
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("    → {}", suggestions);
            }
        }
    }
}

fn format_context(context: &str, word: &str, colored: bool) -> String {
    if colored {
        context.replace(word, &word.red().bold().to_string())
    } else {
        context.to_string()
    }
}

pub fn print_check_summary(total_errors: usize, files: &[impl AsRef<Path>], colored: bool) {
    println!();
    let file_word = if files.len() == 1 { "file" } else { "files" };

    if total_errors == 0 {
        if colored {
            println!("{}", "✓ No spelling errors found!".green().bold());
        } else {
            println!("✓ No spelling errors found!");
        }
    } else {
        let error_word = if total_errors == 1 { "error" } else { "errors" };
        if colored {
            println!(
                "{} {} {} found in {} {}",
                "✗".red().bold(),
                total_errors.to_string().red().bold(),
                error_word,
                files.len(),
                file_word
            );
        } else {
            println!(
                "✗ {} {} found in {} {}",
                total_errors,
                error_word,
                files.len(),
                file_word
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpellError;

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_json_aggregates_files() {
        let error = SpellError {
            word: "wrold".to_string(),
            line: 1,
            column: 7,
            context: "hello wrold".to_string(),
            suggestions: vec!["world".to_string()],
        };
        let reports = vec![
            (
                PathBuf::from("a.md"),
                CheckResult {
                    error_count: 1,
                    errors: vec![error],
                },
            ),
            (PathBuf::from("b.md"), CheckResult::default()),
        ];

        let output = JsonOutput::from_reports(&reports);
        assert_eq!(output.files_checked, 2);
        assert_eq!(output.total_errors, 1);
        assert_eq!(output.errors[0].file, "a.md");
        assert_eq!(output.errors[0].suggestions, vec!["world"]);
    }
}
