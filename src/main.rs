use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use spellgate::cli::output::{self, OutputFormat};
use spellgate::cli::scan::{self, Scanner};
use spellgate::config::Overrides;
use spellgate::dict::manager;
use spellgate::{Config, SpellChecker};
use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Files checked concurrently when the core count is unknown.
const DEFAULT_IN_FLIGHT: usize = 4;

#[derive(Parser, Debug)]
#[command(name = "spellgate")]
#[command(version, about = "Spell-check files against Hunspell dictionaries", long_about = None)]
struct Cli {
    /// Files or directories to check
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if errors are found
    #[arg(long)]
    no_fail: bool,

    /// Dictionary language (e.g., en_US, en_GB); defaults to $LANG
    #[arg(short, long)]
    language: Option<String>,

    /// Directory containing Hunspell .dic files
    #[arg(long, value_name = "DIR", env = "SPELLGATE_DICT_DIR")]
    dict_dir: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Pattern to ignore (regex)
    #[arg(long)]
    ignore_pattern: Vec<String>,

    /// Personal dictionary file
    #[arg(long)]
    personal_dict: Option<PathBuf>,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
    /// Add words to the personal dictionary
    Add {
        #[arg(required = true)]
        words: Vec<String>,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// List installed dictionaries
    List,
    /// Print the packaged dictionary directory
    Path,
    /// Show dictionary info
    Info {
        /// Language code
        language: String,
    },
    /// Download a dictionary
    Download {
        /// Language code (e.g., en_US, en_GB, fr_FR)
        language: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spellgate", &mut io::stdout());
        return Ok(());
    }

    let use_color = !cli.no_color;
    if !use_color {
        colored::control::set_override(false);
    }

    let mut config = Config::load(Overrides {
        language: cli.language.clone(),
        dictionary_dir: cli.dict_dir.clone(),
        personal_dictionary: cli.personal_dict.clone(),
        ignore_patterns: cli.ignore_pattern.clone(),
    })?;
    manager::resolve_dictionary_dir(&mut config);

    if let Some(command) = cli.command {
        // Dictionary downloads use a blocking HTTP client.
        return tokio::task::spawn_blocking(move || handle_command(command, &config)).await?;
    }

    if cli.files.is_empty() {
        anyhow::bail!("No files specified. Use --help for usage information.");
    }

    let scanner = Scanner::new(&config.ignore_patterns);

    // The dictionary load reads files, so it stays off the runtime threads.
    let checker = tokio::task::spawn_blocking(move || {
        let checker = SpellChecker::new(&config);
        checker.initialize();
        checker
    })
    .await?;

    let files = scan::collect_files(&cli.files)?;
    let in_flight = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(DEFAULT_IN_FLIGHT);

    let mut reports = Vec::with_capacity(files.len());
    let mut failures = 0usize;

    for batch in files.chunks(in_flight) {
        // Dispatch the whole batch before waiting on any of it.
        let mut pending = Vec::with_capacity(batch.len());
        for file_path in batch {
            if !file_path.exists() {
                eprintln!("Error: File not found: {}", file_path.display());
                failures += 1;
                continue;
            }
            match scan::read_file(file_path) {
                Ok(content) => {
                    let ranges = checker.check_spelling_async(&content);
                    pending.push((file_path, content, ranges));
                }
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    failures += 1;
                }
            }
        }

        for (file_path, content, ranges) in pending {
            match ranges.await {
                Ok(ranges) => {
                    let result = scanner.report(&checker, &content, &ranges);
                    reports.push((file_path.clone(), result));
                }
                Err(e) => {
                    eprintln!("Error: Failed to check {}: {}", file_path.display(), e);
                    failures += 1;
                }
            }
        }
    }

    let total_errors: usize = reports.iter().map(|(_, r)| r.error_count).sum();

    match cli.format {
        OutputFormat::Json => output::print_json(&reports)?,
        OutputFormat::Text => {
            for (file_path, result) in &reports {
                output::print_text_errors(file_path, result, use_color);
            }
            let checked: Vec<&PathBuf> = reports.iter().map(|(path, _)| path).collect();
            output::print_check_summary(total_errors, &checked, use_color);
        }
    }

    if failures > 0 || (total_errors > 0 && !cli.no_fail) {
        std::process::exit(1);
    }

    Ok(())
}

fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Dict { action } => match action {
            DictCommands::List => {
                let checker = SpellChecker::new(config);
                manager::list_dictionaries(&checker, &manager::search_dirs(config))?;
            }
            DictCommands::Path => {
                println!("{}", SpellChecker::dictionary_path().display());
            }
            DictCommands::Info { language } => {
                manager::show_info(&language, &manager::search_dirs(config))?;
            }
            DictCommands::Download { language } => {
                manager::download_dictionary(&language)?;
            }
        },
        Commands::Add { words } => {
            let path = config
                .personal_dictionary
                .clone()
                .context("No personal dictionary location available")?;
            let added = manager::add_personal_words(&path, &words)?;
            println!("Added {} word(s) to {}", added, path.display());
        }
    }
    Ok(())
}
