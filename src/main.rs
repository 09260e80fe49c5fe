// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use vocabdeck::app_config::{Config, LogLevel};
use vocabdeck::app_controller::{Controller, ProgressOutput};
use vocabdeck::database::{CardQuery, CardUpdate, SortField, SortOrder};
use vocabdeck::errors::AppError;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for SortField to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSortField {
    Created,
    Foreign,
    Translation,
}

impl From<CliSortField> for SortField {
    fn from(cli_sort: CliSortField) -> Self {
        match cli_sort {
            CliSortField::Created => SortField::CreatedAt,
            CliSortField::Foreign => SortField::ForeignText,
            CliSortField::Translation => SortField::TranslationText,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse bulk text and print the resulting cards as JSON (nothing is stored)
    Parse {
        /// Input file, or '-' for stdin
        #[arg(value_name = "INPUT")]
        input: String,
    },

    /// Parse bulk text and store the cards
    Import {
        /// Input file, or '-' for stdin
        #[arg(value_name = "INPUT")]
        input: String,

        /// Store cards even when their foreign text already exists
        #[arg(long)]
        allow_duplicates: bool,

        /// Print progress as JSON lines on stdout instead of a progress bar
        #[arg(long)]
        json_progress: bool,
    },

    /// Add a single card
    Add {
        /// Text in the language being learned
        #[arg(short, long)]
        foreign: String,

        /// Translation
        #[arg(short, long)]
        translation: String,

        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// List stored cards
    List {
        /// Substring to look for on either side
        #[arg(short, long)]
        search: Option<String>,

        /// Only cards with this tag
        #[arg(long)]
        tag: Option<String>,

        /// Sort column
        #[arg(long, value_enum, default_value = "created")]
        sort: CliSortField,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Cards per page (defaults to import.default_page_size)
        #[arg(long)]
        per_page: Option<u32>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a random card
    Random {
        /// Only pick among cards with this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Delete a card
    Delete {
        /// Card ID
        id: String,
    },

    /// Update a card
    Update {
        /// Card ID
        id: String,

        /// New foreign text
        #[arg(long)]
        foreign: Option<String>,

        /// New translation
        #[arg(long)]
        translation: Option<String>,

        /// Replacement tags, comma separated
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },

    /// List tags with their card counts
    Tags,

    /// Show deck statistics
    Stats,

    /// Export the deck in bulk text syntax
    Export {
        /// Output file or directory (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions for vocabdeck
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// vocabdeck - bulk vocabulary flashcards
///
/// Paste "foreign: translation" lines, get one card per line plus
/// variants for slash and comma alternatives.
#[derive(Parser, Debug)]
#[command(name = "vocabdeck")]
#[command(version)]
#[command(about = "Bulk vocabulary flashcard builder")]
#[command(long_about = "vocabdeck turns pasted vocabulary lists into flashcards.

EXAMPLES:
    vocabdeck parse lesson1.txt                 # Preview the cards a file produces
    vocabdeck import lesson1.txt                # Store them, skipping known words
    cat notes.txt | vocabdeck import -          # Import from stdin
    vocabdeck list --tag animal --sort foreign --asc
    vocabdeck random                            # Review a random card
    vocabdeck export -o deck.txt                # Write the deck back as bulk text
    vocabdeck completions bash > vocabdeck.bash # Generate bash completions

INPUT SYNTAX:
    doamnă, doamne: madam / lady [noun, people]

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config: PathBuf,

    /// Database file path (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: CommandLineOptions) -> Result<(), AppError> {
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "vocabdeck", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cli_level) = cli.log_level {
        log::set_max_level(LogLevel::from(cli_level).to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config)
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;

    // Override config with CLI options if provided
    if let Some(database) = &cli.database {
        config.database.path = Some(database.clone());
    }
    if let Some(cli_level) = cli.log_level {
        config.log_level = cli_level.into();
    }

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;
    log::set_max_level(config.log_level.to_level_filter());

    // Parsing is a dry run and must not open the database
    if let Commands::Parse { input } = &cli.command {
        println!("{}", Controller::parse_input(&config, input)?);
        return Ok(());
    }

    let controller = Controller::with_config(config)?;
    run_command(&controller, cli.command).await?;

    Ok(())
}

async fn run_command(controller: &Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Import {
            input,
            allow_duplicates,
            json_progress,
        } => {
            let output = if json_progress {
                ProgressOutput::JsonLines
            } else if std::io::stderr().is_terminal() {
                ProgressOutput::Bar
            } else {
                ProgressOutput::Silent
            };
            let summary = controller.run_import(&input, allow_duplicates, output).await?;

            if !json_progress {
                println!(
                    "Added {} cards ({} skipped as duplicates, {} failed, {} parsed)",
                    summary.added_count,
                    summary.skipped_count,
                    summary.failed_count,
                    summary.total_parsed
                );
            }
        }
        Commands::Add {
            foreign,
            translation,
            tags,
        } => {
            let record = controller.add_card(&foreign, &translation, &tags).await?;
            println!("{}", Controller::format_card_row(&record));
        }
        Commands::List {
            search,
            tag,
            sort,
            asc,
            page,
            per_page,
            json,
        } => {
            let defaults = controller.default_query();
            let query = CardQuery {
                search,
                tag,
                sort: sort.into(),
                order: if asc {
                    SortOrder::Ascending
                } else {
                    SortOrder::Descending
                },
                page,
                per_page: per_page.unwrap_or(defaults.per_page),
            };
            let page = controller.list_cards(&query).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                for record in &page.cards {
                    println!("{}", Controller::format_card_row(record));
                }
                println!(
                    "Page {} of {} ({} cards)",
                    page.page, page.total_pages, page.total
                );
                if page.has_next() {
                    println!("Next: --page {}", page.page + 1);
                }
            }
        }
        Commands::Random { tag } => match controller.random_card(tag.as_deref()).await? {
            Some(record) => println!("{}", Controller::format_card_row(&record)),
            None => println!("No cards found"),
        },
        Commands::Delete { id } => {
            controller.delete_card(&id).await?;
            println!("Deleted {}", id);
        }
        Commands::Update {
            id,
            foreign,
            translation,
            tags,
        } => {
            let update = CardUpdate {
                foreign_text: foreign,
                translation_text: translation,
                tags,
            };
            let record = controller.update_card(&id, &update).await?;
            println!("{}", Controller::format_card_row(&record));
        }
        Commands::Tags => {
            for tag in controller.list_tags().await? {
                println!("{:<24} {}", tag.tag, tag.card_count);
            }
        }
        Commands::Stats => {
            println!("{}", controller.deck_languages()?);
            println!("{}", controller.stats()?);
        }
        Commands::Export { output } => match output {
            Some(path) => {
                let written = controller.export_to_file(&path).await?;
                println!("Exported to {}", written.display());
            }
            None => print!("{}", controller.export_text().await?),
        },
        Commands::Parse { .. } | Commands::Completions { .. } => {}
    }

    Ok(())
}
