use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::database::{
    CardPage, CardQuery, CardRecord, CardUpdate, DatabaseConnection, DatabaseStats, Repository,
    TagCount,
};
use crate::errors::CardError;
use crate::file_utils::FileManager;
use crate::import::{ImportEvent, ImportService, ImportSummary};
use crate::language_utils;
use crate::parser::tags::parse_tag_list;
use crate::parser::{format_card_line, BulkParser, Card};

// @module: Application controller for deck operations

/// How import progress is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressOutput {
    /// Interactive progress bar on stderr
    Bar,
    /// One JSON event per line on stdout
    JsonLines,
    /// Nothing
    Silent,
}

/// Main application controller for the vocabulary deck
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Card store
    repository: Repository,
    // @field: Parser built from the configured phrase table
    parser: BulkParser,
}

impl Controller {
    /// Create a new controller for test purposes with an in-memory store
    #[cfg(test)]
    pub fn new_for_test() -> Result<Self> {
        let repository = Repository::new_in_memory()?;
        Ok(Self::with_repository(Config::default(), repository))
    }

    // @method: Create a new controller, opening the configured database
    pub fn with_config(config: Config) -> Result<Self> {
        let db_path = config.database.resolve_path()?;
        let db = DatabaseConnection::new(&db_path)
            .with_context(|| format!("Failed to open card database: {:?}", db_path))?;
        debug!("Card store ready at {:?}", db.path());

        Ok(Self::with_repository(config, Repository::new(db)))
    }

    // @method: Create a controller over an existing repository
    pub fn with_repository(config: Config, repository: Repository) -> Self {
        let parser = config.build_parser();
        debug!(
            "Comma classifier uses {} phrase patterns",
            parser.classifier().phrase_patterns().len()
        );
        Self {
            config,
            repository,
            parser,
        }
    }

    /// "Romanian → English" for the configured languages
    pub fn deck_languages(&self) -> Result<String> {
        let foreign = language_utils::get_language_name(&self.config.foreign_language)?;
        let native = language_utils::get_language_name(&self.config.native_language)?;
        Ok(format!("{} → {}", foreign, native))
    }

    /// Parse a file (or stdin) and render the cards as pretty JSON
    ///
    /// Needs no store, so `parse` runs without opening the database.
    pub fn parse_input(config: &Config, input: &str) -> Result<String> {
        let text = FileManager::read_input(input)?;
        let cards = config.build_parser().parse(&text);
        debug!("Parsed {} cards", cards.len());
        serde_json::to_string_pretty(&cards).context("Failed to serialize parsed cards")
    }

    /// Import a file (or stdin) into the store
    pub async fn run_import(
        &self,
        input: &str,
        allow_duplicates: bool,
        output: ProgressOutput,
    ) -> Result<ImportSummary> {
        let text = FileManager::read_input(input)?;
        self.import_text(&text, allow_duplicates, output).await
    }

    /// Import bulk text, reporting progress as requested
    pub async fn import_text(
        &self,
        text: &str,
        allow_duplicates: bool,
        output: ProgressOutput,
    ) -> Result<ImportSummary> {
        let skip_duplicates = self.config.import.skip_duplicates && !allow_duplicates;
        let service = ImportService::new(self.repository.clone(), skip_duplicates)
            .with_parser(self.parser.clone());

        let progress_bar = match output {
            ProgressOutput::Bar => Some(Self::create_progress_bar()),
            _ => None,
        };

        let start_time = std::time::Instant::now();
        let summary = service
            .import_text(text, |event| match output {
                ProgressOutput::JsonLines => println!("{}", event.to_json_line()),
                ProgressOutput::Bar => {
                    if let Some(pb) = &progress_bar {
                        Self::update_progress_bar(pb, event);
                    }
                }
                ProgressOutput::Silent => {}
            })
            .await;

        if let Some(pb) = &progress_bar {
            pb.finish_and_clear();
        }

        let summary = summary?;
        info!(
            "Imported {} of {} cards in {:.2}s",
            summary.added_count,
            summary.total_parsed,
            start_time.elapsed().as_secs_f64()
        );

        Ok(summary)
    }

    fn create_progress_bar() -> ProgressBar {
        let progress_bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} cards ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar.set_message("Importing");
        progress_bar
    }

    fn update_progress_bar(progress_bar: &ProgressBar, event: &ImportEvent) {
        match event {
            ImportEvent::Progress { current, total, .. } => {
                progress_bar.set_length(*total as u64);
                progress_bar.set_position(*current as u64);
            }
            ImportEvent::Complete { message, .. } => {
                progress_bar.set_message(message.clone());
            }
        }
    }

    /// Store a single card typed by the user
    pub async fn add_card(
        &self,
        foreign_text: &str,
        translation_text: &str,
        tags: &[String],
    ) -> Result<CardRecord> {
        let foreign_text = foreign_text.trim();
        let translation_text = translation_text.trim();

        if foreign_text.is_empty() || translation_text.is_empty() {
            return Err(CardError::InvalidInput(
                "Both foreign text and translation are required".to_string(),
            )
            .into());
        }

        let tags = tags.iter().flat_map(|tag| parse_tag_list(tag)).collect();
        let card = Card::new(foreign_text.to_string(), translation_text.to_string(), tags);

        self.repository.insert_card(&card).await
    }

    /// One page of cards
    pub async fn list_cards(&self, query: &CardQuery) -> Result<CardPage> {
        self.repository.list_cards(query).await
    }

    /// Query preset with the configured page size
    pub fn default_query(&self) -> CardQuery {
        CardQuery {
            per_page: self.config.import.default_page_size,
            ..CardQuery::default()
        }
    }

    /// A random card for review
    pub async fn random_card(&self, tag: Option<&str>) -> Result<Option<CardRecord>> {
        self.repository.random_card(tag).await
    }

    /// Apply a partial update, failing when the card does not exist
    pub async fn update_card(&self, card_id: &str, update: &CardUpdate) -> Result<CardRecord> {
        self.repository
            .update_card(card_id, update)
            .await?
            .ok_or_else(|| CardError::NotFound(card_id.to_string()).into())
    }

    /// Delete a card, failing when it does not exist
    pub async fn delete_card(&self, card_id: &str) -> Result<()> {
        if !self.repository.delete_card(card_id).await? {
            return Err(CardError::NotFound(card_id.to_string()).into());
        }
        info!("Deleted card {}", card_id);
        Ok(())
    }

    pub async fn list_tags(&self) -> Result<Vec<TagCount>> {
        self.repository.list_tags().await
    }

    pub fn stats(&self) -> Result<DatabaseStats> {
        self.repository.stats()
    }

    /// Render the whole deck in bulk syntax, oldest card first
    pub async fn export_text(&self) -> Result<String> {
        let cards = self.repository.all_cards_oldest_first().await?;

        let mut text = cards
            .iter()
            .map(|record| format_card_line(&record.to_card()))
            .collect::<Vec<_>>()
            .join("\n");
        if !text.is_empty() {
            text.push('\n');
        }

        Ok(text)
    }

    /// Write the deck to a file; a directory gets a timestamped filename
    pub async fn export_to_file(&self, output: &Path) -> Result<PathBuf> {
        let path = if output.is_dir() {
            FileManager::generate_export_path(output)
        } else {
            output.to_path_buf()
        };

        let text = self.export_text().await?;
        FileManager::write_to_file(&path, &text)?;
        info!("Exported deck to {:?}", path);

        Ok(path)
    }

    /// One-line listing of a stored card
    pub fn format_card_row(record: &CardRecord) -> String {
        format!("{}  {}", record.id, format_card_line(&record.to_card()))
    }
}
