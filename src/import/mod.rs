/*!
 * Bulk import of parsed cards into the store.
 *
 * The service parses pasted text, skips cards whose foreign text is already
 * stored (when configured to), inserts the rest in input order and reports
 * progress after every card.
 *
 * The duplicate check and the insert are separate operations. Two imports
 * running at the same time with overlapping vocabulary can both pass the
 * check and store the same foreign text twice.
 */

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::database::{CardRecord, Repository};
use crate::errors::ImportError;
use crate::parser::{BulkParser, Card};

/// A progress notification emitted while importing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImportEvent {
    /// One card has been processed
    Progress {
        current: usize,
        total: usize,
        percentage: u32,
        status: String,
    },
    /// All cards have been processed
    Complete {
        added_count: usize,
        skipped_count: usize,
        total_parsed: usize,
        message: String,
    },
}

impl ImportEvent {
    fn progress(current: usize, total: usize) -> Self {
        ImportEvent::Progress {
            current,
            total,
            percentage: percentage(current, total),
            status: format!("Processing card {} of {}", current, total),
        }
    }

    /// Serialize as one line of newline-delimited JSON
    pub fn to_json_line(&self) -> String {
        // Plain enums of strings and integers always serialize
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Outcome of an import
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    /// Stored cards, input order
    pub added: Vec<CardRecord>,
    pub added_count: usize,
    pub skipped_count: usize,
    pub failed_count: usize,
    /// Cards produced by the parser, variants included
    pub total_parsed: usize,
}

/// Rounded share of processed cards, 0 to 100
pub fn percentage(current: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    ((current as f64 * 100.0) / total as f64).round() as u32
}

/// Imports bulk text into a repository
pub struct ImportService {
    repository: Repository,
    parser: BulkParser,
    skip_duplicates: bool,
}

enum CardOutcome {
    Added(CardRecord),
    Skipped,
}

impl ImportService {
    /// Create a service using the default phrase table
    pub fn new(repository: Repository, skip_duplicates: bool) -> Self {
        Self {
            repository,
            parser: BulkParser::default(),
            skip_duplicates,
        }
    }

    /// Replace the parser, e.g. one built from a configured phrase table
    pub fn with_parser(mut self, parser: BulkParser) -> Self {
        self.parser = parser;
        self
    }

    /// Parse and store the cards in `text`, reporting each step to `on_event`
    pub async fn import_text<F>(&self, text: &str, mut on_event: F) -> Result<ImportSummary, ImportError>
    where
        F: FnMut(&ImportEvent),
    {
        let cards = self.parser.parse(text);
        if cards.is_empty() {
            return Err(ImportError::NoValidPairs);
        }

        // Fail the whole import if the store is unreachable, before any card
        let stored = self
            .repository
            .card_count()
            .await
            .map_err(|e| ImportError::Storage(format!("{:#}", e)))?;

        let total = cards.len();
        info!("Importing {} parsed cards into a deck of {}", total, stored);

        let mut summary = ImportSummary {
            total_parsed: total,
            ..ImportSummary::default()
        };

        for (index, card) in cards.iter().enumerate() {
            match self.import_card(card).await {
                Ok(CardOutcome::Added(record)) => {
                    summary.added_count += 1;
                    summary.added.push(record);
                }
                Ok(CardOutcome::Skipped) => {
                    debug!("Skipping duplicate card: {}", card.foreign_text);
                    summary.skipped_count += 1;
                }
                Err(e) => {
                    warn!("Failed to import card '{}': {:#}", card.foreign_text, e);
                    summary.failed_count += 1;
                }
            }

            on_event(&ImportEvent::progress(index + 1, total));
        }

        info!(
            "Import finished: {} added, {} skipped, {} failed",
            summary.added_count, summary.skipped_count, summary.failed_count
        );

        on_event(&ImportEvent::Complete {
            added_count: summary.added_count,
            skipped_count: summary.skipped_count,
            total_parsed: summary.total_parsed,
            message: format!("Successfully added {} cards", summary.added_count),
        });

        Ok(summary)
    }

    async fn import_card(&self, card: &Card) -> anyhow::Result<CardOutcome> {
        if self.skip_duplicates
            && self
                .repository
                .find_by_foreign_text(&card.foreign_text)
                .await?
                .is_some()
        {
            return Ok(CardOutcome::Skipped);
        }

        let record = self.repository.insert_card(card).await?;
        Ok(CardOutcome::Added(record))
    }
}
