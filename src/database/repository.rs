/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API for all card operations,
 * abstracting away the SQL details and providing type-safe access.
 */

use anyhow::Result;
use log::debug;
use rand::Rng;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use super::connection::{DatabaseConnection, DatabaseStats};
use super::models::{dedup_tags, CardPage, CardQuery, CardRecord, CardUpdate, TagCount};
use crate::errors::CardError;
use crate::parser::tags::parse_tag_list;
use crate::parser::Card;

const CARD_COLUMNS: &str = "c.id, c.foreign_text, c.translation_text, c.created_at";

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Card and tag counts
    pub fn stats(&self) -> Result<DatabaseStats> {
        self.db.stats()
    }

    /// Number of stored cards
    pub async fn card_count(&self) -> Result<i64> {
        self.db
            .execute_async(|conn| {
                let count = conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
                Ok(count)
            })
            .await
    }

    // =========================================================================
    // Card Operations
    // =========================================================================

    /// Store a parsed card and return it with its new identity
    pub async fn insert_card(&self, card: &Card) -> Result<CardRecord> {
        let record = CardRecord::from_card(card);

        self.db
            .transaction_async(move |tx| {
                tx.execute(
                    r#"
                    INSERT INTO cards (id, foreign_text, translation_text, created_at)
                    VALUES (?1, ?2, ?3, ?4)
                    "#,
                    params![
                        record.id,
                        record.foreign_text,
                        record.translation_text,
                        record.created_at,
                    ],
                )?;
                Self::replace_tags_sync(tx, &record.id, &record.tags)?;

                debug!("Inserted card {} ({})", record.id, record.foreign_text);
                Ok(record)
            })
            .await
    }

    /// First stored card whose foreign text matches exactly
    pub async fn find_by_foreign_text(&self, foreign_text: &str) -> Result<Option<CardRecord>> {
        let foreign_text = foreign_text.to_string();

        self.db
            .execute_async(move |conn| {
                let sql = format!(
                    "SELECT {} FROM cards c WHERE c.foreign_text = ?1 ORDER BY c.rowid LIMIT 1",
                    CARD_COLUMNS
                );
                let card = conn
                    .query_row(&sql, [&foreign_text], Self::parse_card_row)
                    .optional()?;

                Self::with_tags(conn, card)
            })
            .await
    }

    /// Get a card by ID
    pub async fn get_card(&self, card_id: &str) -> Result<Option<CardRecord>> {
        let card_id = card_id.to_string();

        self.db
            .execute_async(move |conn| Self::get_card_sync(conn, &card_id))
            .await
    }

    /// Get a card by ID (synchronous version for use within transactions)
    fn get_card_sync(conn: &Connection, card_id: &str) -> Result<Option<CardRecord>> {
        let sql = format!("SELECT {} FROM cards c WHERE c.id = ?1", CARD_COLUMNS);
        let card = conn
            .query_row(&sql, [card_id], Self::parse_card_row)
            .optional()?;

        Self::with_tags(conn, card)
    }

    /// Search, filter, sort and paginate stored cards
    pub async fn list_cards(&self, query: &CardQuery) -> Result<CardPage> {
        let query = query.clone();

        self.db
            .execute_async(move |conn| {
                let (where_clause, filter_params) = Self::build_filters(&query);

                let total: i64 = conn.query_row(
                    &format!("SELECT COUNT(*) FROM cards c {}", where_clause),
                    params_from_iter(filter_params.iter()),
                    |row| row.get(0),
                )?;

                let limit = query.limit();
                let direction = query.order.keyword();
                let sql = format!(
                    "SELECT {} FROM cards c {} ORDER BY {} {}, c.rowid {} LIMIT {} OFFSET {}",
                    CARD_COLUMNS,
                    where_clause,
                    query.sort.column(),
                    direction,
                    direction,
                    limit,
                    query.offset()
                );

                let mut stmt = conn.prepare(&sql)?;
                let cards: Vec<CardRecord> = stmt
                    .query_map(params_from_iter(filter_params.iter()), Self::parse_card_row)?
                    .filter_map(|r| r.ok())
                    .collect();
                let cards = Self::with_tags_all(conn, cards)?;

                let total_pages = total.div_euclid(i64::from(limit))
                    + i64::from(total.rem_euclid(i64::from(limit)) != 0);

                Ok(CardPage {
                    cards,
                    total,
                    page: query.page.max(1),
                    per_page: limit,
                    total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
                })
            })
            .await
    }

    /// Pick a random card, optionally restricted to a tag
    pub async fn random_card(&self, tag: Option<&str>) -> Result<Option<CardRecord>> {
        let query = CardQuery {
            tag: tag.map(str::to_string),
            ..CardQuery::default()
        };

        self.db
            .execute_async(move |conn| {
                let (where_clause, filter_params) = Self::build_filters(&query);

                let count: i64 = conn.query_row(
                    &format!("SELECT COUNT(*) FROM cards c {}", where_clause),
                    params_from_iter(filter_params.iter()),
                    |row| row.get(0),
                )?;

                if count == 0 {
                    return Ok(None);
                }

                let offset = rand::rng().random_range(0..count);
                let sql = format!(
                    "SELECT {} FROM cards c {} ORDER BY c.rowid LIMIT 1 OFFSET {}",
                    CARD_COLUMNS, where_clause, offset
                );
                let card = conn
                    .query_row(&sql, params_from_iter(filter_params.iter()), Self::parse_card_row)
                    .optional()?;

                Self::with_tags(conn, card)
            })
            .await
    }

    /// Apply a partial update; `Ok(None)` when the card does not exist
    pub async fn update_card(
        &self,
        card_id: &str,
        update: &CardUpdate,
    ) -> Result<Option<CardRecord>> {
        if update.is_empty() {
            return Err(CardError::InvalidInput("No valid fields to update".to_string()).into());
        }

        let foreign_text = Self::clean_field("foreign_text", update.foreign_text.as_deref())?;
        let translation_text =
            Self::clean_field("translation_text", update.translation_text.as_deref())?;
        let tags = update.tags.as_ref().map(|tags| {
            let normalized: Vec<String> = tags
                .iter()
                .flat_map(|tag| parse_tag_list(tag))
                .collect();
            dedup_tags(&normalized)
        });
        let card_id = card_id.to_string();

        self.db
            .transaction_async(move |tx| {
                if Self::get_card_sync(tx, &card_id)?.is_none() {
                    return Ok(None);
                }

                if let Some(foreign_text) = &foreign_text {
                    tx.execute(
                        "UPDATE cards SET foreign_text = ?1 WHERE id = ?2",
                        params![foreign_text, card_id],
                    )?;
                }

                if let Some(translation_text) = &translation_text {
                    tx.execute(
                        "UPDATE cards SET translation_text = ?1 WHERE id = ?2",
                        params![translation_text, card_id],
                    )?;
                }

                if let Some(tags) = &tags {
                    Self::replace_tags_sync(tx, &card_id, tags)?;
                }

                Self::get_card_sync(tx, &card_id)
            })
            .await
    }

    /// Delete a card; returns whether it existed
    pub async fn delete_card(&self, card_id: &str) -> Result<bool> {
        let card_id = card_id.to_string();

        self.db
            .execute_async(move |conn| {
                // Due to CASCADE, deleting the card removes its tags
                let deleted = conn.execute("DELETE FROM cards WHERE id = ?1", [&card_id])?;
                Ok(deleted > 0)
            })
            .await
    }

    /// All tags with the number of cards carrying them, alphabetical
    pub async fn list_tags(&self) -> Result<Vec<TagCount>> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT tag, COUNT(*) FROM card_tags GROUP BY tag ORDER BY tag",
                )?;

                let tags = stmt
                    .query_map([], |row| {
                        Ok(TagCount {
                            tag: row.get(0)?,
                            card_count: row.get(1)?,
                        })
                    })?
                    .filter_map(|r| r.ok())
                    .collect();

                Ok(tags)
            })
            .await
    }

    /// Every card in insertion order (used for export)
    pub async fn all_cards_oldest_first(&self) -> Result<Vec<CardRecord>> {
        self.db
            .execute_async(|conn| {
                let sql = format!(
                    "SELECT {} FROM cards c ORDER BY c.created_at ASC, c.rowid ASC",
                    CARD_COLUMNS
                );
                let mut stmt = conn.prepare(&sql)?;
                let cards: Vec<CardRecord> = stmt
                    .query_map([], Self::parse_card_row)?
                    .filter_map(|r| r.ok())
                    .collect();

                Self::with_tags_all(conn, cards)
            })
            .await
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn parse_card_row(row: &rusqlite::Row) -> rusqlite::Result<CardRecord> {
        Ok(CardRecord {
            id: row.get(0)?,
            foreign_text: row.get(1)?,
            translation_text: row.get(2)?,
            tags: Vec::new(),
            created_at: row.get(3)?,
        })
    }

    fn load_tags(conn: &Connection, card_id: &str) -> Result<Vec<String>> {
        let mut stmt =
            conn.prepare("SELECT tag FROM card_tags WHERE card_id = ?1 ORDER BY position")?;
        let tags = stmt
            .query_map([card_id], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(tags)
    }

    fn with_tags(conn: &Connection, card: Option<CardRecord>) -> Result<Option<CardRecord>> {
        card.map(|mut card| {
            card.tags = Self::load_tags(conn, &card.id)?;
            Ok::<_, anyhow::Error>(card)
        })
        .transpose()
    }

    fn with_tags_all(conn: &Connection, cards: Vec<CardRecord>) -> Result<Vec<CardRecord>> {
        cards
            .into_iter()
            .map(|mut card| {
                card.tags = Self::load_tags(conn, &card.id)?;
                Ok::<_, anyhow::Error>(card)
            })
            .collect()
    }

    /// Replace a card's tags; repeats collapse onto the first position
    fn replace_tags_sync(conn: &Connection, card_id: &str, tags: &[String]) -> Result<()> {
        conn.execute("DELETE FROM card_tags WHERE card_id = ?1", [card_id])?;

        for (position, tag) in tags.iter().enumerate() {
            conn.execute(
                "INSERT OR IGNORE INTO card_tags (card_id, tag, position) VALUES (?1, ?2, ?3)",
                params![card_id, tag, position as i64],
            )?;
        }

        Ok(())
    }

    /// WHERE clause and its positional parameters for a query's filters
    fn build_filters(query: &CardQuery) -> (String, Vec<String>) {
        let mut conditions = Vec::new();
        let mut filter_params = Vec::new();

        if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            filter_params.push(format!("%{}%", escape_like(search)));
            let idx = filter_params.len();
            conditions.push(format!(
                "(c.foreign_text LIKE ?{idx} ESCAPE '\\' OR c.translation_text LIKE ?{idx} ESCAPE '\\')"
            ));
        }

        if let Some(tag) = query
            .tag
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
        {
            filter_params.push(tag);
            let idx = filter_params.len();
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM card_tags t WHERE t.card_id = c.id AND t.tag = ?{idx})"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        (where_clause, filter_params)
    }

    /// Trim an optional text field, rejecting values that become empty
    fn clean_field(name: &str, value: Option<&str>) -> Result<Option<String>> {
        match value.map(str::trim) {
            Some("") => Err(CardError::InvalidInput(format!("{} cannot be empty", name)).into()),
            Some(value) => Ok(Some(value.to_string())),
            None => Ok(None),
        }
    }
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
