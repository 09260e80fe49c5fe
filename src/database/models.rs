/*!
 * Database entity models and DTOs.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parser::Card;

/// Upper bound for a single page of results
pub const MAX_PAGE_SIZE: u32 = 500;

/// A stored flashcard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Unique card identifier (UUID)
    pub id: String,
    /// The term being learned
    pub foreign_text: String,
    /// Its translation
    pub translation_text: String,
    /// Distinct tags, first-seen order
    pub tags: Vec<String>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

impl CardRecord {
    /// Build a new record for a parsed card, assigning identity and timestamp
    pub fn from_card(card: &Card) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            foreign_text: card.foreign_text.clone(),
            translation_text: card.translation_text.clone(),
            tags: dedup_tags(&card.tags),
            created_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
        }
    }

    /// The card content without storage identity
    pub fn to_card(&self) -> Card {
        Card::new(
            self.foreign_text.clone(),
            self.translation_text.clone(),
            self.tags.clone(),
        )
    }
}

/// Drop repeated tags, keeping the first occurrence
pub fn dedup_tags(tags: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.iter()
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

/// Partial update of a stored card; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardUpdate {
    pub foreign_text: Option<String>,
    pub translation_text: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl CardUpdate {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.foreign_text.is_none() && self.translation_text.is_none() && self.tags.is_none()
    }
}

/// Sortable card columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Creation time
    #[default]
    CreatedAt,
    /// Foreign text, alphabetical
    ForeignText,
    /// Translation text, alphabetical
    TranslationText,
}

impl SortField {
    /// Column name used in ORDER BY
    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "c.created_at",
            SortField::ForeignText => "c.foreign_text",
            SortField::TranslationText => "c.translation_text",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::CreatedAt => write!(f, "created_at"),
            SortField::ForeignText => write!(f, "foreign_text"),
            SortField::TranslationText => write!(f, "translation_text"),
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created_at" | "created" => Ok(SortField::CreatedAt),
            "foreign_text" | "foreign" => Ok(SortField::ForeignText),
            "translation_text" | "translation" => Ok(SortField::TranslationText),
            _ => Err(anyhow::anyhow!("Invalid sort field: {}", s)),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Filters, ordering and paging for card listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardQuery {
    /// Substring matched against either side
    pub search: Option<String>,
    /// Only cards carrying this tag
    pub tag: Option<String>,
    pub sort: SortField,
    pub order: SortOrder,
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
}

impl Default for CardQuery {
    fn default() -> Self {
        Self {
            search: None,
            tag: None,
            sort: SortField::default(),
            order: SortOrder::default(),
            page: 1,
            per_page: 20,
        }
    }
}

impl CardQuery {
    /// Page size clamped to 1..=MAX_PAGE_SIZE
    pub fn limit(&self) -> u32 {
        self.per_page.clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset for the requested page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.limit())
    }
}

/// One page of cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardPage {
    pub cards: Vec<CardRecord>,
    /// Cards matching the filters across all pages
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl CardPage {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Tag usage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub card_count: i64,
}
