/*!
 * Database module for persistent storage of flashcards.
 *
 * This module provides SQLite-based persistence for:
 * - Cards with their identity and creation time
 * - Card tags, kept in first-seen order
 * - Search, tag filtering and pagination over stored cards
 */

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;

// Re-export main types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use models::{CardPage, CardQuery, CardRecord, CardUpdate, SortField, SortOrder, TagCount};
pub use repository::Repository;
