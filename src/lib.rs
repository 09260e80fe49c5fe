/*!
 * # vocabdeck - bulk vocabulary flashcards
 *
 * A Rust library for turning pasted vocabulary lists into flashcards.
 *
 * ## Features
 *
 * - Parse `foreign: translation [tags]` lines in bulk
 * - Expand slash and comma alternatives into separate cards
 *   - Commas inside set phrases and sentences are left alone
 * - Store cards in SQLite with tags, search and pagination
 * - Import with duplicate skipping and per-card progress events
 * - Export the deck back into the same bulk syntax
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `parser`: the pure bulk-text parsing pipeline:
 *   - `parser::line_filter`: line rejection rules
 *   - `parser::pair_splitter`: foreign/translation split
 *   - `parser::tags`: bracketed tag annotations
 *   - `parser::normalizer`: punctuation stripping and length checks
 *   - `parser::comma_classifier`: separating vs phrase commas
 *   - `parser::expander`: variant generation
 * - `database`: SQLite persistence for cards and tags
 * - `import`: bulk import with progress events
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod errors;
pub mod file_utils;
pub mod import;
pub mod language_utils;
pub mod parser;

// Re-export main types for easier usage
pub use app_config::Config;
pub use database::{CardRecord, Repository};
pub use errors::{AppError, CardError, ImportError};
pub use import::{ImportEvent, ImportService, ImportSummary};
pub use language_utils::{get_language_name, validate_language_code};
pub use parser::{format_card_line, parse_bulk_text, BulkParser, Card, RawPair};
