/*!
 * Error types for the vocabdeck application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions. The parser itself
 * has no error type: rejected lines are dropped, never reported.
 */

use thiserror::Error;

/// Errors that can occur during a bulk import
#[derive(Error, Debug)]
pub enum ImportError {
    /// The text produced no cards at all
    #[error("No valid card pairs found in text")]
    NoValidPairs,

    /// The store could not be reached before any card was processed
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Errors that can occur when working with stored cards
#[derive(Error, Debug)]
pub enum CardError {
    /// No card with the given ID
    #[error("Card not found: {0}")]
    NotFound(String),

    /// Rejected field values
    #[error("Invalid card data: {0}")]
    InvalidInput(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from an import
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Error from card operations
    #[error("Card error: {0}")]
    Card(#[from] CardError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 2,
            _ => 1,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        let error = match error.downcast::<ImportError>() {
            Ok(import_error) => return Self::Import(import_error),
            Err(error) => error,
        };
        let error = match error.downcast::<CardError>() {
            Ok(card_error) => return Self::Card(card_error),
            Err(error) => error,
        };

        // Keep the context chain so the failing path is reported
        if error.downcast_ref::<std::io::Error>().is_some() {
            return Self::File(format!("{:#}", error));
        }

        Self::Unknown(format!("{:#}", error))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
