/*!
 * Tests for error types
 */

use vocabdeck::errors::{AppError, CardError, ImportError};

/// Test that import errors convert into AppError
#[test]
fn test_app_error_from_import_error_shouldWrap() {
    let error: AppError = ImportError::NoValidPairs.into();

    assert!(matches!(error, AppError::Import(ImportError::NoValidPairs)));
    assert_eq!(
        error.to_string(),
        "Import error: No valid card pairs found in text"
    );
}

/// Test that io errors become file errors
#[test]
fn test_app_error_from_io_error_shouldBeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "lesson.txt missing");

    let error: AppError = io_error.into();

    assert!(matches!(error, AppError::File(_)));
    assert!(error.to_string().contains("lesson.txt missing"));
}

/// Test that anyhow errors keep their message
#[test]
fn test_app_error_from_anyhow_shouldBeUnknown() {
    let error: AppError = anyhow::anyhow!("database locked").into();

    assert!(matches!(error, AppError::Unknown(_)));
    assert_eq!(error.to_string(), "Unknown error: database locked");
}

/// Test that card errors can be recovered from anyhow
#[test]
fn test_card_error_throughAnyhow_shouldDowncast() {
    let error: anyhow::Error = CardError::InvalidInput("empty".to_string()).into();

    assert!(matches!(
        error.downcast_ref::<CardError>(),
        Some(CardError::InvalidInput(_))
    ));
}

/// Test that card errors returned through anyhow map back to AppError::Card
#[test]
fn test_app_error_from_anyhow_withCardError_shouldBeCardError() {
    let error: anyhow::Error = CardError::NotFound("abc".to_string()).into();

    let error: AppError = error.into();

    assert!(matches!(error, AppError::Card(CardError::NotFound(_))));
    assert_eq!(error.exit_code(), 1);
}
