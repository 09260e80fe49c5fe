/*!
 * Tests for application configuration
 */

use anyhow::Result;
use vocabdeck::app_config::{Config, LogLevel};
use vocabdeck::parser::DEFAULT_PHRASE_PATTERNS;
use crate::common;

/// Test that a missing config file is created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefault() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config, Config::default());
    assert_eq!(Config::load(&path)?, config);
    Ok(())
}

/// Test that an existing file is loaded rather than replaced
#[test]
fn test_load_or_create_withExistingFile_shouldLoadIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{
            "foreign_language": "fr",
            "native_language": "en",
            "database": { "path": "/tmp/fr.db" },
            "parser": { "phrase_patterns": ["bonjour,"] },
            "log_level": "debug"
        }"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.foreign_language, "fr");
    assert_eq!(config.database.path.as_deref(), Some("/tmp/fr.db"));
    assert_eq!(config.parser.phrase_patterns, vec!["bonjour,"]);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.import.skip_duplicates);
    assert!(config.validate().is_ok());
    Ok(())
}

/// Test that malformed JSON is reported with the file name
#[test]
fn test_load_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;

    let error = Config::load(&path).unwrap_err();

    assert!(error.to_string().contains("broken.json"));
    Ok(())
}

/// Test that the configured phrase table drives the parser
#[test]
fn test_build_parser_shouldUseConfiguredPatterns() {
    let mut config = Config::default();
    assert_eq!(
        config.build_parser().classifier().phrase_patterns().len(),
        DEFAULT_PHRASE_PATTERNS.len()
    );
    assert_eq!(config.build_parser().parse("salut, ana: hi ana").len(), 1);

    config.parser.phrase_patterns.clear();
    assert_eq!(config.build_parser().parse("salut, ana: hi ana").len(), 3);
}

/// Test that the page size bounds are enforced
#[test]
fn test_validate_withPageSizeBounds_shouldCheckRange() {
    let mut config = Config::default();

    config.import.default_page_size = 500;
    assert!(config.validate().is_ok());

    config.import.default_page_size = 501;
    assert!(config.validate().is_err());
}

/// Test that log levels map onto the log facade
#[test]
fn test_log_level_to_level_filter_shouldMatch() {
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
    assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
}
