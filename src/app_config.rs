use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::database::models::MAX_PAGE_SIZE;
use crate::database::DatabaseConnection;
use crate::parser::{BulkParser, DEFAULT_PHRASE_PATTERNS};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Language being learned (ISO)
    #[serde(default = "default_foreign_language")]
    pub foreign_language: String,

    /// Learner's language (ISO)
    #[serde(default = "default_native_language")]
    pub native_language: String,

    /// Storage config
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Import config
    #[serde(default)]
    pub import: ImportConfig,

    /// Parser config
    #[serde(default)]
    pub parser: ParserConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Database location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct DatabaseConfig {
    /// SQLite file path; the user data directory when unset
    #[serde(default)]
    pub path: Option<String>,
}

impl DatabaseConfig {
    /// Resolved database file path
    pub fn resolve_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(PathBuf::from(path)),
            None => DatabaseConnection::default_database_path(),
        }
    }
}

/// Bulk import behaviour
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ImportConfig {
    /// Skip cards whose foreign text is already stored
    #[serde(default = "default_skip_duplicates")]
    pub skip_duplicates: bool,

    /// Cards per page in listings
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            skip_duplicates: default_skip_duplicates(),
            default_page_size: default_page_size(),
        }
    }
}

/// Parser tuning
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ParserConfig {
    /// Fragments that mark a comma as part of a set phrase
    #[serde(default = "default_phrase_patterns")]
    pub phrase_patterns: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            phrase_patterns: default_phrase_patterns(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_foreign_language() -> String {
    "ro".to_string()
}

fn default_native_language() -> String {
    "en".to_string()
}

fn default_skip_duplicates() -> bool {
    true
}

fn default_page_size() -> u32 {
    20
}

fn default_phrase_patterns() -> Vec<String> {
    DEFAULT_PHRASE_PATTERNS.iter().map(|p| p.to_string()).collect()
}

impl Config {
    /// Load the configuration file, writing a default one if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Load the configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        crate::language_utils::validate_language_code(&self.foreign_language)
            .context("Invalid foreign_language")?;
        crate::language_utils::validate_language_code(&self.native_language)
            .context("Invalid native_language")?;

        let page_size = self.import.default_page_size;
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(anyhow!(
                "import.default_page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE,
                page_size
            ));
        }

        if self
            .parser
            .phrase_patterns
            .iter()
            .any(|pattern| pattern.trim().is_empty())
        {
            return Err(anyhow!("parser.phrase_patterns must not contain empty entries"));
        }

        if let Some(path) = &self.database.path {
            if path.trim().is_empty() {
                return Err(anyhow!("database.path must not be empty when set"));
            }
        }

        Ok(())
    }

    /// Parser using the configured phrase table
    pub fn build_parser(&self) -> BulkParser {
        BulkParser::with_phrase_patterns(self.parser.phrase_patterns.iter().cloned())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            foreign_language: default_foreign_language(),
            native_language: default_native_language(),
            database: DatabaseConfig::default(),
            import: ImportConfig::default(),
            parser: ParserConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
