use anyhow::{Result, Context};
use chrono::Local;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

// @module: File and stream utilities for bulk text

/// Input name that selects standard input
pub const STDIN_MARKER: &str = "-";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Read bulk text from a file, or from stdin when the input is `-`
    pub fn read_input(input: &str) -> Result<String> {
        if input == STDIN_MARKER {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read from stdin")?;
            return Ok(text);
        }

        Self::read_to_string(input)
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    // @generates: Timestamped export filename in the given directory
    pub fn generate_export_path<P: AsRef<Path>>(output_dir: P) -> PathBuf {
        let timestamp = Local::now().format("%Y%m%d-%H%M%S");
        output_dir
            .as_ref()
            .join(format!("vocabdeck-export-{}.txt", timestamp))
    }
}
