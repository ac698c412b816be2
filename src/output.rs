//! Output formatting and display utilities

use crate::codec::CookieRecord;
use crate::config::OutputConfig;
use crate::error::Result;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Output writer that handles file vs stdout
pub struct OutputWriter {
    config: OutputConfig,
}

impl OutputWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Write content to configured output
    pub fn write(&self, content: &str) -> Result<()> {
        if let Some(file_path) = &self.config.file {
            self.write_to_file(content, file_path)
        } else {
            self.write_to_stdout(content)
        }
    }

    /// Write a status line to stdout unless silenced
    pub fn write_status(&self, message: &str) -> Result<()> {
        if !self.config.silent {
            self.write_to_stdout(&format!("{}\n", message))?;
        }
        Ok(())
    }

    /// Write verbose information (if enabled)
    pub fn write_verbose(&self, message: &str) -> Result<()> {
        if self.config.verbose && !self.config.silent {
            eprintln!("* {}", message);
        }
        Ok(())
    }

    /// Write error message
    pub fn write_error(&self, message: &str) -> Result<()> {
        if !self.config.silent {
            eprintln!("rcookie: error: {}", message);
        }
        Ok(())
    }

    fn write_to_file(&self, content: &str, file_path: &Path) -> Result<()> {
        let mut file = File::create(file_path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_to_stdout(&self, content: &str) -> Result<()> {
        io::stdout().write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Render parsed records, one `name=value` per line or as a JSON array
pub fn render_records(records: &[CookieRecord], json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(records)?));
    }
    Ok(records
        .iter()
        .map(|r| format!("{}={}\n", r.name(), r.value()))
        .collect())
}

/// Terminate text payloads with a newline when written to a terminal
pub fn with_trailing_newline(content: String) -> String {
    if content.ends_with('\n') {
        content
    } else {
        format!("{}\n", content)
    }
}
