//! Utility functions and helpers

use crate::error::{RcookieError, Result};
use std::path::{Path, PathBuf};
use url::Url;

const SECURE_SCHEMES: [&str; 2] = ["https", "wss"];

/// URL validation and parsing utilities
pub struct UrlUtils;

impl UrlUtils {
    /// Validate and normalize URL
    pub fn validate_url(input: &str) -> Result<Url> {
        // Add http:// if no scheme is provided
        let url_str = if input.contains("://") {
            input.to_string()
        } else {
            format!("http://{}", input)
        };

        let url = Url::parse(&url_str)
            .map_err(|e| RcookieError::InvalidUrl(format!("Invalid URL '{}': {}", input, e)))?;
        if url.host_str().is_none() {
            return Err(RcookieError::InvalidUrl(format!(
                "URL '{}' has no host",
                input
            )));
        }
        Ok(url)
    }

    /// Extract domain from URL for cookie filtering
    pub fn extract_domain(url: &Url) -> Option<String> {
        url.domain().map(|d| d.to_ascii_lowercase())
    }

    /// Host used to scope captured cookies; falls back to the IP literal
    pub fn cookie_host(url: &Url) -> Option<String> {
        Self::extract_domain(url).or_else(|| url.host_str().map(|h| h.to_string()))
    }

    /// Whether the scheme only carries secure cookies
    pub fn is_secure(url: &Url) -> bool {
        SECURE_SCHEMES.contains(&url.scheme())
    }
}

/// File system utilities
pub struct FileUtils;

impl FileUtils {
    /// Expand tilde (~) in file paths
    pub fn expand_path(path: &str) -> Result<PathBuf> {
        if path != "~" && !path.starts_with("~/") {
            return Ok(PathBuf::from(path));
        }
        let home_dir = dirs::home_dir()
            .ok_or_else(|| RcookieError::Config("Cannot determine home directory".to_string()))?;
        match path.strip_prefix("~/") {
            Some(rest) => Ok(home_dir.join(rest)),
            None => Ok(home_dir),
        }
    }

    /// Check if file exists and is readable
    pub fn check_file_readable(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(RcookieError::FileNotFound(format!(
                "File not found: {:?}",
                path
            )));
        }

        if !path.is_file() {
            return Err(RcookieError::Config(format!(
                "Path is not a file: {:?}",
                path
            )));
        }

        std::fs::File::open(path).map_err(|e| {
            RcookieError::PermissionDenied(format!("Cannot read file {:?}: {}", path, e))
        })?;

        Ok(())
    }

    /// Default cookie jar location under the user's data directory
    pub fn default_jar_path() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join("rcookie").join("cookies.txt"))
            .ok_or_else(|| RcookieError::Config("Cannot determine data directory".to_string()))
    }
}
