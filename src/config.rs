//! Configuration management for rcookie

use std::path::PathBuf;

use crate::error::Result;
use crate::utils::FileUtils;

/// Where a cookie payload is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// Read the whole payload
    pub fn read(&self) -> Result<String> {
        match self {
            InputSource::Inline(text) => Ok(text.clone()),
            InputSource::File(path) => {
                FileUtils::check_file_readable(path)?;
                Ok(std::fs::read_to_string(path)?)
            }
            InputSource::Stdin => Ok(std::io::read_to_string(std::io::stdin())?),
        }
    }
}

/// The operation a run performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Capture the cookies for `url` and print them as text
    Export { url: String },
    /// Parse a payload and apply it to the store for `url`
    Import { url: String, input: InputSource },
    /// Show the records a payload would produce
    Parse { input: InputSource },
}

/// Output configuration
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub file: Option<PathBuf>,
    pub verbose: bool,
    pub silent: bool,
    pub format_json: bool,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub action: Action,
    pub jar: PathBuf,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            action: Action::Parse {
                input: InputSource::Stdin,
            },
            jar: FileUtils::default_jar_path().unwrap_or_else(|_| PathBuf::from("cookies.txt")),
            output: OutputConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, Config, InputSource};
    use crate::error::RcookieError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn default_config_parses_stdin() {
        let config = Config::default();
        assert_eq!(
            config.action,
            Action::Parse {
                input: InputSource::Stdin
            }
        );
        assert!(config.jar.ends_with("cookies.txt"));
    }

    #[test]
    fn input_source_reads_inline_and_file() {
        let inline = InputSource::Inline("a=1".to_string());
        assert_eq!(inline.read().expect("inline"), "a=1");

        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("payload.txt");
        fs::write(&path, "b=2; c=3").expect("write");
        assert_eq!(
            InputSource::File(path).read().expect("file"),
            "b=2; c=3"
        );

        let err = InputSource::File(temp.path().join("missing"))
            .read()
            .expect_err("missing");
        assert!(matches!(err, RcookieError::FileNotFound(_)));
    }
}
