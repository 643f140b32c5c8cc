use std::{io, path::PathBuf};

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

mod de;
use de::deserialize_present;

#[derive(Parser, Debug, Default)]
#[clap(name = "text2bin", disable_help_flag = true)]
/// Print the binary digits of every byte of a text or of standard input
///
/// When data is piped into standard input, it is converted in chunks and
/// `--text` is ignored.
pub struct Options {
    /// The string to be converted to its binary format
    #[clap(long)]
    pub text: Option<String>,
    /// Displays this help
    #[clap(long)]
    pub help: bool,
    /// Set the delimiter between binary values [default: ""]
    #[clap(long, allow_hyphen_values = true)]
    pub delim: Option<String>,
    /// The size of the buffer to be used (only applies to data piped through stdin)
    ///
    /// Values <= 0 use the default of 8192 bytes.
    #[clap(long = "buffersize", allow_hyphen_values = true)]
    pub buffer_size: Option<i64>,
    /// A RON file with defaults for `delim` and `buffer_size`
    #[clap(long)]
    pub config: Option<PathBuf>,
}

/// Defaults loaded from a config file
///
/// ```ron
/// (delim: " ", buffer_size: 65536)
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Delimiter between binary values
    #[serde(default, deserialize_with = "deserialize_present")]
    pub delim: Option<String>,
    /// Read buffer size for piped input
    #[serde(default, deserialize_with = "deserialize_present")]
    pub buffer_size: Option<i64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO Error")]
    Io(#[from] io::Error),
    #[error("Deserialize Error")]
    Ron(#[from] ron::error::Error),
}

/// The effective settings after merging flags and config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Always present, possibly empty
    pub delim: String,
    /// `None` selects the default buffer size
    pub buffer_size: Option<usize>,
}

impl Config {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }
}

impl Options {
    pub fn config(&self) -> Result<Config, ConfigError> {
        if let Some(config_path) = &self.config {
            let text = std::fs::read_to_string(config_path)?;
            Config::parse(&text)
        } else {
            Ok(Config::default())
        }
    }

    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let config = self.config()?;
        Ok(self.merge(config))
    }

    fn merge(&self, config: Config) -> Settings {
        let delim = self.delim.clone().or(config.delim).unwrap_or_default();
        let buffer_size = self
            .buffer_size
            .or(config.buffer_size)
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n > 0);
        Settings { delim, buffer_size }
    }
}
