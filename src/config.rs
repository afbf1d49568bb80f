//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config PATH`, else `<config dir>/dupesync/config.toml`)
//! 3. Environment variables prefixed with `DUPESYNC_` (e.g. `DUPESYNC_THREADS=4`)
//! 4. Command-line flags
//!
//! A missing file is fine; a malformed one is an error.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::{OutputFormat, ScanOptions};
use crate::scanner::{SignatureEngine, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hashing threads; 1 signs files sequentially
    pub threads: usize,
    /// Read chunk size in bytes for content hashing
    pub chunk_size: usize,
    /// Default report format
    pub output: OutputFormat,
    /// Colored text output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threads: 1,
            chunk_size: DEFAULT_CHUNK_SIZE,
            output: OutputFormat::Text,
            color: true,
        }
    }
}

/// Errors raised while loading configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    Value(String),
}

impl Config {
    /// Load defaults, the config file and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a layer cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = path.map(Path::to_path_buf).or_else(Self::default_path);
        if let Some(ref file) = file {
            log::debug!("Reading configuration from {}", file.display());
        }
        Self::figment(file.as_deref()).extract().map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// The layered provider chain without CLI overrides.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed("DUPESYNC_"))
    }

    /// Apply command-line overrides on top of the loaded layers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Value`] if any numeric option is zero or the
    /// chunk size is above [`MAX_CHUNK_SIZE`].
    pub fn with_overrides(mut self, options: &ScanOptions, no_color: bool) -> Result<Self, ConfigError> {
        if let Some(output) = options.output {
            self.output = output;
        }
        if let Some(threads) = options.threads {
            self.threads = threads;
        }
        if let Some(chunk_size) = options.chunk_size {
            self.chunk_size = usize::try_from(chunk_size)
                .map_err(|_| ConfigError::Value(format!("chunk size {chunk_size} is too large")))?;
        }
        if no_color {
            self.color = false;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::Value("threads must be at least 1".into()));
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::Value("chunk_size must be at least 1".into()));
        }
        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigError::Value(format!(
                "chunk_size {} exceeds the maximum of {MAX_CHUNK_SIZE} bytes",
                self.chunk_size
            )));
        }
        Ok(())
    }

    /// Signature engine configured from these settings.
    #[must_use]
    pub fn signature_engine(&self) -> SignatureEngine {
        SignatureEngine::new()
            .with_chunk_size(self.chunk_size)
            .with_threads(self.threads)
    }

    /// Default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dupesync", "dupesync")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
