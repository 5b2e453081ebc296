//! Comprehensive error types for bundler operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bundler operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all bundler operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error in {}: {source}", path.display())]
    Toml {
        /// Configuration file being parsed
        path: PathBuf,
        /// Underlying parse error
        source: toml::de::Error,
    },

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Configuration file could not be found
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Refusing to overwrite an existing file
    #[error("A file named {} is already present", path.display())]
    AlreadyExists {
        /// Existing file
        path: PathBuf,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            BundlerError::Cli(CliError::ConfigNotFound { .. }) => vec![
                "Run `kodegen_bundler_pyembed init` to generate a pyembed.toml".to_string(),
            ],
            BundlerError::Cli(CliError::AlreadyExists { .. }) => {
                vec!["Delete or rename the existing file, then try again".to_string()]
            }
            BundlerError::Toml { .. } => {
                vec!["Compare your file with a fresh `init` template".to_string()]
            }
            BundlerError::Bundler(crate::bundler::Error::DownloadFailed { .. })
            | BundlerError::Bundler(crate::bundler::Error::ChecksumMismatch { .. }) => vec![
                "Check your network connection and retry".to_string(),
                "Set `use_cache = false` to force a fresh download".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
