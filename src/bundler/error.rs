//! Error types for pipeline operations.
//!
//! Every fallible bundler operation returns [`Result`]. File system failures
//! carry the operation and path through [`ErrorExt::fs_context`]; optional
//! values and foreign errors are lifted with [`Context::context`].

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};

/// Result type alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Free-form error message.
    #[error("{0}")]
    GenericError(String),

    /// Raw I/O error without path context.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// I/O error on a specific path.
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// What the bundler was doing
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        error: io::Error,
    },

    /// External command could not be spawned.
    #[error("failed to run {command}: {error}")]
    CommandFailed {
        /// Program name
        command: String,
        /// Spawn error
        error: io::Error,
    },

    /// Download failed.
    #[error("can't download {url}: {reason}")]
    DownloadFailed {
        /// Requested URL
        url: String,
        /// Failure reason
        reason: String,
    },

    /// Downloaded file does not match the published checksum.
    #[error("bad md5 checksum for {file}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// File name (now renamed in the cache)
        file: String,
        /// Published checksum
        expected: String,
        /// Computed checksum
        actual: String,
    },

    /// Archive could not be extracted.
    #[error("can't unzip {}: {reason}", archive.display())]
    ExtractFailed {
        /// Archive path
        archive: PathBuf,
        /// Failure reason
        reason: String,
    },

    /// Invalid settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Directory walk error.
    #[error(transparent)]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error(transparent)]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Invalid ignore pattern.
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

/// Adds path context to I/O results.
pub trait ErrorExt<T> {
    /// Converts an I/O error into [`Error::Fs`] naming the operation and path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Attaches a message to optional values and foreign errors.
pub trait Context<T> {
    /// Converts `None` or an error into [`Error::GenericError`].
    fn context<C: Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{}: {}", context, e)))
    }
}

/// Returns early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
