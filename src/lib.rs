//! Embedded Python distribution bundler library
//!
//! This library turns one or more Python project trees plus a target Python
//! version into a self-contained distribution folder:
//! - stages a Windows "embeddable" Python runtime
//! - installs pip and third-party dependencies (now, or on the user machine)
//! - copies and optionally precompiles the project files
//! - emits a first-run bootstrap script and a one-line `install.bat` launcher
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
