//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation and
//! the runtime configuration derived from the arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file name.
pub const DEFAULT_CONFIG_NAME: &str = "pyembed.toml";

/// Embedded Python distribution bundler
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_pyembed",
    version,
    about = "Embedded Python distribution bundler",
    long_about = "Builds a ready-to-ship folder with an embeddable Windows Python runtime,
your project trees, their dependencies and a first-run bootstrap.

Usage:
  kodegen_bundler_pyembed init
  kodegen_bundler_pyembed build
  kodegen_bundler_pyembed build --config path/to/pyembed.toml --delayed --verbose 2

Exit code 0 = every stage succeeded."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a commented configuration template
    Init {
        /// Where to write the template
        #[arg(value_name = "PATH", default_value = DEFAULT_CONFIG_NAME)]
        path: PathBuf,
    },

    /// Build a distribution folder from a configuration file
    Build(BuildArgs),
}

/// Options of the `build` subcommand.
#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Configuration file; relative paths inside it are resolved against its directory
    #[arg(
        short,
        long,
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_NAME,
        env = "PYEMBED_CONFIG"
    )]
    pub config: PathBuf,

    /// Override the configured verbosity: 0 (silent), 1 (normal), 2 (debug)
    #[arg(short, long, value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=2))]
    pub verbose: Option<u8>,

    /// Force a delayed install (pip, dependencies and compilation run on the user machine)
    #[arg(long)]
    pub delayed: bool,

    /// Override the build directory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Print the stage report as JSON on stdout (implies --verbose 0 unless given)
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Init { path } if path.as_os_str().is_empty() => {
                Err("Init path cannot be empty".to_string())
            }
            Command::Build(build) if build.config.as_os_str().is_empty() => {
                Err("Config path cannot be empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let (verbose, quiet) = match &args.command {
            Command::Build(build) => (
                build.verbose.is_some_and(|v| v >= 2),
                build.json && build.verbose.is_none(),
            ),
            Command::Init { .. } => (false, false),
        };

        Self {
            output: super::OutputManager::new(verbose, quiet),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}
