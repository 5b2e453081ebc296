//! Command line interface for the pyembed bundler.
//!
//! This module provides the CLI for bundler operations: argument parsing,
//! configuration loading, command execution and user feedback.

mod args;
pub mod config;
mod output;

pub use args::{Args, BuildArgs, Command, DEFAULT_CONFIG_NAME, RuntimeConfig};
pub use config::{ConfigFile, write_template};
pub use output::OutputManager;

use crate::bundler::{Bundler, Stage, StageReport, Verbosity};
use crate::error::{CliError, Result};
use path_absolutize::Absolutize;
use std::path::Path;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(&args);

    match &args.command {
        Command::Init { path } => init(path, &config).await,
        Command::Build(build_args) => build(build_args, &config).await,
    }
}

async fn init(path: &Path, config: &RuntimeConfig) -> Result<i32> {
    write_template(path).await?;
    config.output().success(&format!(
        "Created {}. Edit it, then run `build`.",
        path.display()
    ))?;
    Ok(0)
}

async fn build(build_args: &BuildArgs, config: &RuntimeConfig) -> Result<i32> {
    let output = config.output();
    let config_path = build_args.config.absolutize()?.into_owned();
    let base_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config_path.clone());

    output.info(&format!("Building from {}", config_path.display()))?;
    let file = ConfigFile::load(&config_path).await?;
    let mut builder = file.into_builder(&base_dir);

    if let Some(level) = build_args.verbose {
        builder = builder.verbosity(Verbosity::from_level(level));
    } else if build_args.json {
        builder = builder.verbosity(Verbosity::Silent);
    }
    if build_args.delayed {
        builder = builder.delayed_install(true);
    }
    if let Some(dir) = &build_args.output {
        builder = builder.output_dir(dir.absolutize()?);
    }

    let settings = builder.build()?;
    output.verbose(&format!("{:?}", settings))?;
    let mut bundler = Bundler::new(settings);
    let report = bundler.run().await?;

    if build_args.json {
        println!("{}", report_json(&report)?);
    }

    if report.all_passed() {
        output.success(&format!(
            "Distribution ready in {}",
            bundler.build_dir().display()
        ))?;
        Ok(0)
    } else {
        let failed = report.failed();
        for stage in &failed {
            output.warn(&format!("{} failed", stage))?;
        }
        output.error(&format!(
            "{} of {} stages failed, see {}",
            failed.len(),
            Stage::ALL.len(),
            bundler.build_dir().display()
        ))?;
        Ok(1)
    }
}

/// Renders the stage report printed by `build --json`.
///
/// This is the only thing `build --json` writes to stdout; pipeline messages
/// and status lines go to stderr.
pub fn report_json(report: &StageReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
