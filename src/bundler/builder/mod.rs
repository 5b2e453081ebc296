//! Pipeline orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that stages an
//! embeddable runtime, the projects and their dependencies into a
//! distribution folder, and the [`StageReport`] describing the outcome.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_pyembed::bundler::{Bundler, DirSpec, SettingsBuilder};
//!
//! # async fn example() -> kodegen_bundler_pyembed::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .python_version("3.8-32")
//!     .project(DirSpec::new("app").entry_point("main.pyw", "App"))
//!     .dependencies(vec!["arrow".into()])
//!     .build()?;
//!
//! let mut bundler = Bundler::new(settings);
//! let report = bundler.run().await?;
//! for (stage, passed) in report.iter() {
//!     println!("{}: {}", stage, if passed { "ok" } else { "ERROR" });
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`checksum`] - MD5 verification of downloads
//! - [`orchestrator`] - Main [`Bundler`] struct and its stages
//! - [`report`] - [`Stage`] and [`StageReport`]
//! - [`tool_detection`] - Host interpreter detection

pub mod checksum;
mod orchestrator;
mod report;
pub mod tool_detection;

pub use orchestrator::{Bundler, MessageSink};
pub use report::{Stage, StageReport};
