//! Embedded Python distribution bundling.
//!
//! # Module Organization
//!
//! - [`settings`] - Immutable, validated build configuration
//! - [`runtime`] - Runtime catalog, version resolution and import-path patching
//! - [`planner`] - Source/target directory planning and the entry-point table
//! - [`builder`] - The [`Bundler`] stage pipeline and its [`StageReport`]
//! - [`bootstrap`] - Second-stage bootstrap script and launcher rendering
//! - [`host`] - Collaborator traits (fetch, extract, run, copy) and their implementations
//! - [`utils`] - File system helpers

pub mod bootstrap;
pub mod builder;
pub mod error;
pub mod host;
pub mod planner;
pub mod runtime;
pub mod settings;
pub mod utils;

pub use bootstrap::{BootstrapArtifacts, BootstrapInputs, DeferredActions};
pub use builder::{Bundler, MessageSink, Stage, StageReport};
pub use error::{Error, Result};
pub use host::HostServices;
pub use planner::{DirectoryPlan, EntryPoint, EntryPointTable, Flavor, Origin};
pub use runtime::{HostRuntime, ResolvedVersion};
pub use settings::{
    Arch, DirSpec, EntryPointDecl, PostBuildHook, Settings, SettingsBuilder, Verbosity,
};
