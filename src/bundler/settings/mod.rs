//! Configuration structures for bundling operations.
//!
//! This module provides the immutable build configuration, the declarations
//! of projects and copy dirs, and a builder that validates everything up front.

mod arch;
mod builder;
pub(crate) mod core;
mod hook;
mod project;
mod verbosity;

// Re-export all public types
pub use arch::Arch;
pub use builder::SettingsBuilder;
pub use self::core::{
    BUILD_DIR_PREFIX, CACHE_DIR_NAME, DEFAULT_GOODBYE_MESSAGE, DEFAULT_WELCOME_MESSAGE, Settings,
};
pub use hook::PostBuildHook;
pub use project::{DirSpec, EntryPointDecl};
pub use verbosity::Verbosity;
