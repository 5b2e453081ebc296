//! Core Settings struct and implementations.

use super::{DirSpec, PostBuildHook, Verbosity};
use std::path::{Path, PathBuf};

/// Cache directory name, created next to the configuration.
pub const CACHE_DIR_NAME: &str = "pyembed_cache";

/// Build directory prefix; a `YYYYmmdd_HHMMSS` timestamp is appended.
pub const BUILD_DIR_PREFIX: &str = "pyembed_build_";

/// Default welcome text printed by the bootstrap on the user machine.
pub const DEFAULT_WELCOME_MESSAGE: &str = "\nInstalling project... Please wait...\n\n";

/// Default goodbye text; the bootstrap waits for ENTER after printing it.
pub const DEFAULT_GOODBYE_MESSAGE: &str = "Done.\nPress ENTER to exit.";

/// Main settings for one bundler run.
///
/// Immutable once built. Constructed and validated via [`SettingsBuilder`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_pyembed::bundler::{DirSpec, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_pyembed::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .base_dir("/work/myapp")
///     .python_version("3.8-32")
///     .project(DirSpec::new("src/myapp").entry_point("main.pyw", "My App"))
///     .dependencies(vec!["arrow".into()])
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`SettingsBuilder`] - Builder for constructing Settings
/// - [`DirSpec`] - Project and copy-dir declarations
///
/// [`SettingsBuilder`]: super::SettingsBuilder
#[derive(Clone, Debug)]
pub struct Settings {
    /// Directory relative paths are resolved against (absolute).
    pub(super) base_dir: PathBuf,

    /// Free-form target version request, e.g. `"3"`, `"3.8.10-32"`.
    pub(super) python_version: String,

    /// Defer pip, dependency install and compilation to the user machine.
    pub(super) delayed_install: bool,

    /// Install pip into the staged runtime.
    pub(super) pip_required: bool,

    /// Optional requirements manifest.
    pub(super) requirements: Option<PathBuf>,

    /// Extra packages in pip-install format (`arrow`, `arrow>=1`).
    pub(super) dependencies: Vec<String>,

    /// Reuse previously downloaded runtime archives.
    pub(super) use_cache: bool,

    /// Let pip keep its cache in the bundler cache dir.
    pub(super) pip_cache: bool,

    /// Options passed to `pip` itself.
    pub(super) pip_args: Vec<String>,

    /// Options passed to `pip install`.
    pub(super) pip_install_args: Vec<String>,

    pub(super) verbosity: Verbosity,

    /// Project trees: copied, compiled, put on the import path.
    pub(super) projects: Vec<DirSpec>,

    /// Non-project trees: copied as-is.
    pub(super) copy_dirs: Vec<DirSpec>,

    /// Glob patterns skipped while copying projects.
    pub(super) ignore_patterns: Vec<String>,

    /// Compile project modules to bytecode.
    pub(super) compile: bool,

    /// Remove `.py` sources after compiling.
    pub(super) pyc_only: bool,

    pub(super) welcome_message: String,
    pub(super) goodbye_message: String,

    pub(super) hook: PostBuildHook,

    /// Explicit build directory; a timestamped one under `base_dir` otherwise.
    pub(super) output_dir: Option<PathBuf>,

    /// Explicit cache directory; `base_dir/pyembed_cache` otherwise.
    pub(super) cache_dir: Option<PathBuf>,
}

impl Settings {
    /// Returns the base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the raw version request.
    pub fn python_version(&self) -> &str {
        &self.python_version
    }

    /// Returns whether installs and compilation are deferred to the user machine.
    pub fn delayed_install(&self) -> bool {
        self.delayed_install
    }

    /// Returns whether pip is required.
    pub fn pip_required(&self) -> bool {
        self.pip_required
    }

    /// Returns the requirements manifest, resolved against the base dir.
    pub fn requirements(&self) -> Option<PathBuf> {
        self.requirements.as_ref().map(|p| self.base_dir.join(p))
    }

    /// Returns the explicit dependency list.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Returns true if any dependency is wanted (manifest or list).
    pub fn wants_dependencies(&self) -> bool {
        self.requirements.is_some() || !self.dependencies.is_empty()
    }

    /// Returns whether cached downloads are reused.
    pub fn use_cache(&self) -> bool {
        self.use_cache
    }

    /// Returns whether pip keeps its cache in the bundler cache dir.
    pub fn pip_cache(&self) -> bool {
        self.pip_cache
    }

    /// Returns the configured pip options (without derived defaults).
    pub fn pip_args(&self) -> &[String] {
        &self.pip_args
    }

    /// Returns the configured `pip install` options.
    pub fn pip_install_args(&self) -> &[String] {
        &self.pip_install_args
    }

    /// Returns the verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Returns the project declarations.
    pub fn projects(&self) -> &[DirSpec] {
        &self.projects
    }

    /// Returns the copy-dir declarations.
    pub fn copy_dirs(&self) -> &[DirSpec] {
        &self.copy_dirs
    }

    /// Returns the configured ignore patterns (without derived defaults).
    pub fn ignore_patterns(&self) -> &[String] {
        &self.ignore_patterns
    }

    /// Returns whether project modules are compiled.
    pub fn compile(&self) -> bool {
        self.compile
    }

    /// Returns true when sources are stripped after compilation.
    ///
    /// Only meaningful when compilation is enabled.
    pub fn pyc_only(&self) -> bool {
        self.compile && self.pyc_only
    }

    /// Returns the bootstrap welcome text.
    pub fn welcome_message(&self) -> &str {
        &self.welcome_message
    }

    /// Returns the bootstrap goodbye text.
    pub fn goodbye_message(&self) -> &str {
        &self.goodbye_message
    }

    /// Returns the post-build hook.
    pub fn hook(&self) -> &PostBuildHook {
        &self.hook
    }

    /// Returns the explicit build directory, if any.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Returns the download cache directory, resolved against the base dir.
    pub fn cache_dir(&self) -> PathBuf {
        match &self.cache_dir {
            Some(dir) => self.base_dir.join(dir),
            None => self.base_dir.join(CACHE_DIR_NAME),
        }
    }
}
