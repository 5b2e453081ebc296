//! Builder for constructing Settings.

use super::{
    DirSpec, PostBuildHook, Settings, Verbosity,
    core::{DEFAULT_GOODBYE_MESSAGE, DEFAULT_WELCOME_MESSAGE},
};
use crate::bundler::{Error, Result, error::ErrorExt};
use path_absolutize::Absolutize;
use std::path::{Component, Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Starts from the stock configuration (latest Python 3, pip required,
/// compile on, cache on, normal verbosity) and validates everything in
/// [`build`](Self::build).
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_pyembed::bundler::{DirSpec, SettingsBuilder, Verbosity};
///
/// # fn example() -> kodegen_bundler_pyembed::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .base_dir(".")
///     .python_version("3.9")
///     .delayed_install(true)
///     .verbosity(Verbosity::Debug)
///     .project(DirSpec::new("app").entry_point("main.py", "Main"))
///     .copy_dir(DirSpec::new("docs").entry_point("index.html", "Help"))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SettingsBuilder {
    base_dir: Option<PathBuf>,
    python_version: String,
    delayed_install: bool,
    pip_required: bool,
    requirements: Option<PathBuf>,
    dependencies: Vec<String>,
    use_cache: bool,
    pip_cache: bool,
    pip_args: Vec<String>,
    pip_install_args: Vec<String>,
    verbosity: Verbosity,
    projects: Vec<DirSpec>,
    copy_dirs: Vec<DirSpec>,
    ignore_patterns: Vec<String>,
    compile: bool,
    pyc_only: bool,
    welcome_message: String,
    goodbye_message: String,
    hook: PostBuildHook,
    output_dir: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self {
            base_dir: None,
            python_version: "3".to_string(),
            delayed_install: false,
            pip_required: true,
            requirements: None,
            dependencies: Vec::new(),
            use_cache: true,
            pip_cache: true,
            pip_args: Vec::new(),
            pip_install_args: Vec::new(),
            verbosity: Verbosity::Normal,
            projects: Vec::new(),
            copy_dirs: Vec::new(),
            ignore_patterns: Vec::new(),
            compile: true,
            pyc_only: false,
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            goodbye_message: DEFAULT_GOODBYE_MESSAGE.to_string(),
            hook: PostBuildHook::default(),
            output_dir: None,
            cache_dir: None,
        }
    }
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the directory relative paths are resolved against.
    ///
    /// Default: current working directory
    pub fn base_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.base_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the target version request (`"3"`, `"3.7"`, `"3.8.10-32"`).
    ///
    /// Never rejected: unparsable requests resolve to the fallback version.
    pub fn python_version(mut self, request: impl Into<String>) -> Self {
        self.python_version = request.into();
        self
    }

    /// Defers pip, dependencies and compilation to the user machine.
    pub fn delayed_install(mut self, delayed: bool) -> Self {
        self.delayed_install = delayed;
        self
    }

    /// Sets whether pip is installed.
    pub fn pip_required(mut self, required: bool) -> Self {
        self.pip_required = required;
        self
    }

    /// Sets the requirements manifest. An empty path clears it.
    pub fn requirements<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.requirements = if path.as_os_str().is_empty() {
            None
        } else {
            Some(path.to_path_buf())
        };
        self
    }

    /// Sets the explicit dependency list.
    pub fn dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Sets whether cached downloads are reused.
    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// Sets whether pip keeps its cache in the bundler cache dir.
    pub fn pip_cache(mut self, pip_cache: bool) -> Self {
        self.pip_cache = pip_cache;
        self
    }

    /// Sets options passed to `pip`.
    pub fn pip_args(mut self, args: Vec<String>) -> Self {
        self.pip_args = args;
        self
    }

    /// Sets options passed to `pip install`.
    pub fn pip_install_args(mut self, args: Vec<String>) -> Self {
        self.pip_install_args = args;
        self
    }

    /// Sets the verbosity.
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Appends a project.
    pub fn project(mut self, project: DirSpec) -> Self {
        self.projects.push(project);
        self
    }

    /// Replaces the project list.
    pub fn projects(mut self, projects: Vec<DirSpec>) -> Self {
        self.projects = projects;
        self
    }

    /// Appends a copy dir.
    pub fn copy_dir(mut self, dir: DirSpec) -> Self {
        self.copy_dirs.push(dir);
        self
    }

    /// Replaces the copy-dir list.
    pub fn copy_dirs(mut self, dirs: Vec<DirSpec>) -> Self {
        self.copy_dirs = dirs;
        self
    }

    /// Sets glob patterns skipped while copying projects.
    ///
    /// `__pycache__` is always added by the bundler.
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Sets whether project modules are compiled.
    pub fn compile(mut self, compile: bool) -> Self {
        self.compile = compile;
        self
    }

    /// Sets whether sources are stripped after compilation.
    pub fn pyc_only(mut self, pyc_only: bool) -> Self {
        self.pyc_only = pyc_only;
        self
    }

    /// Sets the bootstrap welcome text.
    pub fn welcome_message(mut self, message: impl Into<String>) -> Self {
        self.welcome_message = message.into();
        self
    }

    /// Sets the bootstrap goodbye text.
    pub fn goodbye_message(mut self, message: impl Into<String>) -> Self {
        self.goodbye_message = message.into();
        self
    }

    /// Sets the post-build hook.
    pub fn hook(mut self, hook: PostBuildHook) -> Self {
        self.hook = hook;
        self
    }

    /// Sets an explicit build directory (replaced on every run).
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets an explicit download cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSettings`] if:
    /// - a project or copy dir has an empty path
    /// - an entry point is absolute, escapes its directory, or has an empty name
    /// - an ignore pattern is not a valid glob
    /// - the output dir is the base dir, one of its ancestors, or contains a
    ///   project or copy-dir source (the build dir is erased on every run)
    pub fn build(self) -> Result<Settings> {
        let base_dir = match self.base_dir {
            Some(dir) => dir,
            None => std::env::current_dir().fs_context("reading current directory", ".")?,
        };
        let base_dir = base_dir
            .absolutize()
            .fs_context("absolutizing base directory", &base_dir)?
            .into_owned();

        for spec in self.projects.iter().chain(self.copy_dirs.iter()) {
            validate_dir_spec(spec)?;
        }

        if let Some(output_dir) = &self.output_dir {
            validate_output_dir(output_dir, &base_dir, &self.projects, &self.copy_dirs)?;
        }

        for pattern in &self.ignore_patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                Error::InvalidSettings(format!("ignore pattern {:?}: {}", pattern, e))
            })?;
        }

        if self.pyc_only && !self.compile {
            log::warn!("pyc_only_distribution has no effect while compile is disabled");
        }

        Ok(Settings {
            base_dir,
            python_version: self.python_version,
            delayed_install: self.delayed_install,
            pip_required: self.pip_required,
            requirements: self.requirements,
            dependencies: self.dependencies,
            use_cache: self.use_cache,
            pip_cache: self.pip_cache,
            pip_args: self.pip_args,
            pip_install_args: self.pip_install_args,
            verbosity: self.verbosity,
            projects: self.projects,
            copy_dirs: self.copy_dirs,
            ignore_patterns: self.ignore_patterns,
            compile: self.compile,
            pyc_only: self.pyc_only,
            welcome_message: self.welcome_message,
            goodbye_message: self.goodbye_message,
            hook: self.hook,
            output_dir: self.output_dir,
            cache_dir: self.cache_dir,
        })
    }
}

fn validate_output_dir(
    output_dir: &Path,
    base_dir: &Path,
    projects: &[DirSpec],
    copy_dirs: &[DirSpec],
) -> Result<()> {
    let output = output_dir
        .absolutize_from(base_dir)
        .fs_context("absolutizing output directory", output_dir)?;

    if base_dir.starts_with(&output) {
        return Err(Error::InvalidSettings(format!(
            "output directory {} would erase the base directory {}",
            output.display(),
            base_dir.display()
        )));
    }

    for spec in projects.iter().chain(copy_dirs) {
        let source = spec
            .path
            .absolutize_from(base_dir)
            .fs_context("absolutizing source directory", &spec.path)?;
        if source.starts_with(&output) {
            return Err(Error::InvalidSettings(format!(
                "output directory {} would erase the source directory {}",
                output.display(),
                source.display()
            )));
        }
    }

    Ok(())
}

fn validate_dir_spec(spec: &DirSpec) -> Result<()> {
    if spec.path.as_os_str().is_empty() {
        return Err(Error::InvalidSettings(
            "project and copy-dir paths cannot be empty".into(),
        ));
    }

    for entry in &spec.entry_points {
        if entry.name.trim().is_empty() {
            return Err(Error::InvalidSettings(format!(
                "entry point {} in {} has an empty name",
                entry.file.display(),
                spec.path.display()
            )));
        }

        let escapes = entry.file.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if entry.file.as_os_str().is_empty() || escapes {
            return Err(Error::InvalidSettings(format!(
                "entry point {:?} must be a relative path inside {}",
                entry.file,
                spec.path.display()
            )));
        }
    }

    Ok(())
}
