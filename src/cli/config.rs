//! `pyembed.toml` loading and template generation.

use crate::{
    bundler::{DirSpec, PostBuildHook, SettingsBuilder, Verbosity},
    error::{BundlerError, CliError, Result},
};
use serde::Deserialize;
use tokio::runtime::RuntimeFlavor;
use std::path::{Path, PathBuf};

/// Template written by `init`. Every key is optional; the values shown are
/// the defaults.
pub const CONFIG_TEMPLATE: &str = r#"# Configuration for kodegen_bundler_pyembed.
# Generate a fresh copy with `kodegen_bundler_pyembed init`.
# Relative paths are resolved against the directory of this file.

# =============================================================================
# GENERAL SETTINGS
# =============================================================================

# How much to print: 2 (debug), 1 (normal) or 0 (silent).
verbose = 1

# Reuse previously downloaded runtime archives and pip packages.
# Set to false to download everything again.
use_cache = true

# The target Python version, e.g. "3", "3.8", "3.8.10" or "3.8.10-32" (32 bit).
# "3" picks the latest known Python 3. An invalid string falls back to the
# Python on this machine, or to the latest 3.5 if that is older or missing.
python_version = "3"

# Set to true to install pip and dependencies and to compile modules on the
# user machine, at install time. Required when building on Linux or macOS, or
# when the target architecture can't run here.
delayed_install = false

# =============================================================================
# DEPENDENCIES SETTINGS
# =============================================================================

# Set to false to skip pip entirely (no third-party packages needed).
pip_required = true

# A pip requirements file. Leave empty for none.
requirements = ""

# Packages to pip-install, in pip format: "arrow", "arrow>=1", "arrow==1.2".
# The requirements file, if any, is processed first.
dependencies = []

# Keep pip's cache in the bundler cache dir. If false, pip gets --no-cache-dir.
pip_cache = true

# Options passed to pip itself. -qqq is added when verbose = 0.
pip_args = []

# Options passed to `pip install`.
pip_install_args = []

# =============================================================================
# FILE COPY SETTINGS
# =============================================================================

# Patterns (glob, matched against file and directory names) skipped when
# copying projects. __pycache__ is always skipped.
# e.g. project_files_ignore_patterns = [".git", ".vscode", "tests"]
project_files_ignore_patterns = []

# Compile *.py files to *.pyc.
compile = true

# Also remove the original *.py files ("pyc-only distribution").
# Only matters when compile = true.
pyc_only_distribution = false

# Projects: copied, compiled and put on the runtime import path.
# Entry point files are relative to the project directory; each one becomes a
# shortcut on the user machine.
#
# [[projects]]
# path = "path/to/project1"
# entry_points = [
#     { file = "main.py", name = "Main" },
#     { file = "readme.txt", name = "Readme" },
# ]

# Other directories (documentation, assets...): copied as-is.
#
# [[copy_dirs]]
# path = "path/to/docs"
# entry_points = [{ file = "index.html", name = "Online help" }]

# =============================================================================
# BOOTSTRAP SETTINGS
# =============================================================================

# Printed to the user when the installation starts.
welcome_message = "\nInstalling project... Please wait...\n\n"

# Printed at the end; the console then waits for ENTER.
goodbye_message = "Done.\nPress ENTER to exit."

# A command run in the build directory once everything else is done.
# Its exit status is the result of the custom action stage. The build and
# runtime directories are passed as PYEMBED_BUILD_DIR and PYEMBED_RUNTIME_DIR.
# e.g. post_build_command = ["python", "finish.py"]
post_build_command = []
"#;

/// Contents of `pyembed.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub verbose: Option<u8>,
    pub use_cache: Option<bool>,
    pub python_version: Option<String>,
    pub delayed_install: Option<bool>,
    pub pip_required: Option<bool>,
    pub requirements: Option<PathBuf>,
    pub dependencies: Vec<String>,
    pub pip_cache: Option<bool>,
    pub pip_args: Vec<String>,
    pub pip_install_args: Vec<String>,
    pub project_files_ignore_patterns: Vec<String>,
    pub compile: Option<bool>,
    pub pyc_only_distribution: Option<bool>,
    pub projects: Vec<DirSpec>,
    pub copy_dirs: Vec<DirSpec>,
    pub welcome_message: Option<String>,
    pub goodbye_message: Option<String>,
    pub post_build_command: Vec<String>,
    pub output_dir: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
}

impl ConfigFile {
    /// Parses a configuration file.
    ///
    /// # Errors
    ///
    /// [`CliError::ConfigNotFound`] if the file is missing,
    /// [`BundlerError::Toml`] if it doesn't parse.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::ConfigNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let text = tokio::fs::read_to_string(path).await?;
        Self::parse(&text, path)
    }

    /// Parses configuration text; `path` is used in error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| BundlerError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Converts into a settings builder rooted at `base_dir`.
    pub fn into_builder(self, base_dir: &Path) -> SettingsBuilder {
        let mut builder = SettingsBuilder::new()
            .base_dir(base_dir)
            .dependencies(self.dependencies)
            .pip_args(self.pip_args)
            .pip_install_args(self.pip_install_args)
            .ignore_patterns(self.project_files_ignore_patterns)
            .projects(self.projects)
            .copy_dirs(self.copy_dirs);

        if let Some(level) = self.verbose {
            builder = builder.verbosity(Verbosity::from_level(level));
        }
        if let Some(v) = self.use_cache {
            builder = builder.use_cache(v);
        }
        if let Some(v) = self.python_version {
            builder = builder.python_version(v);
        }
        if let Some(v) = self.delayed_install {
            builder = builder.delayed_install(v);
        }
        if let Some(v) = self.pip_required {
            builder = builder.pip_required(v);
        }
        if let Some(v) = self.requirements {
            builder = builder.requirements(v);
        }
        if let Some(v) = self.pip_cache {
            builder = builder.pip_cache(v);
        }
        if let Some(v) = self.compile {
            builder = builder.compile(v);
        }
        if let Some(v) = self.pyc_only_distribution {
            builder = builder.pyc_only(v);
        }
        if let Some(v) = self.welcome_message {
            builder = builder.welcome_message(v);
        }
        if let Some(v) = self.goodbye_message {
            builder = builder.goodbye_message(v);
        }
        if let Some(v) = self.output_dir {
            builder = builder.output_dir(v);
        }
        if let Some(v) = self.cache_dir {
            builder = builder.cache_dir(v);
        }
        if !self.post_build_command.is_empty() {
            builder = builder.hook(command_hook(self.post_build_command));
        }
        builder
    }
}

/// A hook running `argv` in the build directory; succeeds on exit code 0.
///
/// The command is waited for synchronously. On a multi-threaded tokio
/// runtime the wait is moved off the worker with `block_in_place`.
pub fn command_hook(argv: Vec<String>) -> PostBuildHook {
    PostBuildHook::new(move |bundler| {
        let Some((program, args)) = argv.split_first() else {
            return true;
        };
        let mut command = std::process::Command::new(program);
        command
            .args(args)
            .current_dir(bundler.build_dir())
            .env("PYEMBED_BUILD_DIR", bundler.build_dir());
        if let Some(runtime_dir) = bundler.runtime_dir() {
            command.env("PYEMBED_RUNTIME_DIR", runtime_dir);
        }
        match wait_blocking(|| command.status()) {
            Ok(status) => status.success(),
            Err(e) => {
                bundler.msg(
                    Verbosity::Normal,
                    format!("ERROR: can't run {}: {}", program, e),
                );
                false
            }
        }
    })
}

fn wait_blocking<T>(f: impl FnOnce() -> T) -> T {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

/// Writes [`CONFIG_TEMPLATE`] to `path`, refusing to overwrite.
pub async fn write_template(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(CliError::AlreadyExists {
            path: path.to_path_buf(),
        }
        .into());
    }
    tokio::fs::write(path, CONFIG_TEMPLATE).await?;
    Ok(())
}
