//! Second-stage bootstrap rendering.
//!
//! The build directory ships with `install.bat`, a one-line launcher that
//! runs `pyembed_bootstrap/bootstrap.py` with the staged runtime. On the user
//! machine the bootstrap finishes whatever the build deferred (pip,
//! dependencies, compilation), creates shortcuts for the entry points through
//! a generated PowerShell script, and waits for ENTER.

pub mod template;

use crate::bundler::{
    EntryPointTable, Origin,
    error::{Error, ErrorExt, Result},
};
use handlebars::Handlebars;
use std::path::{Component, Path};
use template::{BOOTSTRAP_TEMPLATE, py_bool, py_list, py_str};

/// Name of the bootstrap directory inside the build directory.
pub const BOOTSTRAP_DIR_NAME: &str = "pyembed_bootstrap";

/// File name of the bootstrap program.
pub const BOOTSTRAP_SCRIPT_NAME: &str = "bootstrap.py";

/// File name of the launcher written at the build directory root.
pub const LAUNCHER_NAME: &str = "install.bat";

/// File name of the pip installer copied for delayed installs.
pub const GET_PIP_NAME: &str = "get-pip.py";

/// File name of the manifest materialized for delayed installs.
pub const REQUIREMENTS_NAME: &str = "requirements.txt";

/// Work the build left for the user machine.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Serialize)]
pub struct DeferredActions {
    pub install_pip: bool,
    pub install_dependencies: bool,
    pub compile: bool,
}

impl DeferredActions {
    /// True if anything was deferred.
    pub fn any(&self) -> bool {
        self.install_pip || self.install_dependencies || self.compile
    }
}

/// Everything the bootstrap program is rendered from.
#[derive(Clone, Debug)]
pub struct BootstrapInputs {
    /// Runtime directory name, relative to the build directory.
    pub runtime_dir: String,
    /// Bootstrap directory name, relative to the build directory.
    pub bootstrap_dir: String,
    /// Project directory names, relative to the build directory.
    pub project_dirs: Vec<String>,
    pub entry_points: EntryPointTable,
    /// Sources are stripped after compiling.
    pub pyc_only: bool,
    pub deferred: DeferredActions,
    pub welcome_message: String,
    pub goodbye_message: String,
}

/// Rendered bootstrap files.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BootstrapArtifacts {
    /// Contents of `bootstrap.py`.
    pub script: String,
    /// Contents of `install.bat`.
    pub launcher: String,
}

impl BootstrapArtifacts {
    /// Writes `bootstrap.py` into `bootstrap_dir` and `install.bat` into `build_dir`.
    pub async fn write(&self, build_dir: &Path, bootstrap_dir: &Path) -> Result<()> {
        let script = bootstrap_dir.join(BOOTSTRAP_SCRIPT_NAME);
        tokio::fs::write(&script, &self.script)
            .await
            .fs_context("writing bootstrap script", &script)?;

        let launcher = build_dir.join(LAUNCHER_NAME);
        tokio::fs::write(&launcher, &self.launcher)
            .await
            .fs_context("writing launcher", &launcher)?;
        Ok(())
    }
}

/// Renders the bootstrap program and its launcher.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_pyembed::bundler::{BootstrapInputs, DeferredActions, EntryPointTable};
/// use kodegen_bundler_pyembed::bundler::bootstrap;
///
/// # fn example() -> kodegen_bundler_pyembed::bundler::Result<()> {
/// let artifacts = bootstrap::emit(&BootstrapInputs {
///     runtime_dir: "python-3.8.10-embed-amd64".into(),
///     bootstrap_dir: bootstrap::BOOTSTRAP_DIR_NAME.into(),
///     project_dirs: vec!["app".into()],
///     entry_points: EntryPointTable::default(),
///     pyc_only: false,
///     deferred: DeferredActions::default(),
///     welcome_message: "Hello".into(),
///     goodbye_message: "Bye".into(),
/// })?;
/// assert!(artifacts.launcher.starts_with("echo off\n"));
/// # Ok(())
/// # }
/// ```
pub fn emit(inputs: &BootstrapInputs) -> Result<BootstrapArtifacts> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
        .register_template_string(BOOTSTRAP_SCRIPT_NAME, BOOTSTRAP_TEMPLATE)
        .map_err(|e| Error::GenericError(format!("failed to register bootstrap template: {}", e)))?;

    let entry_points = py_list(inputs.entry_points.iter().map(|e| {
        format!(
            "({}, {}, {}, {})",
            py_str(&python_path(e.path())),
            py_str(e.name()),
            py_str(e.flavor().tag()),
            py_bool(e.origin() == Origin::Project)
        )
    }));

    let data = serde_json::json!({
        "runtime_dir": py_str(&inputs.runtime_dir),
        "project_dirs": py_list(inputs.project_dirs.iter().map(|d| py_str(d))),
        "entry_points": entry_points,
        "pyc_only": py_bool(inputs.pyc_only),
        "install_pip": py_bool(inputs.deferred.install_pip),
        "install_dependencies": py_bool(inputs.deferred.install_dependencies),
        "compile": py_bool(inputs.deferred.compile),
        "welcome_message": py_str(&inputs.welcome_message),
        "goodbye_message": py_str(&inputs.goodbye_message),
    });

    let script = handlebars
        .render(BOOTSTRAP_SCRIPT_NAME, &data)
        .map_err(|e| Error::GenericError(format!("failed to render bootstrap template: {}", e)))?;

    Ok(BootstrapArtifacts {
        script,
        launcher: launcher(&inputs.runtime_dir, &inputs.bootstrap_dir),
    })
}

/// Renders `install.bat`. No trailing newline.
pub fn launcher(runtime_dir: &str, bootstrap_dir: &str) -> String {
    format!(
        "echo off\n\"./{}/python.exe\" \"./{}/{}\"",
        runtime_dir, bootstrap_dir, BOOTSTRAP_SCRIPT_NAME
    )
}

/// Joins path segments with `/`, which `pathlib` accepts on every platform.
fn python_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
