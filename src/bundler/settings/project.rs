//! Project and copy-directory declarations.

use std::path::{Path, PathBuf};

/// An entry point declared inside a [`DirSpec`].
///
/// `file` is relative to the declaring directory; `name` becomes the shortcut
/// name on the end-user machine.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize)]
pub struct EntryPointDecl {
    /// File path, relative to the declaring directory.
    pub file: PathBuf,
    /// Shortcut name shown to the user.
    pub name: String,
}

impl EntryPointDecl {
    /// Creates a new entry-point declaration.
    pub fn new(file: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            name: name.into(),
        }
    }
}

/// A directory to ship, with its declared entry points.
///
/// Used for both projects (compiled, added to the runtime import path) and
/// copy dirs (shipped as-is). Only downstream treatment differs.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_pyembed::bundler::DirSpec;
///
/// let project = DirSpec::new("examples/project1")
///     .entry_point("main.py", "Main")
///     .entry_point("readme.txt", "Readme");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize)]
pub struct DirSpec {
    /// Source directory, relative to the base dir or absolute.
    pub path: PathBuf,
    /// Declared entry points, in order.
    #[serde(default)]
    pub entry_points: Vec<EntryPointDecl>,
}

impl DirSpec {
    /// Creates a directory spec with no entry points.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            entry_points: Vec::new(),
        }
    }

    /// Adds an entry point. Returns self for method chaining.
    pub fn entry_point(mut self, file: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        self.entry_points.push(EntryPointDecl::new(file, name));
        self
    }
}
