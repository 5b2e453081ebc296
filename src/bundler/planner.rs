//! Source/target directory planning and the entry-point table.
//!
//! The planner is pure: it maps declared projects and copy dirs to their
//! places in the build directory and builds the initial [`EntryPointTable`].
//! Nothing touches the file system.

use crate::bundler::DirSpec;
use path_absolutize::Absolutize;
use std::{
    borrow::Cow,
    ffi::OsStr,
    path::{Path, PathBuf},
};

/// How an entry point is launched on the user machine.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// `.py`: run with `python.exe`.
    Script,
    /// `.pyw`: run with `pythonw.exe` (no console).
    WindowedScript,
    /// Anything else: opened directly.
    Asset,
}

impl Flavor {
    /// Flavor of a file, strictly by suffix.
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(OsStr::to_str) {
            Some("py") => Flavor::Script,
            Some("pyw") => Flavor::WindowedScript,
            _ => Flavor::Asset,
        }
    }

    /// Tag used in the bootstrap script (`py`, `pyw`, or empty for assets).
    pub fn tag(self) -> &'static str {
        match self {
            Flavor::Script => "py",
            Flavor::WindowedScript => "pyw",
            Flavor::Asset => "",
        }
    }
}

/// Where an entry point was declared.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    Project,
    CopyDir,
}

/// A declared launch target.
///
/// Immutable: path rewrites produce a new value through the
/// [`EntryPointTable`] transitions. The flavor never changes, so a windowed
/// script keeps launching through `pythonw.exe` even after its file became
/// `.py` or `.pyc`.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct EntryPoint {
    path: PathBuf,
    name: String,
    flavor: Flavor,
    origin: Origin,
}

impl EntryPoint {
    /// Creates an entry point; the flavor follows the path suffix.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, origin: Origin) -> Self {
        let path = path.into();
        Self {
            flavor: Flavor::of(&path),
            path,
            name: name.into(),
            origin,
        }
    }

    /// Path relative to the build directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Shortcut name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    fn with_extension(&self, extension: &str) -> Self {
        Self {
            path: self.path.with_extension(extension),
            ..self.clone()
        }
    }
}

/// Ordered entry points of a build.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct EntryPointTable(Vec<EntryPoint>);

impl EntryPointTable {
    pub fn new(entries: Vec<EntryPoint>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntryPoint> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Project entries whose file is still a windowed script.
    pub fn windowed_sources(&self) -> impl Iterator<Item = &EntryPoint> {
        self.0
            .iter()
            .filter(|e| e.origin == Origin::Project && is_windowed_source(e))
    }

    /// Returns a table where windowed project scripts point at `.py` files.
    ///
    /// The compiler skips `.pyw` files, so they are renamed before compiling.
    pub fn windowed_as_source(&self) -> Self {
        self.map_project_scripts(|e| is_windowed_source(e).then(|| e.with_extension("py")))
    }

    /// Like [`windowed_as_source`](Self::windowed_as_source), limited to the
    /// entries whose path is in `paths`.
    pub fn windowed_as_source_for(&self, paths: &[PathBuf]) -> Self {
        self.map_project_scripts(|e| {
            (is_windowed_source(e) && paths.contains(&e.path)).then(|| e.with_extension("py"))
        })
    }

    /// Returns a table where project scripts point at their `.pyc` files.
    pub fn compiled(&self) -> Self {
        self.map_project_scripts(|e| {
            if e.path.extension() == Some(OsStr::new("pyc")) {
                None
            } else {
                Some(e.with_extension("pyc"))
            }
        })
    }

    fn map_project_scripts<F>(&self, f: F) -> Self
    where
        F: Fn(&EntryPoint) -> Option<EntryPoint>,
    {
        Self(
            self.0
                .iter()
                .map(|e| {
                    if e.origin == Origin::Project && e.flavor != Flavor::Asset {
                        f(e).unwrap_or_else(|| e.clone())
                    } else {
                        e.clone()
                    }
                })
                .collect(),
        )
    }
}

fn is_windowed_source(entry: &EntryPoint) -> bool {
    entry.flavor == Flavor::WindowedScript && entry.path.extension() == Some(OsStr::new("pyw"))
}

impl<'a> IntoIterator for &'a EntryPointTable {
    type Item = &'a EntryPoint;
    type IntoIter = std::slice::Iter<'a, EntryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One directory to copy into the build.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlannedDir {
    /// Absolute source directory.
    pub source: PathBuf,
    /// Absolute target directory inside the build.
    pub target: PathBuf,
    /// Target directory name, relative to the build directory.
    pub name: String,
}

/// Output of [`plan`].
#[derive(Clone, Debug, Default)]
pub struct DirectoryPlan {
    pub projects: Vec<PlannedDir>,
    pub copy_dirs: Vec<PlannedDir>,
    pub entry_points: EntryPointTable,
}

impl DirectoryPlan {
    /// Target names of the projects, in declaration order.
    pub fn project_names(&self) -> Vec<String> {
        self.projects.iter().map(|p| p.name.clone()).collect()
    }
}

/// Maps declarations to build locations and collects the entry points.
///
/// The target name of a directory is the last segment of its normalized
/// source path. Two sources with the same last segment collide; detecting
/// that is left to the caller.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_pyembed::bundler::{DirSpec, planner};
/// use std::path::Path;
///
/// let projects = vec![DirSpec::new("src/app").entry_point("main.pyw", "App")];
/// let plan = planner::plan(&projects, &[], Path::new("/work"), Path::new("/work/build"));
/// assert_eq!(plan.projects[0].name, "app");
/// assert_eq!(plan.entry_points.iter().next().unwrap().path(), Path::new("app/main.pyw"));
/// ```
pub fn plan(
    projects: &[DirSpec],
    copy_dirs: &[DirSpec],
    base_dir: &Path,
    output_dir: &Path,
) -> DirectoryPlan {
    let mut entries = Vec::new();
    let projects = projects
        .iter()
        .map(|spec| plan_dir(spec, Origin::Project, base_dir, output_dir, &mut entries))
        .collect();
    let copy_dirs = copy_dirs
        .iter()
        .map(|spec| plan_dir(spec, Origin::CopyDir, base_dir, output_dir, &mut entries))
        .collect();

    let plan = DirectoryPlan {
        projects,
        copy_dirs,
        entry_points: EntryPointTable::new(entries),
    };
    log::debug!("entry points: {:?}", plan.entry_points);
    plan
}

fn plan_dir(
    spec: &DirSpec,
    origin: Origin,
    base_dir: &Path,
    output_dir: &Path,
    entries: &mut Vec<EntryPoint>,
) -> PlannedDir {
    let source = normalize(base_dir, &spec.path);
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string());

    entries.extend(
        spec.entry_points
            .iter()
            .map(|decl| EntryPoint::new(Path::new(&name).join(&decl.file), decl.name.clone(), origin)),
    );

    PlannedDir {
        target: output_dir.join(&name),
        source,
        name,
    }
}

/// Joins onto `base_dir` and removes `.`/`..` segments lexically.
fn normalize(base_dir: &Path, path: &Path) -> PathBuf {
    match path.absolutize_from(base_dir) {
        Ok(Cow::Borrowed(p)) => p.to_path_buf(),
        Ok(Cow::Owned(p)) => p,
        Err(_) => base_dir.join(path),
    }
}
