//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that runs the staged
//! pipeline turning project trees into a self-contained distribution folder.

use super::{
    report::{Stage, StageReport},
    tool_detection::HOST_RUNS_RUNTIME,
};
use crate::bundler::{
    DirectoryPlan, EntryPointTable, Error, HostRuntime, HostServices, ResolvedVersion, Result,
    Settings, Verbosity,
    bootstrap::{self, BootstrapInputs, DeferredActions},
    error::{Context, ErrorExt},
    planner,
    runtime::{self, catalog, import_path},
    settings::BUILD_DIR_PREFIX,
    utils::fs,
};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::io::AsyncWriteExt;

/// Receives the operator-facing progress messages of a [`Bundler`].
pub type MessageSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Ignore pattern always applied to project copies.
const PYCACHE: &str = "__pycache__";

/// Main bundler orchestrator.
///
/// Runs the pipeline strictly in order:
///
/// 1. prepare directories (fatal)
/// 2. resolve and fetch the runtime archive (fatal)
/// 3. unpack the runtime and patch its import path
/// 4. fetch and install pip
/// 5. install dependencies
/// 6. copy projects
/// 7. compile projects
/// 8. copy auxiliary directories
/// 9. emit the bootstrap and launcher
/// 10. run the post-build hook
/// 11. final `pip freeze` verification
///
/// Only the fatal steps return `Err`; every other stage records its result in
/// the [`StageReport`] and the pipeline carries on.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_pyembed::bundler::{Bundler, DirSpec, SettingsBuilder};
///
/// # async fn example() -> kodegen_bundler_pyembed::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .base_dir("/work/myapp")
///     .delayed_install(true)
///     .project(DirSpec::new("app").entry_point("main.py", "My App"))
///     .build()?;
///
/// let mut bundler = Bundler::new(settings);
/// let report = bundler.run().await?;
/// if !report.all_passed() {
///     eprintln!("failed stages: {:?}", report.failed());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Bundler {
    settings: Settings,
    host: HostServices,
    host_runtime: HostRuntime,
    build_dir: PathBuf,
    bootstrap_dir: PathBuf,
    plan: DirectoryPlan,
    pip_args: Vec<String>,
    ignore_patterns: Vec<String>,
    messages: MessageSink,

    version: Option<ResolvedVersion>,
    runtime_dir: Option<PathBuf>,
    entry_points: EntryPointTable,
    deferred: DeferredActions,
    pip_present: bool,
    report: StageReport,
}

impl std::fmt::Debug for Bundler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bundler")
            .field("settings", &self.settings)
            .field("build_dir", &self.build_dir)
            .field("version", &self.version)
            .field("runtime_dir", &self.runtime_dir)
            .field("entry_points", &self.entry_points)
            .field("deferred", &self.deferred)
            .field("report", &self.report)
            .finish()
    }
}

impl Bundler {
    /// Creates a bundler using the real network, zip, process and file
    /// system collaborators and the detected host interpreter.
    pub fn new(settings: Settings) -> Self {
        let host = HostServices::system(&settings);
        Self::with_host(settings, host, HostRuntime::detect())
    }

    /// Creates a bundler with explicit collaborators and host interpreter.
    ///
    /// The build directory is `output_dir` when set, otherwise a
    /// `pyembed_build_YYYYmmdd_HHMMSS` directory under the base dir.
    pub fn with_host(settings: Settings, host: HostServices, host_runtime: HostRuntime) -> Self {
        let build_dir = match settings.output_dir() {
            Some(dir) => settings.base_dir().join(dir),
            None => settings.base_dir().join(format!(
                "{}{}",
                BUILD_DIR_PREFIX,
                chrono::Local::now().format("%Y%m%d_%H%M%S")
            )),
        };
        let bootstrap_dir = build_dir.join(bootstrap::BOOTSTRAP_DIR_NAME);
        let plan = planner::plan(
            settings.projects(),
            settings.copy_dirs(),
            settings.base_dir(),
            &build_dir,
        );

        let mut pip_args = settings.pip_args().to_vec();
        if settings.pip_cache() {
            pip_args.push(format!("--cache-dir={}", settings.cache_dir().display()));
        } else {
            pip_args.push("--no-cache-dir".to_string());
        }
        if settings.verbosity() == Verbosity::Silent {
            pip_args.push("-qqq".to_string());
        }

        let mut ignore_patterns = settings.ignore_patterns().to_vec();
        ignore_patterns.push(PYCACHE.to_string());

        Self {
            entry_points: plan.entry_points.clone(),
            settings,
            host,
            host_runtime,
            build_dir,
            bootstrap_dir,
            plan,
            pip_args,
            ignore_patterns,
            messages: Arc::new(|text: &str| eprintln!("{}", text)),
            version: None,
            runtime_dir: None,
            deferred: DeferredActions::default(),
            pip_present: false,
            report: StageReport::default(),
        }
    }

    /// Replaces the message sink. Messages go to stderr by default, keeping
    /// stdout free for machine-readable output.
    pub fn with_message_sink(mut self, sink: MessageSink) -> Self {
        self.messages = sink;
        self
    }

    /// Sends `text` to the message sink if the configured verbosity is at
    /// least `level`.
    pub fn msg(&self, level: Verbosity, text: impl AsRef<str>) {
        if level <= self.settings.verbosity() {
            (self.messages)(text.as_ref());
        }
    }

    fn header(&self, title: &str) {
        self.msg(Verbosity::Normal, format!("\n****** {} ******", title));
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build directory (the distribution folder).
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Bootstrap directory inside the build directory.
    pub fn bootstrap_dir(&self) -> &Path {
        &self.bootstrap_dir
    }

    /// Unpacked runtime directory, once the runtime stage ran.
    pub fn runtime_dir(&self) -> Option<&Path> {
        self.runtime_dir.as_deref()
    }

    /// Resolved runtime version, once the runtime stage ran.
    pub fn resolved_version(&self) -> Option<ResolvedVersion> {
        self.version
    }

    /// Planned source and target directories.
    pub fn plan(&self) -> &DirectoryPlan {
        &self.plan
    }

    /// Current entry-point table.
    pub fn entry_points(&self) -> &EntryPointTable {
        &self.entry_points
    }

    /// Work deferred to the user machine so far.
    pub fn deferred(&self) -> DeferredActions {
        self.deferred
    }

    /// Effective pip options, including the derived cache and quiet flags.
    pub fn pip_args(&self) -> &[String] {
        &self.pip_args
    }

    /// Effective project ignore patterns, including `__pycache__`.
    pub fn ignore_patterns(&self) -> &[String] {
        &self.ignore_patterns
    }

    /// Results recorded so far.
    pub fn report(&self) -> &StageReport {
        &self.report
    }

    /// Runs the whole pipeline.
    ///
    /// # Errors
    ///
    /// Only the fatal steps fail the call: preparing directories, fetching
    /// the runtime archive, and extracting it. Everything else is reported
    /// through the returned [`StageReport`].
    pub async fn run(&mut self) -> Result<StageReport> {
        self.reset();
        self.prepare_dirs().await?;

        if !self.settings.delayed_install() && !*HOST_RUNS_RUNTIME {
            log::warn!(
                "The staged runtime can't run on this host; \
                 pip, dependency and compile steps will fail. Consider delayed_install."
            );
        }

        let archive = self.fetch_runtime().await?;
        let unpacked = self.unpack_runtime(&archive).await?;
        self.report.record(Stage::UnpackRuntime, unpacked);

        let get_pip = self.fetch_package_manager().await;
        let ok = self.install_package_manager(get_pip.as_deref()).await;
        self.report.record(Stage::InstallPackageManager, ok);

        let ok = self.install_dependencies().await;
        self.report.record(Stage::InstallDependencies, ok);

        let ok = self.copy_projects().await;
        self.report.record(Stage::CopyProjects, ok);

        let ok = self.compile().await;
        self.report.record(Stage::Compile, ok);

        let ok = self.copy_auxiliary().await;
        self.report.record(Stage::CopyAuxiliary, ok);

        let ok = self.emit_bootstrap().await;
        self.report.record(Stage::EmitBootstrap, ok);

        let ok = self.run_custom_hook();
        self.report.record(Stage::CustomHook, ok);

        let ok = self.final_verification().await;
        self.report.record(Stage::FinalVerification, ok);

        if self.report.all_passed() {
            self.msg(Verbosity::Normal, "\n\nDone.");
        } else {
            self.msg(
                Verbosity::Silent,
                format!("\n\nDone - some errors occurred:\n{}", self.report),
            );
        }
        Ok(self.report)
    }

    fn reset(&mut self) {
        self.version = None;
        self.runtime_dir = None;
        self.entry_points = self.plan.entry_points.clone();
        self.deferred = DeferredActions::default();
        self.pip_present = false;
        self.report = StageReport::default();
    }

    /// Creates the cache dir, recreates the build dir, creates the bootstrap dir.
    async fn prepare_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.settings.cache_dir(), false).await?;
        fs::create_dir_all(&self.build_dir, true).await?;
        fs::create_dir_all(&self.bootstrap_dir, false).await?;
        log::debug!("build dir: {}", self.build_dir.display());
        Ok(())
    }

    /// Resolves the requested version and fetches its archive.
    async fn fetch_runtime(&mut self) -> Result<PathBuf> {
        self.header("Obtaining Python");
        let resolution =
            runtime::resolve_detailed(self.settings.python_version(), &self.host_runtime);
        let version = resolution.version;
        self.msg(
            Verbosity::Normal,
            format!("Version <{}> needed ({:?}).", version, resolution.outcome),
        );
        self.version = Some(version);

        let url = version
            .archive_url()
            .context(format!("no runtime archive known for {}", version))?;
        let archive = self
            .host
            .fetcher
            .fetch(&url, version.archive_md5())
            .await?;
        self.msg(Verbosity::Normal, "Python successfully obtained.");
        Ok(archive)
    }

    /// Extracts the runtime (fatal) and patches its import path.
    async fn unpack_runtime(&mut self, archive: &Path) -> Result<bool> {
        self.header("Installing Python");
        let version = self.version.context("runtime version not resolved")?;
        let stem = archive
            .file_stem()
            .context(format!("bad archive name {}", archive.display()))?;
        let runtime_dir = self.build_dir.join(stem);

        fs::create_dir_all(&runtime_dir, false).await?;
        self.msg(Verbosity::Normal, "Unzipping...");
        self.host.extractor.extract(archive, &runtime_dir).await?;
        self.runtime_dir = Some(runtime_dir.clone());

        self.msg(Verbosity::Normal, "Fixing path search machinery...");
        let patched =
            import_path::patch_import_path(&version, &runtime_dir, &self.plan.project_names())
                .await;
        let ok = match patched {
            Ok(()) => {
                self.msg(Verbosity::Normal, "Python successfully installed.");
                true
            }
            Err(e) => {
                self.msg(Verbosity::Normal, format!("ERROR: can't fix import paths: {}", e));
                false
            }
        };

        if self.settings.verbosity() >= Verbosity::Debug {
            self.msg(Verbosity::Debug, "->Debug - checking sys.path on target Python");
            let argv = self.python_argv(["-c", "import sys; print(sys.path)"]);
            self.run_process(argv).await;
        }
        Ok(ok)
    }

    /// Fetches `get-pip.py`. `None` if not required or the download failed.
    async fn fetch_package_manager(&self) -> Option<PathBuf> {
        self.header("Obtaining Get-pip");
        if !self.settings.pip_required() {
            self.msg(Verbosity::Normal, "Skipped: no Pip required in config file.");
            return None;
        }
        match self.host.fetcher.fetch(catalog::GET_PIP_URL, None).await {
            Ok(path) => {
                self.msg(Verbosity::Normal, "Get-pip successfully obtained.");
                Some(path)
            }
            Err(e) => {
                self.msg(Verbosity::Normal, format!("ERROR: Get-pip not obtained: {}", e));
                None
            }
        }
    }

    async fn install_package_manager(&mut self, get_pip: Option<&Path>) -> bool {
        self.header("Installing Pip");
        if !self.settings.pip_required() {
            self.msg(Verbosity::Normal, "Skipped: no Pip required in config file.");
            return true;
        }
        let Some(get_pip) = get_pip else {
            self.msg(Verbosity::Normal, "ERROR: no Get-pip present.");
            return false;
        };

        if self.settings.delayed_install() {
            let dest = self.bootstrap_dir.join(bootstrap::GET_PIP_NAME);
            if let Err(e) = fs::copy_file(get_pip, &dest).await {
                self.msg(Verbosity::Normal, format!("ERROR: can't copy Get-pip: {}", e));
                return false;
            }
            self.deferred.install_pip = true;
            self.pip_present = true;
            self.msg(Verbosity::Normal, "Pip will be installed on the user machine.");
            return true;
        }

        let mut argv = self.python_argv([get_pip.as_os_str()]);
        argv.extend(self.pip_args.iter().map(OsString::from));
        if self.run_process(argv).await {
            self.pip_present = true;
            self.msg(Verbosity::Normal, "Pip successfully installed.");
            true
        } else {
            false
        }
    }

    async fn install_dependencies(&mut self) -> bool {
        self.header("Installing dependencies");
        if !self.settings.wants_dependencies() {
            self.msg(Verbosity::Normal, "Skipped: no dependency wanted.");
            return true;
        }
        if !self.pip_present {
            self.msg(
                Verbosity::Normal,
                "ERROR: can't install dependencies, no Pip present.",
            );
            return false;
        }

        if self.settings.delayed_install() {
            return match self.write_deferred_requirements().await {
                Ok(()) => {
                    self.deferred.install_dependencies = true;
                    self.msg(
                        Verbosity::Normal,
                        "Dependencies will be installed on the user machine.",
                    );
                    true
                }
                Err(e) => {
                    self.msg(
                        Verbosity::Normal,
                        format!("ERROR: can't write requirements: {}", e),
                    );
                    false
                }
            };
        }

        let mut all_ok = true;
        if let Some(requirements) = self.settings.requirements() {
            self.msg(
                Verbosity::Normal,
                format!("Installing from {}...", requirements.display()),
            );
            let mut argv = self.python_argv(["-m", "pip"]);
            argv.extend(self.pip_args.iter().map(OsString::from));
            argv.extend(["install", "-r"].map(OsString::from));
            argv.push(requirements.into_os_string());
            argv.extend(self.settings.pip_install_args().iter().map(OsString::from));
            all_ok &= self.run_process(argv).await;
        }
        for package in self.settings.dependencies() {
            let mut argv = self.python_argv(["-m", "pip", "install", package.as_str()]);
            argv.extend(self.pip_args.iter().map(OsString::from));
            argv.extend(self.settings.pip_install_args().iter().map(OsString::from));
            all_ok &= self.run_process(argv).await;
        }

        if all_ok {
            self.msg(Verbosity::Normal, "All dependencies successfully installed.");
        } else {
            self.msg(
                Verbosity::Normal,
                "ERROR: not all dependencies successfully installed.",
            );
        }
        all_ok
    }

    /// Writes `requirements.txt` into the bootstrap dir: the configured
    /// manifest (if any) followed by one line per listed dependency.
    async fn write_deferred_requirements(&self) -> Result<()> {
        let dest = self.bootstrap_dir.join(bootstrap::REQUIREMENTS_NAME);
        let mut text = match self.settings.requirements() {
            Some(path) => tokio::fs::read_to_string(&path)
                .await
                .fs_context("reading requirements", &path)?,
            None => String::new(),
        };
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        for dependency in self.settings.dependencies() {
            text.push_str(dependency);
            text.push('\n');
        }

        let mut file = tokio::fs::File::create(&dest)
            .await
            .fs_context("creating requirements", &dest)?;
        file.write_all(text.as_bytes())
            .await
            .fs_context("writing requirements", &dest)?;
        file.flush().await.fs_context("writing requirements", &dest)?;
        Ok(())
    }

    async fn copy_projects(&self) -> bool {
        self.header("Copying project files");
        if self.plan.projects.is_empty() {
            self.msg(Verbosity::Normal, "Skipped, no projects present.");
            return true;
        }
        self.msg(
            Verbosity::Debug,
            format!("->Debug - copy ignore patterns: {:?}", self.ignore_patterns),
        );

        let mut all_ok = true;
        for dir in &self.plan.projects {
            all_ok &= self
                .copy_tree(&dir.source, &dir.target, &self.ignore_patterns)
                .await;
        }
        if !all_ok {
            self.msg(Verbosity::Normal, "ERROR: not all projects successfully copied.");
        }
        all_ok
    }

    async fn copy_auxiliary(&self) -> bool {
        self.header("Copying other dirs");
        if self.plan.copy_dirs.is_empty() {
            self.msg(Verbosity::Normal, "Skipped, no other dirs to copy.");
            return true;
        }

        let mut all_ok = true;
        for dir in &self.plan.copy_dirs {
            all_ok &= self.copy_tree(&dir.source, &dir.target, &[]).await;
        }
        if !all_ok {
            self.msg(Verbosity::Normal, "ERROR: not all dirs successfully copied.");
        }
        all_ok
    }

    async fn copy_tree(&self, src: &Path, dest: &Path, ignore: &[String]) -> bool {
        match self.host.copier.copy_tree(src, dest, ignore).await {
            Ok(()) => {
                self.msg(
                    Verbosity::Normal,
                    format!("Files copied into {}.", dest.display()),
                );
                true
            }
            Err(e) => {
                self.msg(
                    Verbosity::Normal,
                    format!("ERROR: can't copy {}: {}", src.display(), e),
                );
                false
            }
        }
    }

    async fn compile(&mut self) -> bool {
        self.header("Compiling project modules");
        if self.plan.projects.is_empty() {
            self.msg(Verbosity::Normal, "Skipped, no projects present.");
            return true;
        }
        if !self.settings.compile() {
            self.msg(Verbosity::Normal, "Skipped, no compiling required.");
            return true;
        }

        let pyc_only = self.settings.pyc_only();
        let mut all_ok = true;

        if pyc_only {
            // compileall skips .pyw files
            let mut renamed = Vec::new();
            for entry in self.entry_points.windowed_sources() {
                let old = self.build_dir.join(entry.path());
                let new = old.with_extension("py");
                match tokio::fs::rename(&old, &new).await {
                    Ok(()) => renamed.push(entry.path().to_path_buf()),
                    Err(e) => {
                        self.msg(
                            Verbosity::Normal,
                            format!("ERROR: can't rename {}: {}", old.display(), e),
                        );
                        all_ok = false;
                    }
                }
            }
            self.entry_points = self.entry_points.windowed_as_source_for(&renamed);
            self.msg(
                Verbosity::Debug,
                format!("->Debug - renamed (pyw->py) entry points: {:?}", self.entry_points),
            );
        }

        if self.settings.delayed_install() {
            self.deferred.compile = true;
            self.msg(Verbosity::Normal, "Modules will be compiled on the user machine.");
            return all_ok;
        }

        let quiet = if self.settings.verbosity() > Verbosity::Silent {
            "-q"
        } else {
            "-qq"
        };
        for dir in &self.plan.projects {
            let mut argv = self.python_argv([OsString::from("-m"), OsString::from("compileall")]);
            argv.push(dir.target.clone().into_os_string());
            if pyc_only {
                argv.push("-b".into());
            }
            argv.push(quiet.into());
            if !self.run_process(argv).await {
                self.msg(
                    Verbosity::Normal,
                    format!(
                        "ERROR: not all modules successfully compiled in {}.",
                        dir.target.display()
                    ),
                );
                all_ok = false;
            }
        }
        if !all_ok {
            self.msg(Verbosity::Normal, "ERROR: not all modules successfully compiled.");
            return false;
        }
        self.msg(Verbosity::Normal, "All modules successfully compiled.");

        if pyc_only {
            for dir in &self.plan.projects {
                if let Err(e) = fs::remove_files_with_extension(&dir.target, "py").await {
                    self.msg(
                        Verbosity::Normal,
                        format!("ERROR: can't remove sources in {}: {}", dir.target.display(), e),
                    );
                    all_ok = false;
                }
            }
            self.msg(Verbosity::Normal, "Original *.py modules removed.");
            self.entry_points = self.entry_points.compiled();
            self.msg(
                Verbosity::Debug,
                format!("->Debug - renamed (py->pyc) entry points: {:?}", self.entry_points),
            );
        }
        all_ok
    }

    async fn emit_bootstrap(&self) -> bool {
        self.header("Creating bootstrap script");
        if self.entry_points.is_empty() && !self.deferred.any() {
            self.msg(
                Verbosity::Normal,
                "Skipped, no entry point present and nothing deferred.",
            );
            return true;
        }

        let mut all_ok = true;
        for entry in &self.entry_points {
            if !self.build_dir.join(entry.path()).exists() {
                self.msg(
                    Verbosity::Debug,
                    format!("->Debug - non-existent entry point: {}", entry.path().display()),
                );
                all_ok = false;
            }
        }

        let written = match self.bootstrap_inputs() {
            Some(inputs) => match bootstrap::emit(&inputs) {
                Ok(artifacts) => artifacts.write(&self.build_dir, &self.bootstrap_dir).await,
                Err(e) => Err(e),
            },
            None => Err(Error::GenericError("no runtime directory to launch".into())),
        };
        if let Err(e) = written {
            self.msg(Verbosity::Normal, format!("ERROR: can't write bootstrap: {}", e));
            all_ok = false;
        }

        if all_ok {
            self.msg(Verbosity::Normal, "Bootstrap entry point successfully created.");
        } else {
            self.msg(Verbosity::Normal, "ERROR: not all entry points actually exist.");
        }
        all_ok
    }

    /// Inputs for the bootstrap renderer, once the runtime dir is known.
    pub fn bootstrap_inputs(&self) -> Option<BootstrapInputs> {
        let runtime_dir = self.runtime_dir.as_ref()?.file_name()?;
        Some(BootstrapInputs {
            runtime_dir: runtime_dir.to_string_lossy().into_owned(),
            bootstrap_dir: bootstrap::BOOTSTRAP_DIR_NAME.to_string(),
            project_dirs: self.plan.project_names(),
            entry_points: self.entry_points.clone(),
            pyc_only: self.settings.pyc_only(),
            deferred: self.deferred,
            welcome_message: self.settings.welcome_message().to_string(),
            goodbye_message: self.settings.goodbye_message().to_string(),
        })
    }

    fn run_custom_hook(&self) -> bool {
        self.header("Running custom action");
        let hook = self.settings.hook().clone();
        let ok = hook.call(self);
        if ok {
            self.msg(Verbosity::Normal, "Custom action successfully executed.");
        } else {
            self.msg(Verbosity::Normal, "ERROR: custom action returned false.");
        }
        ok
    }

    async fn final_verification(&self) -> bool {
        if self.settings.verbosity() == Verbosity::Silent {
            return true;
        }
        self.header("Running a final \"pip freeze\"");
        if !self.settings.pip_required() {
            self.msg(Verbosity::Normal, "Skipped: no Pip required in config file.");
            return true;
        }
        if self.settings.delayed_install() {
            self.msg(Verbosity::Normal, "Skipped: no Pip present (delayed install).");
            return true;
        }
        if !self.pip_present {
            self.msg(Verbosity::Normal, "ERROR: no Pip present.");
            return false;
        }
        let argv = self.python_argv(["-m", "pip", "freeze"]);
        self.run_process(argv).await;
        true
    }

    /// `python.exe` of the staged runtime followed by `args`.
    fn python_argv<I, S>(&self, args: I) -> Vec<OsString>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let python = self
            .runtime_dir
            .as_ref()
            .map(|dir| dir.join("python.exe"))
            .unwrap_or_else(|| PathBuf::from("python.exe"));
        std::iter::once(python.into_os_string())
            .chain(args.into_iter().map(Into::into))
            .collect()
    }

    /// Runs a process; false on non-zero exit or spawn failure.
    async fn run_process(&self, argv: Vec<OsString>) -> bool {
        match self.host.runner.run(&argv).await {
            Ok(status) if status.success() => {
                self.msg(Verbosity::Debug, format!("->Debug - ran {:?}", argv));
                true
            }
            Ok(status) => {
                self.msg(Verbosity::Normal, "ERROR: unable to run external process!");
                self.msg(Verbosity::Normal, format!("Process was called with arguments: {:?}", argv));
                self.msg(
                    Verbosity::Normal,
                    format!("Process exited with code {:?}.", status.code),
                );
                false
            }
            Err(e) => {
                self.msg(Verbosity::Normal, format!("ERROR: {}", e));
                false
            }
        }
    }
}
