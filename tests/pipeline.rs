//! End-to-end pipeline runs against in-memory collaborators.

use kodegen_bundler_pyembed::bundler::bootstrap;
use kodegen_bundler_pyembed::bundler::host::fakes::{
    FakeExtractor, FakeFetcher, FakeHost, FakeProcessRunner,
};
use kodegen_bundler_pyembed::bundler::planner::Flavor;
use kodegen_bundler_pyembed::bundler::runtime::catalog::GET_PIP_URL;
use kodegen_bundler_pyembed::bundler::{
    Arch, Bundler, DirSpec, Error, HostRuntime, MessageSink, PostBuildHook, ResolvedVersion,
    SettingsBuilder, Stage, StageReport, Verbosity,
};
use kodegen_bundler_pyembed::cli;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const RUNTIME_DIR: &str = "python-3.8.10-embed-amd64";

fn runtime_url(major: u32, minor: u32, micro: u32) -> String {
    ResolvedVersion::new(major, minor, micro, Arch::X86_64)
        .archive_url()
        .unwrap()
}

fn fetcher(tmp: &TempDir) -> FakeFetcher {
    FakeFetcher::new(tmp.path().join("downloads"))
        .serve(runtime_url(3, 8, 10), b"zip".to_vec())
        .serve(GET_PIP_URL, b"# get-pip".to_vec())
}

fn fake_host(tmp: &TempDir) -> FakeHost {
    FakeHost::new(fetcher(tmp), FakeExtractor::new(), FakeProcessRunner::new())
}

fn settings(tmp: &TempDir) -> SettingsBuilder {
    SettingsBuilder::new()
        .base_dir(tmp.path())
        .python_version("3.8.10")
        .output_dir("build")
        .cache_dir("cache")
}

fn write(path: &Path, text: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

fn bundler(builder: SettingsBuilder, host: &FakeHost) -> Bundler {
    Bundler::with_host(
        builder.build().unwrap(),
        host.services(),
        HostRuntime::new(3, 8, 10, Arch::X86_64),
    )
}

async fn run(builder: SettingsBuilder, host: &FakeHost) -> (Bundler, StageReport) {
    let mut b = bundler(builder, host);
    let report = b.run().await.unwrap();
    (b, report)
}

fn build_dir(tmp: &TempDir) -> PathBuf {
    tmp.path().join("build")
}

fn read_bootstrap(tmp: &TempDir) -> String {
    fs::read_to_string(
        build_dir(tmp)
            .join(bootstrap::BOOTSTRAP_DIR_NAME)
            .join(bootstrap::BOOTSTRAP_SCRIPT_NAME),
    )
    .unwrap()
}

#[tokio::test]
async fn test_empty_build_passes_every_stage() {
    let tmp = TempDir::new().unwrap();
    let host = fake_host(&tmp);

    let (bundler, report) = run(settings(&tmp), &host).await;

    assert!(report.all_passed(), "{}", report);
    assert_eq!(host.fetcher.fetched(), vec![runtime_url(3, 8, 10), GET_PIP_URL.to_string()]);
    assert_eq!(
        bundler.runtime_dir(),
        Some(build_dir(&tmp).join(RUNTIME_DIR).as_path())
    );
    assert!(tmp.path().join("cache").is_dir());
    assert!(build_dir(&tmp).join(bootstrap::BOOTSTRAP_DIR_NAME).is_dir());

    let pth = fs::read_to_string(build_dir(&tmp).join(RUNTIME_DIR).join("python._pth")).unwrap();
    assert_eq!(pth, "Lib/site-packages\n");

    // get-pip, then the final freeze
    let calls = host.runner.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0][1].ends_with("get-pip.py"));
    assert_eq!(calls[1][1..], ["-m", "pip", "freeze"]);

    // nothing to launch and nothing deferred
    assert!(!build_dir(&tmp).join(bootstrap::LAUNCHER_NAME).exists());
}

#[tokio::test]
async fn test_immediate_build_with_project() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("app/main.py"), "print('hi')\n");
    write(&tmp.path().join("app/pkg/util.py"), "X = 1\n");
    let host = fake_host(&tmp);

    let builder = settings(&tmp)
        .project(DirSpec::new("app").entry_point("main.py", "Main"))
        .dependencies(vec!["arrow".into()]);
    let (_, report) = run(builder, &host).await;

    assert!(report.all_passed(), "{}", report);
    let build = build_dir(&tmp);
    assert!(build.join("app/main.py").exists());
    assert!(build.join("app/pkg/util.py").exists());

    let pth = fs::read_to_string(build.join(RUNTIME_DIR).join("python._pth")).unwrap();
    assert!(pth.ends_with("Lib/site-packages\n../app\n"));

    let installs = host.runner.calls_with("install");
    assert_eq!(installs.len(), 1);
    assert_eq!(installs[0][1..5], ["-m", "pip", "install", "arrow"]);

    let compiles = host.runner.calls_with("compileall");
    assert_eq!(compiles.len(), 1);
    assert_eq!(PathBuf::from(&compiles[0][3]), build.join("app"));
    assert!(!compiles[0].contains(&"-b".to_string()));

    let launcher = fs::read_to_string(build.join(bootstrap::LAUNCHER_NAME)).unwrap();
    assert_eq!(launcher, bootstrap::launcher(RUNTIME_DIR, bootstrap::BOOTSTRAP_DIR_NAME));
    let script = read_bootstrap(&tmp);
    assert!(script.contains("('app/main.py', 'Main', 'py', True)"));
    assert!(script.contains("INSTALL_PIP = False"));
    assert!(script.contains("COMPILE = False"));
}

#[tokio::test]
async fn test_delayed_build_runs_no_target_processes() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("app/main.py"), "print('hi')\n");
    write(&tmp.path().join("reqs.txt"), "requests==2.25.1");
    let host = fake_host(&tmp);

    let builder = settings(&tmp)
        .delayed_install(true)
        .requirements("reqs.txt")
        .dependencies(vec!["arrow".into(), "attrs>=20".into()])
        .project(DirSpec::new("app").entry_point("main.py", "Main"));
    let (bundler, report) = run(builder, &host).await;

    assert!(report.all_passed(), "{}", report);
    assert!(host.runner.calls().is_empty());

    let deferred = bundler.deferred();
    assert!(deferred.install_pip);
    assert!(deferred.install_dependencies);
    assert!(deferred.compile);

    let bootstrap_dir = build_dir(&tmp).join(bootstrap::BOOTSTRAP_DIR_NAME);
    assert!(bootstrap_dir.join(bootstrap::GET_PIP_NAME).exists());
    let requirements = fs::read_to_string(bootstrap_dir.join(bootstrap::REQUIREMENTS_NAME)).unwrap();
    assert_eq!(requirements, "requests==2.25.1\narrow\nattrs>=20\n");

    let script = read_bootstrap(&tmp);
    assert!(script.contains("INSTALL_PIP = True"));
    assert!(script.contains("INSTALL_DEPENDENCIES = True"));
    assert!(script.contains("COMPILE = True"));
    assert!(build_dir(&tmp).join("app/main.py").exists());
}

#[tokio::test]
async fn test_delayed_pip_only_still_emits_bootstrap() {
    let tmp = TempDir::new().unwrap();
    let host = fake_host(&tmp);

    let (bundler, report) = run(settings(&tmp).delayed_install(true), &host).await;

    assert!(report.all_passed(), "{}", report);
    assert!(bundler.deferred().install_pip);
    assert!(!bundler.deferred().compile);
    assert!(build_dir(&tmp).join(bootstrap::LAUNCHER_NAME).exists());
}

#[tokio::test]
async fn test_pyc_only_turns_windowed_entry_into_bytecode_once() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("app/main.pyw"), "import tkinter\n");
    write(&tmp.path().join("app/lib.py"), "X = 1\n");
    write(&tmp.path().join("app/README.txt"), "read me\n");
    let host = fake_host(&tmp);

    let builder = settings(&tmp)
        .pyc_only(true)
        .project(
            DirSpec::new("app")
                .entry_point("main.pyw", "App")
                .entry_point("README.txt", "Readme"),
        );
    let (bundler, report) = run(builder, &host).await;

    assert!(report.all_passed(), "{}", report);
    let app = build_dir(&tmp).join("app");
    assert!(app.join("main.pyc").exists());
    assert!(app.join("lib.pyc").exists());
    assert!(!app.join("main.pyw").exists());
    assert!(!app.join("main.py").exists());
    assert!(!app.join("lib.py").exists());
    assert!(app.join("README.txt").exists());

    let entries: Vec<_> = bundler.entry_points().iter().collect();
    assert_eq!(entries[0].path(), Path::new("app/main.pyc"));
    assert_eq!(entries[0].flavor(), Flavor::WindowedScript);
    assert_eq!(entries[1].path(), Path::new("app/README.txt"));

    let compiles = host.runner.calls_with("compileall");
    assert_eq!(compiles.len(), 1);
    assert!(compiles[0].contains(&"-b".to_string()));

    let script = read_bootstrap(&tmp);
    assert!(script.contains("('app/main.pyc', 'App', 'pyw', True)"));
    assert!(script.contains("PYC_ONLY = True"));
}

#[tokio::test]
async fn test_pyc_only_delayed_renames_but_keeps_sources() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("app/main.pyw"), "import tkinter\n");
    let host = fake_host(&tmp);

    let builder = settings(&tmp)
        .delayed_install(true)
        .pyc_only(true)
        .project(DirSpec::new("app").entry_point("main.pyw", "App"));
    let (bundler, report) = run(builder, &host).await;

    assert!(report.all_passed(), "{}", report);
    let app = build_dir(&tmp).join("app");
    assert!(app.join("main.py").exists());
    assert!(!app.join("main.pyw").exists());
    assert_eq!(
        bundler.entry_points().iter().next().map(|e| e.path().to_path_buf()),
        Some(PathBuf::from("app/main.py"))
    );
    assert!(read_bootstrap(&tmp).contains("('app/main.py', 'App', 'pyw', True)"));
}

#[tokio::test]
async fn test_pyc_only_ignored_without_compile() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("app/main.pyw"), "import tkinter\n");
    let host = fake_host(&tmp);

    let builder = settings(&tmp)
        .compile(false)
        .pyc_only(true)
        .project(DirSpec::new("app").entry_point("main.pyw", "App"));
    let (_, report) = run(builder, &host).await;

    assert!(report.all_passed(), "{}", report);
    assert!(build_dir(&tmp).join("app/main.pyw").exists());
    assert!(host.runner.calls_with("compileall").is_empty());
    assert!(read_bootstrap(&tmp).contains("PYC_ONLY = False"));
}

#[tokio::test]
async fn test_missing_entry_point_fails_only_bootstrap() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("app/main.py"), "print('hi')\n");
    let host = fake_host(&tmp);

    let builder = settings(&tmp).project(
        DirSpec::new("app")
            .entry_point("main.py", "Main")
            .entry_point("missing.py", "Missing"),
    );
    let (_, report) = run(builder, &host).await;

    assert_eq!(report.failed(), vec![Stage::EmitBootstrap]);
    // still written, so the existing shortcuts can be created
    assert!(build_dir(&tmp).join(bootstrap::LAUNCHER_NAME).exists());
}

#[tokio::test]
async fn test_unavailable_get_pip_fails_pip_and_verification() {
    let tmp = TempDir::new().unwrap();
    let fetcher = FakeFetcher::new(tmp.path().join("downloads"))
        .serve(runtime_url(3, 8, 10), b"zip".to_vec());
    let host = FakeHost::new(fetcher, FakeExtractor::new(), FakeProcessRunner::new());

    let (_, report) = run(settings(&tmp), &host).await;

    assert_eq!(
        report.failed(),
        vec![Stage::InstallPackageManager, Stage::FinalVerification]
    );
}

#[tokio::test]
async fn test_missing_pip_fails_dependencies() {
    let tmp = TempDir::new().unwrap();
    let fetcher = FakeFetcher::new(tmp.path().join("downloads"))
        .serve(runtime_url(3, 8, 10), b"zip".to_vec());
    let host = FakeHost::new(fetcher, FakeExtractor::new(), FakeProcessRunner::new());

    let builder = settings(&tmp).dependencies(vec!["arrow".into()]);
    let (_, report) = run(builder, &host).await;

    assert_eq!(
        report.failed(),
        vec![
            Stage::InstallPackageManager,
            Stage::InstallDependencies,
            Stage::FinalVerification
        ]
    );
    assert!(host.runner.calls_with("install").is_empty());
}

#[tokio::test]
async fn test_silent_build_skips_verification() {
    let tmp = TempDir::new().unwrap();
    let fetcher = FakeFetcher::new(tmp.path().join("downloads"))
        .serve(runtime_url(3, 8, 10), b"zip".to_vec());
    let host = FakeHost::new(fetcher, FakeExtractor::new(), FakeProcessRunner::new());

    let builder = settings(&tmp).verbosity(Verbosity::Silent);
    let (_, report) = run(builder, &host).await;

    assert_eq!(report.failed(), vec![Stage::InstallPackageManager]);
}

#[tokio::test]
async fn test_failing_dependency_fails_only_dependencies() {
    let tmp = TempDir::new().unwrap();
    let host = FakeHost::new(
        fetcher(&tmp),
        FakeExtractor::new(),
        FakeProcessRunner::new().fail_when("bogus-package"),
    );

    let builder = settings(&tmp).dependencies(vec![
        "bogus-package".into(),
        "arrow".into(),
    ]);
    let (_, report) = run(builder, &host).await;

    assert_eq!(report.failed(), vec![Stage::InstallDependencies]);
    // the remaining dependencies are still attempted
    assert_eq!(host.runner.calls_with("install").len(), 2);
}

#[tokio::test]
async fn test_requirements_installed_before_dependencies() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("reqs.txt"), "requests\n");
    let host = fake_host(&tmp);

    let builder = settings(&tmp)
        .requirements("reqs.txt")
        .dependencies(vec!["arrow".into()])
        .pip_install_args(vec!["--upgrade".into()]);
    let (bundler, report) = run(builder, &host).await;

    assert!(report.all_passed(), "{}", report);
    let installs = host.runner.calls_with("install");
    assert_eq!(installs.len(), 2);

    let manifest = &installs[0];
    let pip_args = bundler.pip_args().len();
    assert_eq!(manifest[1..3], ["-m", "pip"]);
    assert_eq!(manifest[3 + pip_args..5 + pip_args], ["install", "-r"]);
    assert_eq!(PathBuf::from(&manifest[5 + pip_args]), tmp.path().join("reqs.txt"));
    assert_eq!(manifest.last().map(String::as_str), Some("--upgrade"));

    assert!(installs[1].contains(&"arrow".to_string()));
    assert_eq!(installs[1].last().map(String::as_str), Some("--upgrade"));
}

#[tokio::test]
async fn test_missing_project_fails_copy() {
    let tmp = TempDir::new().unwrap();
    let host = fake_host(&tmp);

    let builder = settings(&tmp)
        .compile(false)
        .project(DirSpec::new("does-not-exist"));
    let (_, report) = run(builder, &host).await;

    assert_eq!(report.failed(), vec![Stage::CopyProjects]);
}

#[tokio::test]
async fn test_compile_failure_is_reported() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("app/main.py"), "print('hi')\n");
    let host = FakeHost::new(
        fetcher(&tmp),
        FakeExtractor::new(),
        FakeProcessRunner::new().fail_when("compileall"),
    );

    let builder = settings(&tmp)
        .pyc_only(true)
        .project(DirSpec::new("app").entry_point("main.py", "Main"));
    let (bundler, report) = run(builder, &host).await;

    assert_eq!(report.failed(), vec![Stage::Compile]);
    // sources are kept when compilation failed
    assert!(build_dir(&tmp).join("app/main.py").exists());
    assert_eq!(
        bundler.entry_points().iter().next().map(|e| e.path().to_path_buf()),
        Some(PathBuf::from("app/main.py"))
    );
}

#[tokio::test]
async fn test_missing_copy_dir_fails_auxiliary_copy() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("docs/index.html"), "<html></html>");
    let host = fake_host(&tmp);

    let builder = settings(&tmp)
        .copy_dir(DirSpec::new("docs").entry_point("index.html", "Help"))
        .copy_dir(DirSpec::new("bogus"));
    let (_, report) = run(builder, &host).await;

    assert_eq!(report.failed(), vec![Stage::CopyAuxiliary]);
    assert!(build_dir(&tmp).join("docs/index.html").exists());
    assert!(read_bootstrap(&tmp).contains("('docs/index.html', 'Help', '', False)"));
}

#[tokio::test]
async fn test_ignore_patterns_apply_to_projects_only() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("app/main.py"), "print('hi')\n");
    write(&tmp.path().join("app/.git/HEAD"), "ref");
    write(&tmp.path().join("app/__pycache__/main.cpython-38.pyc"), "");
    write(&tmp.path().join("app/tests/test_main.py"), "");
    write(&tmp.path().join("docs/.git/HEAD"), "ref");
    let host = fake_host(&tmp);

    let builder = settings(&tmp)
        .compile(false)
        .ignore_patterns(vec![".git".into(), "test*".into()])
        .project(DirSpec::new("app"))
        .copy_dir(DirSpec::new("docs"));
    let (bundler, report) = run(builder, &host).await;

    assert!(report.all_passed(), "{}", report);
    assert_eq!(bundler.ignore_patterns(), [".git", "test*", "__pycache__"]);

    let build = build_dir(&tmp);
    assert!(build.join("app/main.py").exists());
    assert!(!build.join("app/.git").exists());
    assert!(!build.join("app/__pycache__").exists());
    assert!(!build.join("app/tests").exists());
    assert!(build.join("docs/.git/HEAD").exists());

    let copies = host.copier.calls();
    assert_eq!(copies.len(), 2);
    assert_eq!(copies[0].2, bundler.ignore_patterns());
    assert!(copies[1].2.is_empty());
}

#[tokio::test]
async fn test_runtime_without_pth_uses_sitecustomize() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("app/main.py"), "print('hi')\n");
    let fetcher = FakeFetcher::new(tmp.path().join("downloads"))
        .serve(runtime_url(3, 5, 4), b"zip".to_vec())
        .serve(GET_PIP_URL, b"# get-pip".to_vec());
    let host = FakeHost::new(
        fetcher,
        FakeExtractor::new().without_pth(),
        FakeProcessRunner::new(),
    );

    let builder = settings(&tmp)
        .python_version("3.5")
        .project(DirSpec::new("app"));
    let (bundler, report) = run(builder, &host).await;

    assert!(report.all_passed(), "{}", report);
    assert_eq!(
        bundler.resolved_version(),
        Some(ResolvedVersion::new(3, 5, 4, Arch::X86_64))
    );
    let runtime = build_dir(&tmp).join("python-3.5.4-embed-amd64");
    let sitecustomize =
        fs::read_to_string(runtime.join("Lib/site-packages/sitecustomize.py")).unwrap();
    assert!(sitecustomize.contains("sys.path.insert(0, '')"));
    assert!(sitecustomize.contains("p = Path(sys.prefix).parent / \"app\""));
}

#[tokio::test]
async fn test_missing_pth_file_is_recoverable() {
    let tmp = TempDir::new().unwrap();
    let host = FakeHost::new(
        fetcher(&tmp),
        FakeExtractor::new().without_pth(),
        FakeProcessRunner::new(),
    );

    let (_, report) = run(settings(&tmp), &host).await;

    assert_eq!(report.failed(), vec![Stage::UnpackRuntime]);
}

#[tokio::test]
async fn test_runtime_fetch_and_extract_failures_abort() {
    let tmp = TempDir::new().unwrap();
    let nothing = FakeFetcher::new(tmp.path().join("downloads"));
    let host = FakeHost::new(nothing, FakeExtractor::new(), FakeProcessRunner::new());
    let mut unfetched = bundler(settings(&tmp), &host);
    assert!(unfetched.run().await.is_err());
    assert!(host.runner.calls().is_empty());

    let host = FakeHost::new(fetcher(&tmp), FakeExtractor::failing(), FakeProcessRunner::new());
    let mut unextracted = bundler(settings(&tmp), &host);
    assert!(unextracted.run().await.is_err());
    assert_eq!(host.extractor.extracted().len(), 1);
    assert!(host.runner.calls().is_empty());
}

#[tokio::test]
async fn test_pip_args_derivation() {
    let tmp = TempDir::new().unwrap();
    let host = fake_host(&tmp);
    let cache = tmp.path().join("cache");

    let b = bundler(settings(&tmp).pip_args(vec!["--isolated".into()]), &host);
    assert_eq!(
        b.pip_args(),
        ["--isolated".to_string(), format!("--cache-dir={}", cache.display())]
    );

    let b = bundler(settings(&tmp).pip_cache(false), &host);
    assert_eq!(b.pip_args(), ["--no-cache-dir"]);

    let b = bundler(
        settings(&tmp).pip_cache(false).verbosity(Verbosity::Silent),
        &host,
    );
    assert_eq!(b.pip_args(), ["--no-cache-dir", "-qqq"]);
}

#[tokio::test]
async fn test_pip_args_reach_get_pip() {
    let tmp = TempDir::new().unwrap();
    let host = fake_host(&tmp);

    let (_, report) = run(settings(&tmp).pip_cache(false), &host).await;

    assert!(report.all_passed(), "{}", report);
    let calls = host.runner.calls();
    assert_eq!(calls[0][2..], ["--no-cache-dir"]);
}

#[tokio::test]
async fn test_hook_sees_the_bundler() {
    let tmp = TempDir::new().unwrap();
    let host = fake_host(&tmp);
    let seen: Arc<Mutex<Option<PathBuf>>> = Arc::new(Mutex::new(None));
    let seen_in_hook = Arc::clone(&seen);

    let hook = PostBuildHook::new(move |bundler| {
        *seen_in_hook.lock().unwrap() = bundler.runtime_dir().map(Path::to_path_buf);
        bundler.build_dir().join(bootstrap::BOOTSTRAP_DIR_NAME).is_dir()
    });
    let (_, report) = run(settings(&tmp).hook(hook), &host).await;

    assert!(report.all_passed(), "{}", report);
    assert_eq!(
        seen.lock().unwrap().clone(),
        Some(build_dir(&tmp).join(RUNTIME_DIR))
    );
}

#[tokio::test]
async fn test_failing_hook_is_reported() {
    let tmp = TempDir::new().unwrap();
    let host = fake_host(&tmp);

    let hook = PostBuildHook::new(|_| false);
    let (_, report) = run(settings(&tmp).hook(hook), &host).await;

    assert_eq!(report.failed(), vec![Stage::CustomHook]);
}

#[tokio::test]
async fn test_rerun_recreates_build_dir() {
    let tmp = TempDir::new().unwrap();
    let host = fake_host(&tmp);
    let mut rerun = bundler(settings(&tmp), &host);

    rerun.run().await.unwrap();
    let stale = build_dir(&tmp).join("stale.txt");
    fs::write(&stale, "old").unwrap();

    let report = rerun.run().await.unwrap();
    assert!(report.all_passed(), "{}", report);
    assert!(!stale.exists());
}

#[tokio::test]
async fn test_report_serializes_every_stage() {
    let tmp = TempDir::new().unwrap();
    let host = fake_host(&tmp);
    let (_, report) = run(settings(&tmp), &host).await;

    let json = serde_json::to_value(report).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), Stage::ALL.len());
    assert!(object.values().all(|v| v == &serde_json::Value::Bool(true)));
}

#[test]
fn test_output_dir_may_not_erase_sources() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("pyembed.toml"), "python_version = \"3.8\"\n");
    write(&tmp.path().join("app/main.py"), "print('hi')\n");
    write(&tmp.path().join("assets/docs/index.html"), "<html/>\n");

    let sources = || {
        SettingsBuilder::new()
            .base_dir(tmp.path())
            .project(DirSpec::new("app").entry_point("main.py", "Main"))
            .copy_dir(DirSpec::new("assets/docs"))
    };

    let rejected = [
        PathBuf::from("."),
        PathBuf::from(".."),
        PathBuf::from("app"),
        PathBuf::from("app/.."),
        PathBuf::from("assets"),
        PathBuf::from("assets/docs"),
        tmp.path().to_path_buf(),
    ];
    for dir in rejected {
        match sources().output_dir(&dir).build() {
            Err(Error::InvalidSettings(reason)) => {
                assert!(reason.contains("would erase"), "{}", reason)
            }
            other => panic!("output dir {:?} accepted: {:?}", dir, other),
        }
    }

    assert!(sources().output_dir("build").build().is_ok());
    assert!(sources().output_dir("app-dist").build().is_ok());
    assert!(tmp.path().join("pyembed.toml").exists());
    assert!(tmp.path().join("app/main.py").exists());
}

#[tokio::test]
async fn test_silent_failure_summary_goes_to_message_sink() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("app/main.py"), "print('hi')\n");
    let host = fake_host(&tmp);
    let lines: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&lines);
    let sink: MessageSink = Arc::new(move |text: &str| captured.lock().unwrap().push(text.to_string()));

    let builder = settings(&tmp)
        .verbosity(Verbosity::Silent)
        .project(DirSpec::new("app").entry_point("missing.py", "Missing"));
    let mut b = bundler(builder, &host).with_message_sink(sink);
    let report = b.run().await.unwrap();

    assert_eq!(report.failed(), vec![Stage::EmitBootstrap]);
    let lines = lines.lock().unwrap();
    assert_eq!(lines.len(), 1, "{:?}", lines);
    assert!(lines[0].contains("some errors occurred"));
    assert!(lines[0].contains("ERROR"));

    let json: serde_json::Value = serde_json::from_str(&cli::report_json(&report).unwrap()).unwrap();
    assert_eq!(json["emit_bootstrap"], false);
    assert_eq!(json["copy_projects"], true);
}

#[tokio::test]
async fn test_failed_rename_keeps_windowed_entry() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("app/lib.py"), "X = 1\n");
    write(&tmp.path().join("app/tool.pyw"), "import tkinter\n");
    let host = fake_host(&tmp);

    let builder = settings(&tmp)
        .delayed_install(true)
        .pyc_only(true)
        .project(
            DirSpec::new("app")
                .entry_point("main.pyw", "Missing")
                .entry_point("tool.pyw", "Tool"),
        );
    let (b, report) = run(builder, &host).await;

    assert!(!report.compile);
    let paths: Vec<_> = b.entry_points().iter().map(|e| e.path().to_path_buf()).collect();
    assert_eq!(
        paths,
        vec![PathBuf::from("app/main.pyw"), PathBuf::from("app/tool.py")]
    );
    assert!(build_dir(&tmp).join("app/tool.py").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_command_hook_on_multi_thread_runtime() {
    let tmp = TempDir::new().unwrap();
    let host = fake_host(&tmp);

    let hook = cli::config::command_hook(vec!["true".to_string()]);
    let (_, report) = run(settings(&tmp).hook(hook), &host).await;
    assert!(report.custom_hook);

    let hook = cli::config::command_hook(vec!["false".to_string()]);
    let (_, report) = run(settings(&tmp).hook(hook), &host).await;
    assert_eq!(report.failed(), vec![Stage::CustomHook]);
}

#[tokio::test]
async fn test_command_hook_on_current_thread_runtime() {
    let tmp = TempDir::new().unwrap();
    let host = fake_host(&tmp);

    let hook = cli::config::command_hook(vec!["true".to_string()]);
    let (_, report) = run(settings(&tmp).hook(hook), &host).await;
    assert!(report.custom_hook);
}
