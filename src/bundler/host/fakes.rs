//! In-memory fakes for the collaborator traits (testing only)
//!
//! Provides `FakeFetcher`, `FakeExtractor`, `FakeProcessRunner` and
//! `RecordingCopier` that satisfy the trait contracts without network access
//! or a Windows interpreter. Each fake records the calls it receives.

use super::{Extractor, Fetcher, HostServices, ProcessRunner, ProcessStatus, TreeCopier, system};
use crate::bundler::{Error, Result, error::ErrorExt, utils::fs};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    ffi::OsString,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

// ---------------------------------------------------------------------------
// FakeFetcher
// ---------------------------------------------------------------------------

/// Serves registered URLs from memory, writing them under a scratch dir.
///
/// Unregistered URLs fail like an unreachable server. Checksums are ignored.
#[derive(Debug)]
pub struct FakeFetcher {
    dir: PathBuf,
    files: Mutex<HashMap<String, Vec<u8>>>,
    fetched: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: Mutex::new(HashMap::new()),
            fetched: Mutex::new(Vec::new()),
        }
    }

    /// Registers the body served for `url`.
    pub fn serve(self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        lock(&self.files).insert(url.into(), body.into());
        self
    }

    /// URLs fetched so far, in order.
    pub fn fetched(&self) -> Vec<String> {
        lock(&self.fetched).clone()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str, _checksum: Option<&str>) -> Result<PathBuf> {
        lock(&self.fetched).push(url.to_string());
        let body = lock(&self.files).get(url).cloned();
        let Some(body) = body else {
            return Err(Error::DownloadFailed {
                url: url.to_string(),
                reason: "not found".into(),
            });
        };
        fs::create_dir_all(&self.dir, false).await?;
        let name = url.rsplit('/').next().unwrap_or(url);
        let path = self.dir.join(name);
        tokio::fs::write(&path, body)
            .await
            .fs_context("writing fake download", &path)?;
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// FakeExtractor
// ---------------------------------------------------------------------------

/// Lays out a minimal runtime instead of unpacking the archive.
///
/// Writes `python.exe`, `pythonw.exe` and (unless disabled) a `._pth` file.
#[derive(Debug)]
pub struct FakeExtractor {
    with_pth: bool,
    fail: bool,
    extracted: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl Default for FakeExtractor {
    fn default() -> Self {
        Self {
            with_pth: true,
            fail: false,
            extracted: Mutex::new(Vec::new()),
        }
    }
}

impl FakeExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// An extractor that fails every call.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// A runtime without `._pth` support, like 3.5.
    pub fn without_pth(self) -> Self {
        Self {
            with_pth: false,
            ..self
        }
    }

    /// `(archive, dest)` pairs extracted so far.
    pub fn extracted(&self) -> Vec<(PathBuf, PathBuf)> {
        lock(&self.extracted).clone()
    }
}

#[async_trait]
impl Extractor for FakeExtractor {
    async fn extract(&self, archive: &Path, dest: &Path) -> Result<()> {
        lock(&self.extracted).push((archive.to_path_buf(), dest.to_path_buf()));
        if self.fail {
            return Err(Error::ExtractFailed {
                archive: archive.to_path_buf(),
                reason: "fake extraction failure".into(),
            });
        }
        fs::create_dir_all(dest, false).await?;
        let mut files = vec!["python.exe", "pythonw.exe"];
        if self.with_pth {
            files.push("python._pth");
        }
        for name in files {
            let path = dest.join(name);
            tokio::fs::write(&path, b"")
                .await
                .fs_context("writing fake runtime file", &path)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FakeProcessRunner
// ---------------------------------------------------------------------------

/// Records command lines and exits 0 unless an argument matches a failure rule.
///
/// `compileall ... -b` invocations write an empty `.pyc` next to every `.py`
/// under the target directory, so compiled-only builds have files to point at.
#[derive(Debug, Default)]
pub struct FakeProcessRunner {
    fail_on: Vec<String>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exits 1 for any command line with an argument containing `needle`.
    pub fn fail_when(mut self, needle: impl Into<String>) -> Self {
        self.fail_on.push(needle.into());
        self
    }

    /// Command lines run so far.
    pub fn calls(&self) -> Vec<Vec<String>> {
        lock(&self.calls).clone()
    }

    /// Command lines that contain `arg` as a whole argument.
    pub fn calls_with(&self, arg: &str) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|c| c.iter().any(|a| a == arg))
            .collect()
    }

    async fn write_pycs(dir: &Path) -> Result<()> {
        for source in fs::files_with_extension(dir, "py")? {
            let pyc = source.with_extension("pyc");
            tokio::fs::write(&pyc, b"")
                .await
                .fs_context("writing fake bytecode", &pyc)?;
        }
        Ok(())
    }
}

#[async_trait]
impl ProcessRunner for FakeProcessRunner {
    async fn run(&self, argv: &[OsString]) -> Result<ProcessStatus> {
        let args: Vec<String> = argv
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        lock(&self.calls).push(args.clone());

        if args
            .iter()
            .any(|a| self.fail_on.iter().any(|needle| a.contains(needle.as_str())))
        {
            return Ok(ProcessStatus::from_code(1));
        }

        let compiles_in_place =
            args.iter().any(|a| a == "compileall") && args.iter().any(|a| a == "-b");
        if compiles_in_place {
            if let Some(dir) = args.get(3) {
                Self::write_pycs(Path::new(dir)).await?;
            }
        }

        Ok(ProcessStatus::from_code(0))
    }
}

// ---------------------------------------------------------------------------
// RecordingCopier
// ---------------------------------------------------------------------------

/// Copies with [`system::FsTreeCopier`] and records every call.
#[derive(Debug, Default)]
pub struct RecordingCopier {
    calls: Mutex<Vec<(PathBuf, PathBuf, Vec<String>)>>,
}

impl RecordingCopier {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(src, dest, ignore_patterns)` per call.
    pub fn calls(&self) -> Vec<(PathBuf, PathBuf, Vec<String>)> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl TreeCopier for RecordingCopier {
    async fn copy_tree(&self, src: &Path, dest: &Path, ignore_patterns: &[String]) -> Result<()> {
        lock(&self.calls).push((src.to_path_buf(), dest.to_path_buf(), ignore_patterns.to_vec()));
        system::FsTreeCopier.copy_tree(src, dest, ignore_patterns).await
    }
}

// ---------------------------------------------------------------------------
// FakeHost
// ---------------------------------------------------------------------------

/// The four fakes bundled together, with typed handles kept for assertions.
#[derive(Clone, Debug)]
pub struct FakeHost {
    pub fetcher: Arc<FakeFetcher>,
    pub extractor: Arc<FakeExtractor>,
    pub runner: Arc<FakeProcessRunner>,
    pub copier: Arc<RecordingCopier>,
}

impl FakeHost {
    pub fn new(
        fetcher: FakeFetcher,
        extractor: FakeExtractor,
        runner: FakeProcessRunner,
    ) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            extractor: Arc::new(extractor),
            runner: Arc::new(runner),
            copier: Arc::new(RecordingCopier::new()),
        }
    }

    /// Collaborators to hand to the bundler.
    pub fn services(&self) -> HostServices {
        HostServices::new(
            self.fetcher.clone(),
            self.extractor.clone(),
            self.runner.clone(),
            self.copier.clone(),
        )
    }
}
