//! Collaborator traits used by the pipeline.
//!
//! The orchestrator never touches the network, archives, processes or tree
//! copies directly; it goes through these four seams:
//! - [`Fetcher`]: download with optional checksum verification and a cache
//! - [`Extractor`]: archive extraction
//! - [`ProcessRunner`]: external process invocation
//! - [`TreeCopier`]: recursive directory copy with ignore patterns
//!
//! Real implementations live in [`system`]; in-memory fakes for tests in
//! [`fakes`].

pub mod fakes;
pub mod system;

use crate::bundler::{Result, Settings};
use async_trait::async_trait;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Exit status of an external process.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ProcessStatus {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
}

impl ProcessStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Non-zero exit is the only failure signal.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Download collaborator.
///
/// Guarantees:
/// - the returned path exists and, when `checksum` is given and non-empty,
///   matches it
/// - a failed download or checksum mismatch is an `Err`
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns the local path of the file.
    async fn fetch(&self, url: &str, checksum: Option<&str>) -> Result<PathBuf>;
}

/// Archive extraction collaborator.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extracts `archive` into `dest`, which may already exist.
    async fn extract(&self, archive: &Path, dest: &Path) -> Result<()>;
}

/// External process collaborator.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Runs `argv[0]` with the remaining arguments and waits for it to exit.
    ///
    /// `Err` only if the process could not be started.
    async fn run(&self, argv: &[OsString]) -> Result<ProcessStatus>;
}

/// Tree copy collaborator.
#[async_trait]
pub trait TreeCopier: Send + Sync {
    /// Copies `src` to `dest` recursively, skipping entries whose name matches
    /// one of `ignore_patterns`. Fails if `dest` exists.
    async fn copy_tree(&self, src: &Path, dest: &Path, ignore_patterns: &[String]) -> Result<()>;
}

/// The set of collaborators a [`Bundler`](crate::bundler::Bundler) runs with.
#[derive(Clone)]
pub struct HostServices {
    pub fetcher: Arc<dyn Fetcher>,
    pub extractor: Arc<dyn Extractor>,
    pub runner: Arc<dyn ProcessRunner>,
    pub copier: Arc<dyn TreeCopier>,
}

impl HostServices {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn Extractor>,
        runner: Arc<dyn ProcessRunner>,
        copier: Arc<dyn TreeCopier>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            runner,
            copier,
        }
    }

    /// Real network, zip, process and file system implementations.
    pub fn system(settings: &Settings) -> Self {
        Self::new(
            Arc::new(system::ArtifactCache::new(
                settings.cache_dir(),
                settings.use_cache(),
            )),
            Arc::new(system::ZipExtractor),
            Arc::new(system::CommandRunner),
            Arc::new(system::FsTreeCopier),
        )
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HostServices")
    }
}
