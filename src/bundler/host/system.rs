//! Real collaborator implementations.

use super::{Extractor, Fetcher, ProcessRunner, ProcessStatus, TreeCopier};
use crate::bundler::{
    Error, Result,
    builder::checksum,
    error::ErrorExt,
    utils::{fs, http},
};
use async_trait::async_trait;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Prefix given to cached files that failed checksum verification.
pub const BAD_CHECKSUM_PREFIX: &str = "BADMD5_";

/// Download cache keyed by file name.
///
/// With `use_cache`, a file already in the cache is reused without touching
/// the network. Otherwise any cached copy is removed and downloaded again.
/// Files failing checksum verification are renamed with
/// [`BAD_CHECKSUM_PREFIX`] so the next run downloads afresh.
#[derive(Clone, Debug)]
pub struct ArtifactCache {
    dir: PathBuf,
    use_cache: bool,
}

impl ArtifactCache {
    pub fn new(dir: impl Into<PathBuf>, use_cache: bool) -> Self {
        Self {
            dir: dir.into(),
            use_cache,
        }
    }

    /// Cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cache location of a URL: the last path segment under the cache dir.
    pub fn path_for(&self, url: &str) -> PathBuf {
        let name = url.rsplit('/').next().unwrap_or(url);
        self.dir.join(name)
    }
}

#[async_trait]
impl Fetcher for ArtifactCache {
    async fn fetch(&self, url: &str, checksum: Option<&str>) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir, false).await?;
        let target = self.path_for(url);
        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self.use_cache && target.exists() {
            log::info!("Using cached {}", file_name);
        } else {
            fs::remove_file(&target).await?;
            log::info!("Downloading {} from {}", file_name, url);
            if let Err(e) = http::download_to_file(url, &target).await {
                fs::remove_file(&target).await?;
                return Err(e);
            }
        }

        let expected = checksum.unwrap_or_default();
        if let Some(actual) = checksum::verify_md5(&target, expected).await? {
            let bad = target.with_file_name(format!("{}{}", BAD_CHECKSUM_PREFIX, file_name));
            tokio::fs::rename(&target, &bad)
                .await
                .fs_context("renaming bad download", &target)?;
            return Err(Error::ChecksumMismatch {
                file: file_name,
                expected: expected.to_string(),
                actual,
            });
        }

        log::debug!("Fetched {}", target.display());
        Ok(target)
    }
}

/// Zip extraction on the blocking pool.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZipExtractor;

#[async_trait]
impl Extractor for ZipExtractor {
    async fn extract(&self, archive: &Path, dest: &Path) -> Result<()> {
        let archive = archive.to_path_buf();
        let dest = dest.to_path_buf();
        tokio::task::spawn_blocking(move || {
            let failed = |reason: String| Error::ExtractFailed {
                archive: archive.clone(),
                reason,
            };
            let file = std::fs::File::open(&archive).fs_context("opening archive", &archive)?;
            let mut zip = zip::ZipArchive::new(file).map_err(|e| failed(e.to_string()))?;
            std::fs::create_dir_all(&dest).fs_context("creating directory", &dest)?;
            zip.extract(&dest).map_err(|e| failed(e.to_string()))
        })
        .await
        .map_err(|e| Error::GenericError(format!("Extraction task panicked: {}", e)))?
    }
}

/// Runs processes with inherited stdio and waits for them.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandRunner;

#[async_trait]
impl ProcessRunner for CommandRunner {
    async fn run(&self, argv: &[OsString]) -> Result<ProcessStatus> {
        let Some((program, args)) = argv.split_first() else {
            crate::bail!("cannot run an empty command line");
        };

        let status = tokio::process::Command::new(program)
            .args(args)
            .status()
            .await
            .map_err(|error| Error::CommandFailed {
                command: program.to_string_lossy().into_owned(),
                error,
            })?;

        if !status.success() {
            log::warn!(
                "Process exited with code {:?}: {:?}",
                status.code(),
                argv
            );
        } else {
            log::debug!("ran {:?}", argv);
        }
        Ok(ProcessStatus {
            code: status.code(),
        })
    }
}

/// Copies trees on the local file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsTreeCopier;

#[async_trait]
impl TreeCopier for FsTreeCopier {
    async fn copy_tree(&self, src: &Path, dest: &Path, ignore_patterns: &[String]) -> Result<()> {
        fs::copy_dir(src, dest, ignore_patterns).await
    }
}
