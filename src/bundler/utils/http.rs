//! HTTP utilities for downloading runtime artifacts.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Downloads a URL into `dest`, streaming the body chunk by chunk.
///
/// A partial file is left behind on failure; callers remove it.
pub async fn download_to_file(url: &str, dest: &Path) -> Result<()> {
    log::info!("Downloading {}", url);

    let failed = |reason: String| Error::DownloadFailed {
        url: url.to_string(),
        reason,
    };

    let mut response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| failed(e.to_string()))?;

    let mut file = tokio::fs::File::create(dest)
        .await
        .fs_context("creating download file", dest)?;

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| failed(format!("Failed to read response: {}", e)))?
    {
        file.write_all(&chunk)
            .await
            .fs_context("writing download file", dest)?;
    }
    file.flush().await.fs_context("writing download file", dest)?;

    Ok(())
}
