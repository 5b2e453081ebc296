//! Download checksum verification.
//!
//! Runtime archives are published with MD5 sums; this module computes and
//! compares them.

use crate::bundler::{Result, error::ErrorExt};
use std::path::Path;

/// Calculates the MD5 checksum of a file.
///
/// # Returns
///
/// * `Ok(String)` - Lowercase hex-encoded MD5 digest (32 characters)
/// * `Err` - If the file cannot be read
pub async fn calculate_md5(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .fs_context("reading file for hash calculation", path)?;
    Ok(format!("{:x}", md5::compute(&bytes)))
}

/// Checks a file against an expected MD5 digest.
///
/// An empty expectation always matches. Comparison ignores case.
///
/// # Returns
///
/// * `Ok(None)` - The file matches
/// * `Ok(Some(actual))` - Mismatch; carries the computed digest
pub async fn verify_md5(path: &Path, expected: &str) -> Result<Option<String>> {
    if expected.is_empty() {
        return Ok(None);
    }
    let actual = calculate_md5(path).await?;
    if actual.eq_ignore_ascii_case(expected) {
        Ok(None)
    } else {
        Ok(Some(actual))
    }
}
