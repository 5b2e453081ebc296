//! Import-path patching of an unpacked runtime.
//!
//! The embeddable runtime ignores `PYTHONPATH` and the usual `site` logic.
//! Projects are put on its import path by appending to the `._pth` file
//! (3.6 and later) or, on 3.5, by dropping a `sitecustomize.py` into
//! `Lib/site-packages`.

use super::ResolvedVersion;
use crate::bundler::{Result, error::ErrorExt};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Creates `Lib/site-packages` and adds the project dirs to the import path.
///
/// `project_names` are directory names relative to the build directory, which
/// is the parent of `runtime_dir`.
pub async fn patch_import_path(
    version: &ResolvedVersion,
    runtime_dir: &Path,
    project_names: &[String],
) -> Result<()> {
    let site_packages = runtime_dir.join("Lib").join("site-packages");
    tokio::fs::create_dir_all(&site_packages)
        .await
        .fs_context("creating site-packages", &site_packages)?;

    if version.uses_pth_file() {
        patch_pth_file(runtime_dir, project_names).await
    } else {
        write_sitecustomize(&site_packages, project_names).await
    }
}

/// Finds the `pythonXY._pth` file shipped with the runtime.
pub async fn find_pth_file(runtime_dir: &Path) -> Result<PathBuf> {
    let mut entries = tokio::fs::read_dir(runtime_dir)
        .await
        .fs_context("reading runtime directory", runtime_dir)?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading runtime directory", runtime_dir)?
    {
        if entry.file_name().to_string_lossy().ends_with("._pth") {
            return Ok(entry.path());
        }
    }
    crate::bail!("no ._pth file found in {}", runtime_dir.display())
}

async fn patch_pth_file(runtime_dir: &Path, project_names: &[String]) -> Result<()> {
    let pth = find_pth_file(runtime_dir).await?;
    log::debug!("Patching {}", pth.display());

    let mut text = String::from("Lib/site-packages\n");
    for name in project_names {
        text.push_str(&format!("../{}\n", name));
    }

    let mut file = tokio::fs::OpenOptions::new()
        .append(true)
        .open(&pth)
        .await
        .fs_context("opening ._pth file", &pth)?;
    file.write_all(text.as_bytes())
        .await
        .fs_context("writing ._pth file", &pth)?;
    file.flush().await.fs_context("writing ._pth file", &pth)?;
    Ok(())
}

/// Renders the `sitecustomize.py` used on runtimes without `._pth` support.
pub fn sitecustomize_source(project_names: &[String]) -> String {
    let mut text = String::from("import sys\nfrom pathlib import Path\n");
    if !project_names.is_empty() {
        text.push_str("sys.path.insert(0, '')\n");
    }
    for name in project_names {
        text.push_str(&format!("p = Path(sys.prefix).parent / \"{}\"\n", name));
        text.push_str("sys.path.append(str(p))\n");
    }
    text
}

async fn write_sitecustomize(site_packages: &Path, project_names: &[String]) -> Result<()> {
    let path = site_packages.join("sitecustomize.py");
    log::debug!("No ._pth support, writing {}", path.display());
    tokio::fs::write(&path, sitecustomize_source(project_names))
        .await
        .fs_context("writing sitecustomize.py", &path)
}
