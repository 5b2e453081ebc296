//! Host tool detection.
//!
//! The host interpreter supplies the fallback runtime version, and the host
//! OS decides whether the staged runtime can be executed during the build.

use std::sync::LazyLock;

/// Version of the Python interpreter on `PATH`.
///
/// Cached result to avoid repeated subprocess calls. `None` when no
/// interpreter is found or its version can't be read.
pub static HOST_PYTHON: LazyLock<Option<(u32, u32, u32)>> = LazyLock::new(|| {
    let path = match which::which("python3").or_else(|_| which::which("python")) {
        Ok(path) => path,
        Err(e) => {
            log::debug!("python not found in PATH: {}", e);
            return None;
        }
    };
    log::debug!("Found python at: {}", path.display());

    match std::process::Command::new(&path).arg("--version").output() {
        Ok(output) if output.status.success() => {
            // Python 2 prints its version on stderr
            let text = format!(
                "{}{}",
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
            let version = parse_python_version(&text);
            match version {
                Some((ma, mi, mc)) => log::info!("Host python: {}.{}.{}", ma, mi, mc),
                None => log::warn!("Can't read host python version from {:?}", text.trim()),
            }
            version
        }
        Ok(output) => {
            log::warn!(
                "python found at {} but --version check failed (exit code: {:?})",
                path.display(),
                output.status.code()
            );
            None
        }
        Err(e) => {
            log::warn!(
                "python found at {} but failed to execute: {}",
                path.display(),
                e
            );
            None
        }
    }
});

/// Whether the Windows runtime being staged can run on this host.
///
/// Immediate installs execute the staged `python.exe`; elsewhere only a
/// delayed install can succeed.
pub static HOST_RUNS_RUNTIME: LazyLock<bool> = LazyLock::new(|| cfg!(windows));

/// Parses `python --version` output such as `Python 3.8.10` or `Python 3.11.0rc1`.
pub fn parse_python_version(text: &str) -> Option<(u32, u32, u32)> {
    let version = text.split_whitespace().nth(1)?;
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let micro = parts
        .next()
        .map(|p| {
            let digits: String = p.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().unwrap_or(0)
        })
        .unwrap_or(0);
    Some((major, minor, micro))
}
