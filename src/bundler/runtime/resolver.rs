//! Version request resolution.
//!
//! A request is a free-form string such as `"3"`, `"3.8"`, `"3.8.10"` or
//! `"3.8.10-32"`. Resolution never fails: anything unusable degrades to a
//! fallback derived from the host interpreter, and anything out of range is
//! clamped to the catalog bounds. The result is always a catalog key.

use super::{HostRuntime, ResolvedVersion, catalog};
use crate::bundler::Arch;

/// How a request was turned into a version, least to most lossy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, serde::Serialize)]
pub enum ResolutionOutcome {
    /// The request named a published release.
    Exact,
    /// Missing minor or micro parts were filled with the newest release.
    Defaulted,
    /// A part was outside the catalog bounds and was clamped.
    Clamped,
    /// The requested micro was never published; the nearest one was used.
    Substituted,
    /// The request was unusable; the host-derived fallback was used.
    Fallback,
}

/// A resolved version together with how it was reached.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Resolution {
    pub version: ResolvedVersion,
    pub outcome: ResolutionOutcome,
}

/// Resolves a version request to a catalog release.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_pyembed::bundler::{Arch, HostRuntime, ResolvedVersion};
/// use kodegen_bundler_pyembed::bundler::runtime::resolve;
///
/// let host = HostRuntime::new(3, 8, 2, Arch::X86_64);
/// assert_eq!(resolve("3.9.3-32", &host), ResolvedVersion::new(3, 9, 4, Arch::X86));
/// ```
pub fn resolve(request: &str, host: &HostRuntime) -> ResolvedVersion {
    resolve_detailed(request, host).version
}

/// Resolves a version request and reports how the result was reached.
///
/// Anything but [`ResolutionOutcome::Exact`] and
/// [`ResolutionOutcome::Defaulted`] is logged as a warning.
pub fn resolve_detailed(request: &str, host: &HostRuntime) -> Resolution {
    let resolution = resolve_inner(request, host);
    match resolution.outcome {
        ResolutionOutcome::Exact | ResolutionOutcome::Defaulted => {
            log::info!("Python {} selected for <{}>", resolution.version, request);
        }
        ResolutionOutcome::Clamped | ResolutionOutcome::Substituted => {
            log::warn!(
                "Python <{}> is not available, using {} instead",
                request,
                resolution.version
            );
        }
        ResolutionOutcome::Fallback => {
            log::warn!(
                "Can't figure out <{}>, defaulting to {}",
                request,
                resolution.version
            );
        }
    }
    resolution
}

fn resolve_inner(request: &str, host: &HostRuntime) -> Resolution {
    let fallback = Resolution {
        version: fallback(host),
        outcome: ResolutionOutcome::Fallback,
    };

    let (numbers, arch) = split_arch(request.trim());

    let parts: Option<Vec<u32>> = numbers
        .split('.')
        .map(|part| part.trim().parse::<u32>().ok())
        .collect();
    let Some(parts) = parts else {
        return fallback;
    };

    let major = parts[0];
    if major < catalog::MIN_TARGET_VERSION.0 {
        return fallback;
    }

    let (version, outcome) = normalize(major, parts.get(1).copied(), parts.get(2).copied(), arch);
    Resolution { version, outcome }
}

/// Splits an optional `-32` suffix. Any other suffix means 64-bit.
///
/// A request with more than one dash is left whole and fails to parse.
fn split_arch(request: &str) -> (&str, Arch) {
    let mut pieces = request.split('-');
    match (pieces.next(), pieces.next(), pieces.next()) {
        (Some(numbers), Some(bits), None) => {
            let arch = bits.trim().parse().map_or(Arch::X86_64, Arch::from_bits);
            (numbers, arch)
        }
        _ => (request, Arch::X86_64),
    }
}

/// Host interpreter version, or the newest 3.5 release if the host is older
/// or unknown. Normalized so it is always a catalog key.
fn fallback(host: &HostRuntime) -> ResolvedVersion {
    let (min_major, min_minor, _) = catalog::MIN_TARGET_VERSION;
    match host.version {
        Some(version) if version >= catalog::MIN_TARGET_VERSION => {
            normalize(version.0, Some(version.1), Some(version.2), host.arch).0
        }
        _ => normalize(min_major, Some(min_minor), None, host.arch).0,
    }
}

/// Clamps each part into the catalog, major first.
fn normalize(
    major: u32,
    minor: Option<u32>,
    micro: Option<u32>,
    arch: Arch,
) -> (ResolvedVersion, ResolutionOutcome) {
    let mut outcome = ResolutionOutcome::Exact;
    let mut note = |o: ResolutionOutcome| outcome = outcome.max(o);

    let max_major = catalog::max_major();
    let major = if major > max_major {
        note(ResolutionOutcome::Clamped);
        max_major
    } else {
        major
    };

    let lowest_minor = catalog::min_minor(major).unwrap_or(0);
    let highest_minor = catalog::max_minor(major).unwrap_or(lowest_minor);
    let minor = match minor {
        None => {
            note(ResolutionOutcome::Defaulted);
            highest_minor
        }
        Some(m) if m > highest_minor => {
            note(ResolutionOutcome::Clamped);
            highest_minor
        }
        Some(m) if m < lowest_minor => {
            note(ResolutionOutcome::Clamped);
            lowest_minor
        }
        Some(m) => m,
    };

    let available = catalog::micros(major, minor);
    let highest_micro = available.iter().copied().max().unwrap_or(0);
    let micro = match micro {
        None => {
            note(ResolutionOutcome::Defaulted);
            highest_micro
        }
        Some(m) if m > highest_micro => {
            note(ResolutionOutcome::Clamped);
            highest_micro
        }
        Some(m) if available.contains(&m) => m,
        Some(m) => {
            note(ResolutionOutcome::Substituted);
            nearest(&available, m).unwrap_or(highest_micro)
        }
    };

    (ResolvedVersion::new(major, minor, micro, arch), outcome)
}

/// Closest published micro; ties go to the newer release.
fn nearest(available: &[u32], wanted: u32) -> Option<u32> {
    available
        .iter()
        .copied()
        .min_by_key(|&m| (m.abs_diff(wanted), std::cmp::Reverse(m)))
}
