//! Target runtime selection and staging.
//!
//! - [`catalog`] - Published embeddable packages and their checksums
//! - [`resolver`] - Version request parsing and resolution
//! - [`import_path`] - Import-path patching of an unpacked runtime

pub mod catalog;
pub mod import_path;
pub mod resolver;

pub use resolver::{Resolution, ResolutionOutcome, resolve, resolve_detailed};

use crate::bundler::{Arch, builder::tool_detection};
use std::fmt;

/// A concrete runtime version, always present in the [`catalog`].
///
/// Ordered lexicographically over `(major, minor, micro, arch)` with 32-bit
/// sorting before 64-bit.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, serde::Serialize)]
pub struct ResolvedVersion {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
    pub arch: Arch,
}

impl ResolvedVersion {
    /// Creates a version tuple.
    pub fn new(major: u32, minor: u32, micro: u32, arch: Arch) -> Self {
        Self {
            major,
            minor,
            micro,
            arch,
        }
    }

    /// Returns the catalog entry for this version.
    pub fn catalog_entry(&self) -> Option<&'static catalog::CatalogEntry> {
        catalog::lookup(self.major, self.minor, self.micro)
    }

    /// Download URL of the embeddable archive.
    pub fn archive_url(&self) -> Option<String> {
        self.catalog_entry().map(|e| e.url(self.arch))
    }

    /// Published MD5 checksum of the embeddable archive.
    pub fn archive_md5(&self) -> Option<&'static str> {
        self.catalog_entry().map(|e| e.md5(self.arch))
    }

    /// Whether import paths are set through the `._pth` file.
    ///
    /// 3.5 has no `._pth` support and gets a `sitecustomize.py` instead.
    pub fn uses_pth_file(&self) -> bool {
        *self >= ResolvedVersion::new(3, 6, 0, Arch::X86)
    }
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}-{}",
            self.major, self.minor, self.micro, self.arch
        )
    }
}

/// The interpreter available on the build host.
///
/// Supplies the fallback version when a request cannot be parsed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HostRuntime {
    /// `(major, minor, micro)`, or `None` if no interpreter was found.
    pub version: Option<(u32, u32, u32)>,
    pub arch: Arch,
}

impl HostRuntime {
    /// A host running the given interpreter version.
    pub fn new(major: u32, minor: u32, micro: u32, arch: Arch) -> Self {
        Self {
            version: Some((major, minor, micro)),
            arch,
        }
    }

    /// A host without a usable interpreter.
    pub fn unknown(arch: Arch) -> Self {
        Self {
            version: None,
            arch,
        }
    }

    /// Detects the interpreter on `PATH`.
    pub fn detect() -> Self {
        Self {
            version: *tool_detection::HOST_PYTHON,
            arch: Arch::host(),
        }
    }
}
