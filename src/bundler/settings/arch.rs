//! CPU architecture types and utilities.

use std::fmt;

/// CPU architecture of the staged runtime.
///
/// Embeddable Python packages are published for 32-bit (`win32`) and 64-bit
/// (`amd64`) Windows. Variants are declared narrowest first so the derived
/// ordering matches bit width: `X86 < X86_64`.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_pyembed::bundler::Arch;
///
/// let arch = Arch::from_bits(32);
/// assert_eq!(arch, Arch::X86);
/// assert_eq!(arch.bits(), 32);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// x86 / i686 (32-bit)
    X86,
    /// x86_64 / AMD64 (64-bit)
    X86_64,
}

impl Arch {
    /// Architecture of the machine running the bundler.
    pub fn host() -> Self {
        if cfg!(target_pointer_width = "64") {
            Arch::X86_64
        } else {
            Arch::X86
        }
    }

    /// Maps a bit width to an architecture. Anything but 32 is 64-bit.
    pub fn from_bits(bits: u32) -> Self {
        if bits == 32 { Arch::X86 } else { Arch::X86_64 }
    }

    /// Bit width (32 or 64).
    pub fn bits(self) -> u32 {
        match self {
            Arch::X86 => 32,
            Arch::X86_64 => 64,
        }
    }

    /// Platform tag used in embeddable package file names.
    pub fn package_tag(self) -> &'static str {
        match self {
            Arch::X86 => "win32",
            Arch::X86_64 => "amd64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}
