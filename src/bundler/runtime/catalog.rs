//! Catalog of published embeddable runtime packages.
//!
//! Every version the resolver can return is listed here with the checksums
//! of its 64-bit and 32-bit archives. Gaps are real: some security-only
//! releases never shipped an embeddable package (3.5.5+, 3.6.9+, 3.7.10+,
//! 3.8.11+), and 3.9.3 was withdrawn.

use crate::bundler::Arch;

/// Lowest version an embeddable package exists for.
pub const MIN_TARGET_VERSION: (u32, u32, u32) = (3, 5, 0);

/// Bootstrap script used to install pip. No checksum is published for it.
pub const GET_PIP_URL: &str = "https://bootstrap.pypa.io/get-pip.py";

const DOWNLOAD_BASE: &str = "https://www.python.org/ftp/python";

/// One published runtime release.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CatalogEntry {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
    /// Appended to the version in the archive file name (`3.7.2.post1`).
    pub release_suffix: &'static str,
    pub md5_amd64: &'static str,
    pub md5_win32: &'static str,
}

impl CatalogEntry {
    /// Archive file name for the given architecture.
    pub fn archive_name(&self, arch: Arch) -> String {
        format!(
            "python-{}.{}.{}{}-embed-{}.zip",
            self.major,
            self.minor,
            self.micro,
            self.release_suffix,
            arch.package_tag()
        )
    }

    /// Download URL for the given architecture.
    pub fn url(&self, arch: Arch) -> String {
        format!(
            "{}/{}.{}.{}/{}",
            DOWNLOAD_BASE,
            self.major,
            self.minor,
            self.micro,
            self.archive_name(arch)
        )
    }

    /// Published MD5 checksum for the given architecture.
    pub fn md5(&self, arch: Arch) -> &'static str {
        match arch {
            Arch::X86_64 => self.md5_amd64,
            Arch::X86 => self.md5_win32,
        }
    }
}

const fn runtime(
    major: u32,
    minor: u32,
    micro: u32,
    md5_amd64: &'static str,
    md5_win32: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        major,
        minor,
        micro,
        release_suffix: "",
        md5_amd64,
        md5_win32,
    }
}

/// All known releases, oldest first.
pub static CATALOG: &[CatalogEntry] = &[
    runtime(3, 5, 0, "09a9bcabcbf8c616c21b1e5a6eaa9129", "6701f6eba0697949bc9031e887e27b32"),
    runtime(3, 5, 1, "b07d15f515882452684e0551decad242", "6e783d8fd44570315d488b9a9881ff10"),
    runtime(3, 5, 2, "f1c24bb78bd6dd792a73d5ebfbd3b20e", "ad637a1db7cf91e344318d55c94ad3ca"),
    runtime(3, 5, 3, "1264131c4c2f3f935f34c455bceedee1", "7dbd6043bd041ed3db738ad90b6d697f"),
    runtime(3, 5, 4, "1b56c67f3c849446794a15189f425f53", "3ce7b067ddd9a91bb221351d9370ebe9"),
    runtime(3, 6, 0, "0ec0caeea75bae5d2771cf619917c71f", "1adf2fb735c5000af32d42c39136727c"),
    runtime(3, 6, 1, "708496ebbe9a730d19d5d288afd216f1", "8dff09a1b19b7a7dcb915765328484cf"),
    runtime(3, 6, 2, "0fdfe9f79e0991815d6fc1712871c17f", "2ca4768fdbadf6e670e97857bfab83e8"),
    runtime(3, 6, 3, "b1daa2a41589d7504117991104b96fe5", "cf1c75ad7ccf9dec57ba7269198fd56b"),
    runtime(3, 6, 4, "d2fb546fd4b189146dbefeba85e7266b", "15802be75a6246070d85b87b3f43f83f"),
    runtime(3, 6, 5, "04cc4f6f6a14ba74f6ae1a8b685ec471", "b0b099a4fa479fb37880c15f2b2f4f34"),
    runtime(3, 6, 6, "7148ec14edfdc13f42e06a14d617c921", "b4c424de065bad238c71359f3cd71ef2"),
    runtime(3, 6, 7, "7617e04b9dafc564f680e37c2f2398b8", "a993744c9daa6d159712c8a35374ca9c"),
    runtime(3, 6, 8, "73df7cb2f1500ff36d7dbeeac3968711", "60470b4cceba52094121d43cd3f6ce3a"),
    runtime(3, 7, 0, "cb8b4f0d979a36258f73ed541def10a5", "ed9a1c028c1e99f5323b9c20723d7d6f"),
    runtime(3, 7, 1, "74f919be8add2749e73d2d91eb6d1da5", "aa4188ea480a64a3ea87e72e09f4c097"),
    CatalogEntry {
        major: 3,
        minor: 7,
        micro: 2,
        release_suffix: ".post1",
        md5_amd64: "f81568590bef56e5997e63b434664d58",
        md5_win32: "26881045297dc1883a1d61baffeecaf0",
    },
    runtime(3, 7, 3, "854ac011983b4c799379a3baa3a040ec", "70df01e7b0c1b7042aabb5a3c1e2fbd5"),
    runtime(3, 7, 4, "9b00c8cf6d9ec0b9abe83184a40729a2", "9fab3b81f8841879fda94133574139d8"),
    runtime(3, 7, 5, "436b0f803d2a0b393590030b1cd59853", "726877d1a1f5a7dc68f6a4fa48964cd1"),
    runtime(3, 7, 6, "5f84f4f62a28d3003679dc693328f8fd", "accb8a137871ec632f581943c39cb566"),
    runtime(3, 7, 7, "6aa3b1c327561bda256f2deebf038dc9", "e9db9cf43b4f2472d75a055380871045"),
    runtime(3, 7, 8, "5ae191973e00ec490cf2a93126ce4d89", "5f0f83433bd57fa55182cb8ea42d43d6"),
    runtime(3, 7, 9, "60f77740b30030b22699dbd14883a4a3", "97c6558d479dc53bf448580b66ad7c1e"),
    runtime(3, 8, 0, "99cca948512b53fb165084787143ef19", "2ec3abf05f3f1046e0dbd1ca5c74ce88"),
    runtime(3, 8, 1, "4d091857a2153d9406bb5c522b211061", "980d5745a7e525be5abf4b443a00f734"),
    runtime(3, 8, 2, "1a98565285491c0ea65450e78afe6f8d", "1b1f0f0c5ee8601f160cfad5b560e3a7"),
    runtime(3, 8, 3, "c12ffe7f4c1b447241d5d2aedc9b5d01", "8ee09403ec0cc2e89d43b4a4f6d1521e"),
    runtime(3, 8, 4, "c68f60422a0e43dabf54b84a0e92ed6a", "910c307f58282aaa88a2e9df38083ed2"),
    runtime(3, 8, 5, "73bd7aab047b81f83e473efb5d5652a0", "bc354669bffd81a4ca14f06817222e50"),
    runtime(3, 8, 6, "5f95c5a93e2d8a5b077f406bc4dd96e7", "7b287a90b33c2a9be55fabc24a7febbb"),
    runtime(3, 8, 7, "61db96411fc00aea8a06e7e25cab2df7", "efbe9f5f3a6f166c7c9b7dbebbe2cb24"),
    runtime(3, 8, 8, "2096fb5e665c6d2e746da7ff5f31d5db", "b3e271ee4fafce0ba784bd1b84c253ae"),
    runtime(3, 8, 9, "cff9e470ee6b57c63c16b8a93c586b28", "40830c33f775641ccfad5bf17ea3a893"),
    runtime(3, 8, 10, "3acb1d7d9bde5a79f840167b166bb633", "659adf421e90fba0f56a9631f79e70fb"),
    runtime(3, 9, 0, "60d0d94337ef657c2cca1d3d9a6dd94b", "d81fc534080e10bb4172ad7ae3da5247"),
    runtime(3, 9, 1, "e70e5c22432d8f57a497cde5ec2e5ce2", "96c6fa81fe8b650e68c3dd41258ae317"),
    runtime(3, 9, 2, "bd4903eb930cf1747be01e6b8dcdd28a", "cde7d9bfd87b7777d7f0ba4b0cd4506d"),
    runtime(3, 9, 4, "5c34eb7e79cfe8a92bf56b5168a459f4", "b4bd8ec0891891158000c6844222014d"),
    runtime(3, 9, 5, "0b3a4a9ae9d319885eade3ac5aca7d17", "cacf28418ae39704743fa790d404e6bb"),
    runtime(3, 9, 6, "89980d3e54160c10554b01f2b9f0a03b", "5b9693f74979e86a9d463cf73bf0c2ab"),
    runtime(3, 9, 7, "67e19ff32b3ef62a40bccd50e33b0f53", "6d12e3e0f942830de8466a83d30a45fb"),
    runtime(3, 10, 0, "340408540eeff359d5eaf93139ab90fd", "dc9d1abc644dd78f5e48edae38c7bc6b"),
];

/// Looks up an exact release.
pub fn lookup(major: u32, minor: u32, micro: u32) -> Option<&'static CatalogEntry> {
    CATALOG
        .iter()
        .find(|e| e.major == major && e.minor == minor && e.micro == micro)
}

/// Highest known major version.
pub fn max_major() -> u32 {
    CATALOG.iter().map(|e| e.major).max().unwrap_or(MIN_TARGET_VERSION.0)
}

/// Highest known minor version for `major`.
pub fn max_minor(major: u32) -> Option<u32> {
    CATALOG
        .iter()
        .filter(|e| e.major == major)
        .map(|e| e.minor)
        .max()
}

/// Lowest known minor version for `major`.
pub fn min_minor(major: u32) -> Option<u32> {
    CATALOG
        .iter()
        .filter(|e| e.major == major)
        .map(|e| e.minor)
        .min()
}

/// Published micro versions of a minor line, ascending.
pub fn micros(major: u32, minor: u32) -> Vec<u32> {
    CATALOG
        .iter()
        .filter(|e| e.major == major && e.minor == minor)
        .map(|e| e.micro)
        .collect()
}

/// Highest published micro version of a minor line.
pub fn max_micro(major: u32, minor: u32) -> Option<u32> {
    micros(major, minor).into_iter().max()
}
