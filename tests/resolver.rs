//! Version request resolution against the runtime catalog.

use kodegen_bundler_pyembed::bundler::runtime::{ResolutionOutcome, catalog, resolve, resolve_detailed};
use kodegen_bundler_pyembed::bundler::{Arch, HostRuntime, ResolvedVersion};

fn host() -> HostRuntime {
    HostRuntime::new(3, 8, 2, Arch::X86_64)
}

fn v(major: u32, minor: u32, micro: u32, arch: Arch) -> ResolvedVersion {
    ResolvedVersion::new(major, minor, micro, arch)
}

#[test]
fn test_exact_requests() {
    assert_eq!(resolve("3.6.6-64", &host()), v(3, 6, 6, Arch::X86_64));
    assert_eq!(resolve("3.5.3", &host()), v(3, 5, 3, Arch::X86_64));
    assert_eq!(resolve("3.8.10-32", &host()), v(3, 8, 10, Arch::X86));

    let resolution = resolve_detailed("3.6.6", &host());
    assert_eq!(resolution.outcome, ResolutionOutcome::Exact);
}

#[test]
fn test_unusable_request_falls_back_to_host() {
    let host = HostRuntime::new(3, 6, 2, Arch::X86_64);
    assert_eq!(resolve("bogus", &host), v(3, 6, 2, Arch::X86_64));

    let host = HostRuntime::new(3, 7, 1, Arch::X86_64);
    assert_eq!(resolve("2.7", &host), v(3, 7, 1, Arch::X86_64));
    assert_eq!(
        resolve_detailed("2.7", &host).outcome,
        ResolutionOutcome::Fallback
    );
}

#[test]
fn test_old_or_unknown_host_falls_back_to_latest_3_5() {
    let old = HostRuntime::new(2, 7, 10, Arch::X86_64);
    assert_eq!(resolve("bogus", &old), v(3, 5, 4, Arch::X86_64));

    let unknown = HostRuntime::unknown(Arch::X86_64);
    assert_eq!(resolve("", &unknown), v(3, 5, 4, Arch::X86_64));
}

#[test]
fn test_host_fallback_is_normalized_into_the_catalog() {
    let newer = HostRuntime::new(3, 12, 1, Arch::X86_64);
    assert_eq!(resolve("bogus", &newer), v(3, 10, 0, Arch::X86_64));
}

#[test]
fn test_unpublished_micro_is_substituted() {
    assert_eq!(resolve("3.9.3-32", &host()), v(3, 9, 4, Arch::X86));
    assert_eq!(resolve("3.9.3-64", &host()), v(3, 9, 4, Arch::X86_64));
    assert_eq!(resolve("3.9.3", &host()), v(3, 9, 4, Arch::X86_64));
    assert_eq!(
        resolve_detailed("3.9.3", &host()).outcome,
        ResolutionOutcome::Substituted
    );
}

#[test]
fn test_out_of_range_parts_are_clamped() {
    assert_eq!(resolve("3.5.20", &host()), v(3, 5, 4, Arch::X86_64));
    assert_eq!(resolve("3.18", &host()), v(3, 10, 0, Arch::X86_64));
    assert_eq!(resolve("4", &host()), v(3, 10, 0, Arch::X86_64));
    assert_eq!(resolve("3.2", &host()), v(3, 5, 4, Arch::X86_64));
    assert_eq!(
        resolve_detailed("3.5.20", &host()).outcome,
        ResolutionOutcome::Clamped
    );
}

#[test]
fn test_missing_parts_default_to_newest() {
    assert_eq!(resolve("3.7", &host()), v(3, 7, 9, Arch::X86_64));
    assert_eq!(resolve("3.7-32", &host()), v(3, 7, 9, Arch::X86));
    assert_eq!(resolve("3", &host()), v(3, 10, 0, Arch::X86_64));
    assert_eq!(resolve("3-32", &host()), v(3, 10, 0, Arch::X86));
    assert_eq!(
        resolve_detailed("3", &host()).outcome,
        ResolutionOutcome::Defaulted
    );
}

#[test]
fn test_unknown_arch_suffix_means_64_bit() {
    assert_eq!(resolve("3.8.10-arm", &host()), v(3, 8, 10, Arch::X86_64));
}

#[test]
fn test_more_than_one_dash_falls_back() {
    assert_eq!(
        resolve_detailed("3.8-32-1", &host()).outcome,
        ResolutionOutcome::Fallback
    );
}

#[test]
fn test_every_resolution_is_a_catalog_key() {
    let requests = [
        "3", "3-32", "3.5", "3.6.1", "3.7.2", "3.9.3", "3.10.7", "9.9.9", "x", "3..1",
    ];
    for request in requests {
        let version = resolve(request, &host());
        assert!(
            version.catalog_entry().is_some(),
            "{} resolved to {}, which is not in the catalog",
            request,
            version
        );
    }
}

#[test]
fn test_archive_urls() {
    assert_eq!(
        v(3, 8, 10, Arch::X86_64).archive_url().as_deref(),
        Some("https://www.python.org/ftp/python/3.8.10/python-3.8.10-embed-amd64.zip")
    );
    assert_eq!(
        v(3, 7, 2, Arch::X86).archive_url().as_deref(),
        Some("https://www.python.org/ftp/python/3.7.2/python-3.7.2.post1-embed-win32.zip")
    );
    assert!(v(3, 9, 3, Arch::X86_64).archive_url().is_none());
    assert!(catalog::lookup(3, 9, 3).is_none());
}

#[test]
fn test_pth_support_starts_at_3_6() {
    assert!(!v(3, 5, 4, Arch::X86_64).uses_pth_file());
    assert!(v(3, 6, 0, Arch::X86).uses_pth_file());
    assert!(v(3, 10, 0, Arch::X86_64).uses_pth_file());
}

#[test]
fn test_display() {
    assert_eq!(v(3, 8, 10, Arch::X86_64).to_string(), "3.8.10-64");
    assert_eq!(v(3, 5, 4, Arch::X86).to_string(), "3.5.4-32");
}

#[test]
fn test_every_published_release_resolves_to_itself() {
    for entry in catalog::CATALOG {
        for (suffix, arch) in [("", Arch::X86_64), ("-64", Arch::X86_64), ("-32", Arch::X86)] {
            let request = format!("{}.{}.{}{}", entry.major, entry.minor, entry.micro, suffix);
            let resolution = resolve_detailed(&request, &host());
            assert_eq!(
                resolution.version,
                v(entry.major, entry.minor, entry.micro, arch),
                "{}",
                request
            );
            assert_eq!(resolution.outcome, ResolutionOutcome::Exact, "{}", request);
        }
    }
}

#[test]
fn test_catalog_helpers() {
    assert_eq!(catalog::max_major(), 3);
    assert_eq!(catalog::min_minor(3), Some(5));
    assert_eq!(catalog::max_minor(3), Some(10));
    assert_eq!(catalog::max_micro(3, 9), Some(7));
    assert!(!catalog::micros(3, 9).contains(&3));
    assert_eq!(
        catalog::lookup(3, 7, 2).map(|e| e.archive_name(Arch::X86_64)),
        Some("python-3.7.2.post1-embed-amd64.zip".to_string())
    );
}

#[test]
fn test_parse_host_python_version() {
    use kodegen_bundler_pyembed::bundler::builder::tool_detection::parse_python_version;

    assert_eq!(parse_python_version("Python 3.8.10"), Some((3, 8, 10)));
    assert_eq!(parse_python_version("Python 3.11.0rc1\n"), Some((3, 11, 0)));
    assert_eq!(parse_python_version("Python 3.9"), Some((3, 9, 0)));
    assert_eq!(parse_python_version("Python"), None);
    assert_eq!(parse_python_version("garbage"), None);
}
