// tests/versioner_test.rs
use flowrel::domain::semver::SemVer;
use flowrel::domain::versioner::{self, TagSource};
use flowrel::domain::{Bump, FixedClock, Scheme, Versioner};
use std::sync::Arc;

fn tag_source(tag: &'static str) -> TagSource {
    Arc::new(move || Ok(tag.to_string()))
}

fn versioner_on(scheme: Scheme, tag: &'static str, date: (i32, u32, u32)) -> Box<dyn Versioner> {
    let clock = FixedClock::ymd(date.0, date.1, date.2).unwrap();
    versioner::with_clock(scheme, tag_source(tag), Arc::new(clock))
}

#[test]
fn test_next_of_empty_current() {
    let calver = versioner_on(Scheme::CalVer, "", (2025, 12, 26));
    assert_eq!(calver.next("", Bump::Minor).unwrap(), "2025.12.26");
    assert_eq!(calver.next("", Bump::Hotfix).unwrap(), "2025.12.26-1");

    let semver = versioner_on(Scheme::SemVer, "", (2025, 12, 26));
    assert_eq!(semver.next("", Bump::Minor).unwrap(), "0.1.0");
    assert_eq!(semver.next("", Bump::Patch).unwrap(), "0.0.1");
    assert_eq!(semver.next("", Bump::Hotfix).unwrap(), "0.0.1");
}

#[test]
fn test_next_is_always_valid() {
    let semver = versioner_on(Scheme::SemVer, "", (2025, 12, 26));
    for current in ["", "0.1.0", "1.2.3", "v2.0", "1.2.3-rc.1", "1.0.0+build.5"] {
        for bump in [Bump::Minor, Bump::Patch, Bump::Hotfix] {
            let next = semver.next(current, bump).unwrap();
            assert!(semver.is_valid(&next), "{} from {} via {}", next, current, bump);
        }
    }

    let calver = versioner_on(Scheme::CalVer, "", (2025, 12, 26));
    for current in ["", "2025.12.25", "2025.12.26", "2025.12.26-3", "1.2.3"] {
        for bump in [Bump::Minor, Bump::Patch, Bump::Hotfix] {
            let next = calver.next(current, bump).unwrap();
            assert!(calver.is_valid(&next), "{} from {} via {}", next, current, bump);
        }
    }
}

#[test]
fn test_semver_bumps() {
    let semver = versioner_on(Scheme::SemVer, "", (2025, 1, 1));
    assert_eq!(semver.next("1.2.3", Bump::Minor).unwrap(), "1.3.0");
    assert_eq!(semver.next("1.2.3", Bump::Patch).unwrap(), "1.2.4");
    assert_eq!(semver.next("1.2", Bump::Hotfix).unwrap(), "1.2.1");
    assert_eq!(semver.next("1.2.3-rc.1", Bump::Minor).unwrap(), "1.3.0");
    assert_eq!(semver.next("1.2.3-rc.1", Bump::Hotfix).unwrap(), "1.2.3");
}

#[test]
fn test_semver_hotfix_of_build_metadata_bumps_patch() {
    let semver = versioner_on(Scheme::SemVer, "", (2025, 1, 1));
    assert_eq!(semver.next("1.2.3+ci.7", Bump::Hotfix).unwrap(), "1.2.4");
}

#[test]
fn test_counters_at_u64_limit_do_not_panic() {
    let semver = versioner_on(Scheme::SemVer, "", (2025, 1, 1));
    assert!(semver.next(&format!("1.0.{}", u64::MAX), Bump::Patch).is_err());
    assert!(semver.next(&format!("1.{}.0", u64::MAX), Bump::Minor).is_err());

    let calver = versioner_on(Scheme::CalVer, "", (2025, 12, 25));
    let current = format!("2025.12.25-{}", u64::MAX);
    assert_eq!(calver.next(&current, Bump::Hotfix).unwrap(), "2025.12.25-1");

    let version = format!("1.0.0-rc.{}", u64::MAX);
    assert_eq!(
        SemVer::new(tag_source("")).increment_prerelease(&version).unwrap(),
        "1.0.0-rc.1"
    );
}

#[test]
fn test_semver_next_rejects_garbage() {
    let semver = versioner_on(Scheme::SemVer, "", (2025, 1, 1));
    assert!(semver.next("not-a-version", Bump::Minor).is_err());
}

#[test]
fn test_calver_hotfix_counter() {
    let calver = versioner_on(Scheme::CalVer, "", (2025, 12, 26));
    assert_eq!(calver.next("2025.12.25", Bump::Hotfix).unwrap(), "2025.12.26-1");
    assert_eq!(calver.next("2025.12.26", Bump::Hotfix).unwrap(), "2025.12.26-1");
    assert_eq!(calver.next("2025.12.26-1", Bump::Hotfix).unwrap(), "2025.12.26-2");
}

#[test]
fn test_calver_release_ignores_current() {
    let calver = versioner_on(Scheme::CalVer, "", (2026, 3, 4));
    for current in ["", "2025.12.26-4", "1.2.3", "junk"] {
        assert_eq!(calver.next(current, Bump::Minor).unwrap(), "2026.03.04");
    }
}

#[test]
fn test_semver_validity_grammar() {
    let semver = versioner_on(Scheme::SemVer, "", (2025, 1, 1));
    for valid in [
        "1.2.3",
        "v1.2.3",
        "1.2",
        "1",
        "0.1.0-rc.0",
        "1.0.0-alpha.beta",
        "1.0.0+build.1",
        "1.0.0-rc.1+sha.abc",
    ] {
        assert!(semver.is_valid(valid), "{} should be valid", valid);
    }
    for invalid in ["", "1.2.3.4", "a.b.c", "1..2", "1.2.3-", "1.2.3-rc..1", "2025.12.26"] {
        assert!(!semver.is_valid(invalid), "{} should be invalid", invalid);
    }
}

#[test]
fn test_calver_validity_grammar() {
    let calver = versioner_on(Scheme::CalVer, "", (2025, 1, 1));
    for valid in ["2025.12.26", "2025.01.05-1", "2025.01.05-42"] {
        assert!(calver.is_valid(valid), "{} should be valid", valid);
    }
    for invalid in ["2025.1.5", "25.01.05", "2025.01.05-", "2025.01.05-rc", "1.2.3", "v2025.01.05"] {
        assert!(!calver.is_valid(invalid), "{} should be invalid", invalid);
    }
}

#[test]
fn test_schemes_do_not_overlap() {
    let calver = versioner_on(Scheme::CalVer, "", (2025, 1, 1));
    let semver = versioner_on(Scheme::SemVer, "", (2025, 1, 1));
    for version in ["2025.12.26", "2025.12.26-3", "1.2.3", "0.1.0-rc.0"] {
        assert!(
            !(calver.is_valid(version) && semver.is_valid(version)),
            "{} accepted by both schemes",
            version
        );
    }
}

#[test]
fn test_prerelease_round_trip() {
    let semver = versioner_on(Scheme::SemVer, "", (2025, 1, 1));
    for version in ["0.1.0", "1.2.3", "10.0.7"] {
        for label in ["rc.0", "beta", "alpha.3"] {
            let tagged = semver.set_prerelease(version, label);
            assert_eq!(semver.remove_prerelease(&tagged), version);
        }
    }
    assert_eq!(semver.set_prerelease("1.0.0-rc.0", "rc.1"), "1.0.0-rc.1");
    assert_eq!(semver.remove_prerelease("1.2.3"), "1.2.3");
}

#[test]
fn test_calver_prerelease_is_identity() {
    let calver = versioner_on(Scheme::CalVer, "", (2025, 1, 1));
    assert_eq!(calver.set_prerelease("2025.01.01", "rc.0"), "2025.01.01");
    assert_eq!(calver.remove_prerelease("2025.01.01-2"), "2025.01.01-2");
}

#[test]
fn test_current_reads_tag_source() {
    let semver = versioner_on(Scheme::SemVer, "v1.4.0", (2025, 1, 1));
    assert_eq!(semver.current().unwrap(), "1.4.0");

    let calver = versioner_on(Scheme::CalVer, "2025.12.25-1", (2025, 1, 1));
    assert_eq!(calver.current().unwrap(), "2025.12.25-1");

    let untagged = versioner_on(Scheme::SemVer, "", (2025, 1, 1));
    assert_eq!(untagged.current().unwrap(), "");
}

#[test]
fn test_current_propagates_source_errors() {
    let failing: TagSource =
        Arc::new(|| Err(flowrel::FlowrelError::tag("describe failed")));
    let semver = versioner::new(Scheme::SemVer, failing);
    assert!(semver.current().is_err());
}

#[test]
fn test_increment_prerelease() {
    let semver = SemVer::new(tag_source(""));
    assert_eq!(semver.increment_prerelease("1.0.0-rc.0").unwrap(), "1.0.0-rc.1");
    assert_eq!(semver.increment_prerelease("1.0.0-rc.9").unwrap(), "1.0.0-rc.10");
    assert_eq!(semver.increment_prerelease("1.0.0-beta").unwrap(), "1.0.0-beta.1");
    assert_eq!(
        semver.increment_prerelease("1.0.0-alpha.beta").unwrap(),
        "1.0.0-alpha.1"
    );
    assert!(semver.increment_prerelease("1.0.0").is_err());
    assert!(semver.increment_prerelease("garbage").is_err());
}
