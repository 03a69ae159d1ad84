// tests/resolver_test.rs
use branch_version::boundary::BoundaryWarning;
use branch_version::domain::{BranchCategory, BuildContext};
use branch_version::git::{MockRepository, QueryOutput};
use branch_version::resolver::{Resolution, VersionResolver};
use branch_version::VersionError;

fn resolve(repo: &MockRepository, reference: &str, run: u64, sha: &str) -> Result<Resolution, VersionError> {
    VersionResolver::new(repo, "main", "origin").resolve(&BuildContext::new(reference, run, sha))
}

fn main_tagged(tag: &str) -> MockRepository {
    MockRepository::new().with_exact_tag("origin/main", tag)
}

// ============================================================================
// Documented examples
// ============================================================================

#[test]
fn test_tag_on_main_example() {
    let repo = MockRepository::new().with_branches_containing("1.2.3", &["origin/main"]);
    let version = resolve(&repo, "refs/tags/1.2.3", 40, "dc6ebc32aa8ecf20529a677d896a8263df4900ee")
        .unwrap()
        .version;

    assert_eq!(
        version.informational_version(),
        "1.2.3+dc6ebc32aa8ecf20529a677d896a8263df4900ee"
    );
    assert_eq!(version.sem_ver(), "1.2.3");
    assert_eq!(version.assembly_sem_ver(), "1.2.3.0");
}

#[test]
fn test_release_branch_example() {
    let repo = MockRepository::new();
    let version = resolve(
        &repo,
        "refs/heads/release/1.3.0",
        12,
        "56793f7f6259dd4042d57e9d206cb9b1d8434508",
    )
    .unwrap()
    .version;

    assert_eq!(
        version.informational_version(),
        "1.3.0-beta.12+56793f7f6259dd4042d57e9d206cb9b1d8434508"
    );
    assert_eq!(version.sem_ver(), "1.3.0-beta.12");
    assert_eq!(version.assembly_sem_ver(), "1.3.0.0");
}

#[test]
fn test_feature_branch_scenario() {
    let repo = main_tagged("2.1.0");
    let version = resolve(&repo, "refs/heads/feature/login-fix", 7, "abc123")
        .unwrap()
        .version;

    assert_eq!(version.category(), BranchCategory::Feature);
    assert_eq!(version.sem_ver(), "2.2.0-login-fix.7");
    assert_eq!(version.assembly_sem_ver(), "2.2.0.0");
    assert_eq!(version.informational_version(), "2.2.0-login-fix.7+abc123");
}

// ============================================================================
// Properties over a range of inputs
// ============================================================================

#[test]
fn test_tags_on_main_resolve_to_themselves() {
    for tag in ["0.0.1", "1.2.3", "10.0.0", "3.14.159"] {
        let repo = MockRepository::new().with_branches_containing(tag, &["origin/main"]);
        let version = resolve(&repo, &format!("refs/tags/{}", tag), 1, "sha")
            .unwrap()
            .version;
        assert_eq!(version.sem_ver(), tag);
        assert_eq!(version.suffix(), "");
    }
}

#[test]
fn test_release_versions_are_verbatim() {
    for (release, run) in [("1.3.0", 12u64), ("0.9.17", 1), ("4.0.0", 300)] {
        let repo = main_tagged("9.9.9");
        let version = resolve(&repo, &format!("refs/heads/release/{}", release), run, "sha")
            .unwrap()
            .version;
        assert_eq!(version.major_minor_patch(), release);
        assert_eq!(version.suffix(), format!("-beta.{}", run));
    }
}

#[test]
fn test_hotfix_increments_patch() {
    for (tag, expected) in [("1.2.3", "1.2.4"), ("0.0.0", "0.0.1"), ("2.9.99", "2.9.100")] {
        let repo = main_tagged(tag);
        let version = resolve(&repo, "refs/heads/hotfix/urgent", 3, "sha")
            .unwrap()
            .version;
        assert_eq!(version.major_minor_patch(), expected);
        assert_eq!(version.suffix(), "-urgent.3");
    }
}

#[test]
fn test_develop_and_feature_increment_minor() {
    for (tag, expected) in [("1.2.3", "1.3.0"), ("0.0.9", "0.1.0"), ("5.99.1", "5.100.0")] {
        let repo = main_tagged(tag);
        for reference in ["refs/heads/develop", "refs/heads/feature/x"] {
            let version = resolve(&repo, reference, 1, "sha").unwrap().version;
            assert_eq!(version.major_minor_patch(), expected, "{}", reference);
        }
    }
}

#[test]
fn test_untagged_main_yields_sentinel() {
    for reference in [
        "refs/heads/hotfix/x",
        "refs/heads/develop",
        "refs/heads/feature/x",
        "refs/heads/something-else",
    ] {
        let repo = MockRepository::new();
        let resolution = resolve(&repo, reference, 2, "sha").unwrap();
        assert_eq!(resolution.version.major_minor_patch(), "0.0.0", "{}", reference);
        assert!(resolution
            .warnings
            .contains(&BoundaryWarning::UntaggedMainBranch {
                branch: "main".to_string()
            }));
    }
}

#[test]
fn test_git_unavailable_during_lookup_yields_sentinel() {
    let repo = MockRepository::new().unavailable();
    let version = resolve(&repo, "refs/heads/develop", 2, "sha").unwrap().version;
    assert_eq!(version.sem_ver(), "0.0.0-dev.2");
}

#[test]
fn test_assembly_version_always_appends_zero() {
    let repo = main_tagged("3.4.5").with_branches_containing("3.4.5", &["origin/main"]);
    for reference in [
        "refs/tags/3.4.5",
        "refs/heads/release/7.0.0",
        "refs/heads/hotfix/a",
        "refs/heads/develop",
        "refs/heads/feature/b",
        "refs/pull/1/merge",
    ] {
        let version = resolve(&repo, reference, 9, "sha").unwrap().version;
        assert_eq!(
            version.assembly_sem_ver(),
            format!("{}.0", version.major_minor_patch())
        );
    }
}

#[test]
fn test_informational_version_replaces_slashes() {
    let repo = main_tagged("1.0.0");
    let version = resolve(&repo, "refs/heads/feature/team/login", 4, "abc/def")
        .unwrap()
        .version;

    assert_eq!(version.sem_ver(), "1.1.0-team/login.4");
    assert_eq!(version.informational_version(), "1.1.0-team-login.4+abc-def");
    assert!(!version.informational_version().contains('/'));
    assert!(version.informational_version().ends_with("+abc-def"));
}

#[test]
fn test_hotfix_label_keeps_slashes_in_semver() {
    let repo = main_tagged("1.0.0");
    let version = resolve(&repo, "refs/heads/hotfix/JIRA-1/crash", 2, "s")
        .unwrap()
        .version;
    assert_eq!(version.sem_ver(), "1.0.1-JIRA-1/crash.2");
    assert_eq!(version.informational_version(), "1.0.1-JIRA-1-crash.2+s");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_direct_main_build_fails() {
    let repo = main_tagged("1.0.0");
    let err = resolve(&repo, "refs/heads/main", 1, "sha").unwrap_err();
    assert!(matches!(err, VersionError::DirectMainBuild { .. }));
    assert!(repo.calls().is_empty());
}

#[test]
fn test_direct_build_of_custom_main_fails() {
    let repo = MockRepository::new();
    let err = VersionResolver::new(&repo, "trunk", "origin")
        .resolve(&BuildContext::new("refs/heads/trunk", 1, "sha"))
        .unwrap_err();
    assert!(err.to_string().contains("trunk"));
}

#[test]
fn test_malformed_tag_fails_before_any_lookup() {
    for reference in ["refs/tags/v1.2.3", "refs/tags/1.2", "refs/tags/latest"] {
        let repo = MockRepository::new().with_branches_containing("1.2.3", &["origin/main"]);
        let err = resolve(&repo, reference, 1, "sha").unwrap_err();
        assert!(matches!(err, VersionError::Format(_)), "{}", reference);
        assert!(repo.calls().is_empty(), "{}", reference);
    }
}

#[test]
fn test_malformed_release_name_fails() {
    let repo = MockRepository::new();
    let err = resolve(&repo, "refs/heads/release/2024-q1", 1, "sha").unwrap_err();
    assert!(matches!(err, VersionError::Format(_)));
    assert!(err.to_string().contains("release/x.x.x"));
}

#[test]
fn test_malformed_main_tag_fails() {
    let repo = main_tagged("release-5");
    let err = resolve(&repo, "refs/heads/develop", 1, "sha").unwrap_err();
    assert!(matches!(err, VersionError::Format(_)));
}

#[test]
fn test_tag_outside_main_fails() {
    let repo = MockRepository::new()
        .with_branches_containing("1.2.3", &["origin/develop", "origin/feature/x"]);
    let err = resolve(&repo, "refs/tags/1.2.3", 1, "sha").unwrap_err();
    assert!(matches!(err, VersionError::TagOwnership { .. }));
    assert_eq!(err.to_string(), "Tag 1.2.3 does not belong to main branch.");
}

#[test]
fn test_membership_query_failure_is_fatal() {
    let repo = MockRepository::new().with_branch_query_output("1.2.3", QueryOutput::failed(1));
    let err = resolve(&repo, "refs/tags/1.2.3", 1, "sha").unwrap_err();
    assert!(matches!(err, VersionError::GitCommand(_)));

    let repo = MockRepository::new().unavailable();
    let err = resolve(&repo, "refs/tags/1.2.3", 1, "sha").unwrap_err();
    assert!(matches!(err, VersionError::GitCommand(_)));
}

#[test]
fn test_custom_remote_is_used_for_membership() {
    let repo = MockRepository::new().with_branches_containing("1.2.3", &["upstream/main"]);
    let resolution = VersionResolver::new(&repo, "main", "upstream")
        .resolve(&BuildContext::new("refs/tags/1.2.3", 1, "sha"))
        .unwrap();
    assert_eq!(resolution.version.sem_ver(), "1.2.3");
}
