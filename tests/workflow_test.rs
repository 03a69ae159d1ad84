// tests/workflow_test.rs
use branch_version::cli::{open_repository, run_resolve_workflow, ResolveWorkflowArgs};
use branch_version::config::{Config, GitBackend};
use branch_version::domain::BuildContext;
use branch_version::git::MockRepository;
use branch_version::project::DotnetProjectUpdater;
use branch_version::ui;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

fn workflow_args(reference: &str, config: Config, output: Option<&std::path::Path>) -> ResolveWorkflowArgs {
    ResolveWorkflowArgs {
        config,
        build: BuildContext::new(reference, 12, "56793f7"),
        output_file: output.map(|p| p.to_path_buf()),
    }
}

#[test]
fn test_outputs_appended_to_output_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("github_output");
    fs::write(&output, "previous=value\n").unwrap();

    let updater = DotnetProjectUpdater::new(dir.path());
    run_resolve_workflow(
        workflow_args("refs/heads/release/1.3.0", Config::default(), Some(&output)),
        MockRepository::new(),
        &updater,
    )
    .unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "previous=value\n\
         informational-version=1.3.0-beta.12+56793f7\n\
         semver=1.3.0-beta.12\n\
         assembly-semver=1.3.0.0\n"
    );
}

#[test]
fn test_failure_writes_no_outputs() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("github_output");

    let updater = DotnetProjectUpdater::new(dir.path());
    let result = run_resolve_workflow(
        workflow_args("refs/tags/1.2.3", Config::default(), Some(&output)),
        MockRepository::new().with_branches_containing("1.2.3", &["origin/develop"]),
        &updater,
    );

    assert!(result.is_err());
    assert!(!output.exists());
}

#[test]
fn test_end_to_end_with_project_stamping() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("App.csproj"),
        "<Project><PropertyGroup><Version>0.0.0</Version></PropertyGroup></Project>",
    )
    .unwrap();

    let mut config = Config::default();
    config.dotnet.update_project_files = true;
    config.dotnet.projects = "*.csproj".to_string();

    let repo = MockRepository::new().with_exact_tag("origin/main", "2.1.0");
    let updater = DotnetProjectUpdater::new(dir.path());
    let result = run_resolve_workflow(
        workflow_args("refs/heads/feature/login-fix", config, None),
        repo,
        &updater,
    )
    .unwrap();

    assert_eq!(result.updated_projects.len(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("App.csproj")).unwrap(),
        "<Project><PropertyGroup><Version>2.2.0-login-fix.12+56793f7</Version></PropertyGroup></Project>"
    );
}

#[test]
fn test_open_libgit2_backend_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.git.backend = GitBackend::Libgit2;

    // A temp dir may sit below a repository; only assert when discovery fails
    if git2::Repository::discover(dir.path()).is_err() {
        assert!(open_repository(&config, dir.path()).is_err());
    }
}

#[test]
fn test_open_cli_backend_is_lazy() {
    let dir = TempDir::new().unwrap();
    assert!(open_repository(&Config::default(), dir.path()).is_ok());
}

#[test]
#[serial]
fn test_github_actions_detection() {
    std::env::set_var("GITHUB_ACTIONS", "true");
    assert!(ui::is_github_actions());

    std::env::set_var("GITHUB_ACTIONS", "false");
    assert!(!ui::is_github_actions());

    std::env::remove_var("GITHUB_ACTIONS");
    assert!(!ui::is_github_actions());
}
