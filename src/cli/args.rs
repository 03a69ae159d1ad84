use crate::config::{parse_flag, ConfigOverrides, GitBackend};
use crate::domain::BuildContext;
use std::path::PathBuf;

/// Command-line arguments. Pipeline inputs fall back to the environment
/// variables a GitHub Actions step receives.
#[derive(clap::Parser, Debug, Clone)]
#[command(
    name = "branch-version",
    version,
    about = "Derive a semantic version from the ref being built"
)]
pub struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(long = "ref", env = "GITHUB_REF", help = "Full ref being built")]
    pub git_ref: String,

    #[arg(long, env = "GITHUB_RUN_NUMBER", help = "Build counter")]
    pub run_number: u64,

    #[arg(long, env = "GITHUB_SHA", help = "Commit identifier")]
    pub sha: String,

    #[arg(long, env = "INPUT_MAIN-BRANCH-NAME", help = "Name of the trunk branch")]
    pub main_branch_name: Option<String>,

    #[arg(
        long,
        env = "INPUT_UPDATE-DOTNET-PROJECT-FILES",
        value_parser = parse_flag,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Stamp the informational version into .NET project files"
    )]
    pub update_dotnet_project_files: Option<bool>,

    #[arg(
        long,
        env = "INPUT_DOTNET-PROJECTS",
        help = "Glob pattern selecting the project files to stamp"
    )]
    pub dotnet_projects: Option<String>,

    #[arg(long, help = "Remote holding the main branch")]
    pub remote: Option<String>,

    #[arg(long, value_enum, help = "How repository queries are answered")]
    pub git_backend: Option<GitBackend>,

    #[arg(long, help = "Timeout in seconds for a single git query")]
    pub git_timeout: Option<u64>,

    #[arg(long, default_value = ".", help = "Repository working directory")]
    pub repo: PathBuf,

    #[arg(long, env = "GITHUB_OUTPUT", help = "File receiving the named outputs")]
    pub output_file: Option<PathBuf>,
}

impl Args {
    /// Values that take precedence over the configuration file
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            main_branch_name: non_empty(&self.main_branch_name),
            remote: non_empty(&self.remote),
            git_backend: self.git_backend,
            git_timeout_secs: self.git_timeout,
            update_project_files: self.update_dotnet_project_files,
            projects: non_empty(&self.dotnet_projects),
        }
    }

    pub fn build_context(&self) -> BuildContext {
        BuildContext::new(self.git_ref.clone(), self.run_number, self.sha.clone())
    }

    /// Output file, ignoring an empty path
    pub fn output_file(&self) -> Option<PathBuf> {
        self.output_file
            .clone()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

// Unset pipeline inputs arrive as empty strings
fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
