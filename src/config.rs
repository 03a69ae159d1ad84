use crate::error::{Result, VersionError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const LOCAL_CONFIG_FILE: &str = "./branchversion.toml";
const USER_CONFIG_FILE: &str = ".branchversion.toml";

/// Represents the complete configuration for branch-version.
///
/// Contains the main branch settings, the repository query backend and the
/// .NET project stamping options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_main_branch_name")]
    pub main_branch_name: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub dotnet: DotnetConfig,
}

fn default_main_branch_name() -> String {
    "main".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_projects() -> String {
    "**/*.csproj".to_string()
}

/// Which implementation answers repository queries
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GitBackend {
    /// Shell out to the `git` executable
    #[default]
    Cli,
    /// Query the repository in-process through libgit2
    Libgit2,
}

/// Configuration for repository queries.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default)]
    pub backend: GitBackend,

    /// Upper bound for a single `git` invocation
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            backend: GitBackend::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Configuration for stamping the informational version into .NET projects.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DotnetConfig {
    #[serde(default)]
    pub update_project_files: bool,

    #[serde(default = "default_projects")]
    pub projects: String,
}

impl Default for DotnetConfig {
    fn default() -> Self {
        DotnetConfig {
            update_project_files: false,
            projects: default_projects(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            main_branch_name: default_main_branch_name(),
            remote: default_remote(),
            git: GitConfig::default(),
            dotnet: DotnetConfig::default(),
        }
    }
}

/// Values supplied on the command line or by the pipeline environment.
/// `None` leaves the file or default value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub main_branch_name: Option<String>,
    pub remote: Option<String>,
    pub git_backend: Option<GitBackend>,
    pub git_timeout_secs: Option<u64>,
    pub update_project_files: Option<bool>,
    pub projects: Option<String>,
}

impl Config {
    /// Apply command-line and environment values on top of this configuration
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(name) = overrides.main_branch_name {
            self.main_branch_name = name;
        }
        if let Some(remote) = overrides.remote {
            self.remote = remote;
        }
        if let Some(backend) = overrides.git_backend {
            self.git.backend = backend;
        }
        if let Some(timeout) = overrides.git_timeout_secs {
            self.git.timeout_secs = timeout;
        }
        if let Some(update) = overrides.update_project_files {
            self.dotnet.update_project_files = update;
        }
        if let Some(projects) = overrides.projects {
            self.dotnet.projects = projects;
        }
        self
    }

    /// Reject values resolution cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.main_branch_name.trim().is_empty() {
            return Err(VersionError::config("main branch name must not be empty"));
        }
        if self.remote.trim().is_empty() {
            return Err(VersionError::config("remote name must not be empty"));
        }
        if self.git.timeout_secs == 0 {
            return Err(VersionError::config("git timeout must be at least 1 second"));
        }
        if self.dotnet.update_project_files && self.dotnet.projects.trim().is_empty() {
            return Err(VersionError::config(
                "a project pattern is required when updating .NET project files",
            ));
        }
        Ok(())
    }
}

/// Parse a pipeline boolean input. Only `true` (any case) enables the flag,
/// mirroring how action inputs are compared.
pub fn parse_flag(value: &str) -> std::result::Result<bool, String> {
    Ok(value.trim().eq_ignore_ascii_case("true"))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `branchversion.toml` in current directory
/// 3. `.branchversion.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| VersionError::config(format!("cannot read {}: {}", path, e)))?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| VersionError::config(e.to_string()))
}
