use thiserror::Error;

/// Unified error type for version resolution
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Format error: {0}")]
    Format(String),

    #[error("Tag {tag} does not belong to {branch} branch.")]
    TagOwnership { tag: String, branch: String },

    #[error("Unexpected build from {branch}. Ignore it and use tags instead.")]
    DirectMainBuild { branch: String },

    #[error("Git command failed: {0}")]
    GitCommand(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Project file {path}: {reason}")]
    ProjectFile { path: String, reason: String },

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in branch-version
pub type Result<T> = std::result::Result<T, VersionError>;

impl VersionError {
    /// Create a format error with context
    pub fn format(msg: impl Into<String>) -> Self {
        VersionError::Format(msg.into())
    }

    /// Create a git command error with context
    pub fn git_command(msg: impl Into<String>) -> Self {
        VersionError::GitCommand(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionError::Config(msg.into())
    }

    /// Create a project file error for a given path
    pub fn project_file(path: impl Into<String>, reason: impl Into<String>) -> Self {
        VersionError::ProjectFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a format error for a tag that is not `x.y.z`
    pub fn wrong_tag_format(tag: &str) -> Self {
        VersionError::Format(format!(
            "Found a tag {} in the wrong format. Expected SemVer: x.x.x",
            tag
        ))
    }
}
