use std::fmt;

/// Non-fatal conditions met while resolving a version.
/// These are reported to the pipeline as warnings; resolution continues.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The main branch tip carries no exact tag; the base falls back to `0.0.0`
    UntaggedMainBranch { branch: String },
    /// The assembled version is not a valid SemVer 2.0 string
    NonCompliantSemVer { version: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UntaggedMainBranch { branch } => {
                write!(f, "Branch {} does not have a tag.", branch)
            }
            BoundaryWarning::NonCompliantSemVer { version, reason } => {
                write!(f, "Version '{}' is not valid SemVer: {}", version, reason)
            }
        }
    }
}
