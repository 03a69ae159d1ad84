use crate::domain::version::SemVerCore;
use crate::error::{Result, VersionError};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Prefix of fully qualified tag refs
pub const TAG_PREFIX: &str = "refs/tags/";
/// Prefix of fully qualified branch refs
pub const HEAD_PREFIX: &str = "refs/heads/";

const RELEASE_PREFIX: &str = "refs/heads/release/";
const HOTFIX_PREFIX: &str = "refs/heads/hotfix/";
const FEATURE_PREFIX: &str = "refs/heads/feature/";
const DEVELOP_REF: &str = "refs/heads/develop";

fn release_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^refs/heads/release/(\d+\.\d+\.\d+)$").expect("valid regex")
    })
}

/// A source-control reference as handed over by the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference(String);

impl Reference {
    /// Create a reference from a full ref string (e.g. `refs/heads/develop`)
    pub fn new(value: impl Into<String>) -> Self {
        Reference(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Reference {
    fn from(value: &str) -> Self {
        Reference::new(value)
    }
}

/// Branch category of a reference, without captured data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchCategory {
    MainTag,
    Release,
    Hotfix,
    MainBranchDirect,
    Develop,
    Feature,
    Unknown,
}

impl BranchCategory {
    /// Human label used in logs
    pub fn description(&self) -> &'static str {
        match self {
            BranchCategory::MainTag => "Main branch",
            BranchCategory::Release => "Release branch",
            BranchCategory::Hotfix => "Hotfix branch",
            BranchCategory::MainBranchDirect => "Main branch (direct build)",
            BranchCategory::Develop => "Develop branch",
            BranchCategory::Feature => "Feature branch",
            BranchCategory::Unknown => "Unknown branch",
        }
    }
}

impl fmt::Display for BranchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A classified reference carrying the substrings captured for its category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchRef {
    /// `refs/tags/x.y.z`; the tag text is kept verbatim
    MainTag { tag: String },
    /// `refs/heads/release/x.y.z`; the version text is kept verbatim
    Release { version: String },
    /// `refs/heads/hotfix/<label>`; the label may be empty or contain slashes
    Hotfix { label: String },
    /// `refs/heads/<main>`
    MainBranchDirect { branch: String },
    /// `refs/heads/develop`
    Develop,
    /// `refs/heads/feature/<label>`
    Feature { label: String },
    Unknown,
}

impl BranchRef {
    /// Classify a reference. First matching rule wins:
    ///
    /// 1. tag ref (must be `x.y.z`)
    /// 2. `release/x.y.z`
    /// 3. `hotfix/*`
    /// 4. the main branch itself
    /// 5. `develop`
    /// 6. `feature/*`
    /// 7. anything else
    pub fn classify(reference: &Reference, main_branch_name: &str) -> Result<Self> {
        let value = reference.as_str();

        if let Some(tag) = value.strip_prefix(TAG_PREFIX) {
            if !SemVerCore::is_valid(tag) {
                return Err(VersionError::wrong_tag_format(value));
            }
            return Ok(BranchRef::MainTag {
                tag: tag.to_string(),
            });
        }

        if value.starts_with(RELEASE_PREFIX) {
            return match release_pattern().captures(value) {
                Some(caps) => Ok(BranchRef::Release {
                    version: caps[1].to_string(),
                }),
                None => Err(VersionError::format(
                    "Wrong release name. Expected SemVer: release/x.x.x",
                )),
            };
        }

        if let Some(label) = value.strip_prefix(HOTFIX_PREFIX) {
            return Ok(BranchRef::Hotfix {
                label: label.to_string(),
            });
        }

        if value
            .strip_prefix(HEAD_PREFIX)
            .is_some_and(|branch| branch == main_branch_name)
        {
            return Ok(BranchRef::MainBranchDirect {
                branch: main_branch_name.to_string(),
            });
        }

        if value == DEVELOP_REF {
            return Ok(BranchRef::Develop);
        }

        if let Some(label) = value.strip_prefix(FEATURE_PREFIX) {
            return Ok(BranchRef::Feature {
                label: label.to_string(),
            });
        }

        Ok(BranchRef::Unknown)
    }

    pub fn category(&self) -> BranchCategory {
        match self {
            BranchRef::MainTag { .. } => BranchCategory::MainTag,
            BranchRef::Release { .. } => BranchCategory::Release,
            BranchRef::Hotfix { .. } => BranchCategory::Hotfix,
            BranchRef::MainBranchDirect { .. } => BranchCategory::MainBranchDirect,
            BranchRef::Develop => BranchCategory::Develop,
            BranchRef::Feature { .. } => BranchCategory::Feature,
            BranchRef::Unknown => BranchCategory::Unknown,
        }
    }
}
