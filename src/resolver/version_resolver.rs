use crate::boundary::BoundaryWarning;
use crate::domain::{BranchRef, BuildContext, SemVerCore, VersionResult};
use crate::error::{Result, VersionError};
use crate::git::RepositoryQuery;
use crate::resolver::main_tag::{ensure_tag_on_main, find_main_tag};
use tracing::{info, warn};

/// Outcome of one resolution: the version plus any non-fatal warnings
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub version: VersionResult,
    pub warnings: Vec<BoundaryWarning>,
}

/// Derives a version from a build context and the main branch's tags
pub struct VersionResolver<R> {
    repo: R,
    main_branch_name: String,
    remote: String,
}

impl<R: RepositoryQuery> VersionResolver<R> {
    /// Create a resolver tracking `<remote>/<main_branch_name>`
    pub fn new(repo: R, main_branch_name: impl Into<String>, remote: impl Into<String>) -> Self {
        VersionResolver {
            repo,
            main_branch_name: main_branch_name.into(),
            remote: remote.into(),
        }
    }

    /// Classify the build ref, look up the base version if the category needs
    /// one, and assemble the result.
    pub fn resolve(&self, ctx: &BuildContext) -> Result<Resolution> {
        let branch_ref = BranchRef::classify(&ctx.reference, &self.main_branch_name)?;
        let run = ctx.run_number;
        let mut warnings = Vec::new();

        let (major_minor_patch, suffix) = match &branch_ref {
            BranchRef::MainTag { tag } => {
                ensure_tag_on_main(&self.repo, tag, &self.remote, &self.main_branch_name)?;
                (tag.clone(), String::new())
            }
            BranchRef::Release { version } => (version.clone(), format!("-beta.{}", run)),
            BranchRef::MainBranchDirect { branch } => {
                return Err(VersionError::DirectMainBuild {
                    branch: branch.clone(),
                })
            }
            BranchRef::Hotfix { label } => {
                let base = self.main_base(&mut warnings)?;
                (
                    bumped(base, SemVerCore::bump_patch)?,
                    format!("-{}.{}", label, run),
                )
            }
            BranchRef::Develop => {
                let base = self.main_base(&mut warnings)?;
                (bumped(base, SemVerCore::bump_minor)?, format!("-dev.{}", run))
            }
            BranchRef::Feature { label } => {
                let base = self.main_base(&mut warnings)?;
                (
                    bumped(base, SemVerCore::bump_minor)?,
                    format!("-{}.{}", label, run),
                )
            }
            BranchRef::Unknown => {
                let base = self.main_base(&mut warnings)?;
                (
                    bumped(base, SemVerCore::bump_minor)?,
                    format!("-unknown.{}", run),
                )
            }
        };

        let version = VersionResult::assemble(
            branch_ref.category(),
            major_minor_patch,
            suffix,
            &ctx.sha,
        );

        if let Err(e) = semver::Version::parse(version.sem_ver()) {
            let warning = BoundaryWarning::NonCompliantSemVer {
                version: version.sem_ver().to_string(),
                reason: e.to_string(),
            };
            warn!("{}", warning);
            warnings.push(warning);
        }

        info!(
            "{} {} {}",
            version.description(),
            version.major_minor_patch(),
            version.informational_version()
        );

        Ok(Resolution { version, warnings })
    }

    fn main_base(&self, warnings: &mut Vec<BoundaryWarning>) -> Result<Option<SemVerCore>> {
        let base = find_main_tag(&self.repo, &self.remote, &self.main_branch_name)?;
        if base.is_none() {
            let warning = BoundaryWarning::UntaggedMainBranch {
                branch: self.main_branch_name.clone(),
            };
            warn!("{}", warning);
            warnings.push(warning);
        }
        Ok(base)
    }
}

fn bumped(
    base: Option<SemVerCore>,
    bump: fn(&SemVerCore) -> Result<SemVerCore>,
) -> Result<String> {
    match base {
        Some(core) => Ok(bump(&core)?.to_string()),
        None => Ok(SemVerCore::UNKNOWN.to_string()),
    }
}
