//! Main workflow orchestration logic
//!
//! One invocation end to end: resolve the version for the build context,
//! hand the named outputs to the pipeline and, when configured, stamp the
//! informational version into project files. Kept separate from argument
//! parsing so it can be driven programmatically.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};

use crate::boundary::BoundaryWarning;
use crate::config::{Config, GitBackend};
use crate::domain::{BuildContext, VersionResult};
use crate::error::Result;
use crate::git::{Git2Repository, GitCommand, RepositoryQuery};
use crate::output::VersionOutputs;
use crate::project::ProjectFileUpdater;
use crate::resolver::VersionResolver;

/// Arguments for the resolve workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveWorkflowArgs {
    /// Fully layered configuration
    pub config: Config,

    /// Ref, build counter and commit id of the current build
    pub build: BuildContext,

    /// Pipeline output file receiving `name=value` lines
    pub output_file: Option<PathBuf>,
}

/// Result of a successful resolve workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The computed version
    pub version: VersionResult,

    /// The named outputs handed to the pipeline
    pub outputs: VersionOutputs,

    /// Non-fatal conditions met along the way
    pub warnings: Vec<BoundaryWarning>,

    /// Project files stamped with the informational version
    pub updated_projects: Vec<PathBuf>,
}

/// Open the repository query backend selected by the configuration
pub fn open_repository(config: &Config, repo_dir: &Path) -> Result<Box<dyn RepositoryQuery>> {
    debug!(backend = ?config.git.backend, dir = %repo_dir.display(), "opening repository");
    Ok(match config.git.backend {
        GitBackend::Cli => Box::new(GitCommand::new(
            repo_dir,
            Duration::from_secs(config.git.timeout_secs),
        )),
        GitBackend::Libgit2 => Box::new(Git2Repository::open(repo_dir)?),
    })
}

/// Resolve workflow
///
/// 1. Validate the configuration
/// 2. Resolve the version (any failure aborts before outputs are written)
/// 3. Append the outputs to the pipeline output file, if any
/// 4. Stamp project files, if enabled
pub fn run_resolve_workflow<R, U>(
    args: ResolveWorkflowArgs,
    repo: R,
    updater: &U,
) -> Result<WorkflowResult>
where
    R: RepositoryQuery,
    U: ProjectFileUpdater + ?Sized,
{
    let config = args.config;
    config.validate()?;

    info!(reference = %args.build.reference, run = args.build.run_number, "resolving version");

    let resolver = VersionResolver::new(repo, config.main_branch_name.clone(), config.remote.clone());
    let resolution = resolver.resolve(&args.build)?;

    let outputs = VersionOutputs::from_result(&resolution.version);
    if let Some(path) = &args.output_file {
        outputs.append_to_file(path)?;
    }
    for line in outputs.log_lines() {
        debug!("{}", line);
    }

    let updated_projects = if config.dotnet.update_project_files {
        updater.update(
            &config.dotnet.projects,
            resolution.version.informational_version(),
        )?
    } else {
        Vec::new()
    };

    Ok(WorkflowResult {
        version: resolution.version,
        outputs,
        warnings: resolution.warnings,
        updated_projects,
    })
}
