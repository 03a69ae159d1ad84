//! Lookups against the main branch: the exact tag on its tip and the
//! membership of a tag in its history.

use crate::domain::SemVerCore;
use crate::error::{Result, VersionError};
use crate::git::RepositoryQuery;
use tracing::debug;

/// Find the exact `x.y.z` tag on the tip of `<remote>/<main_branch>`.
///
/// Returns `Ok(None)` when the tip has no exact tag. A query that cannot run
/// at all is folded into the same answer: a fresh repository without tags is
/// expected, so only a tag in the wrong format is fatal here.
pub fn find_main_tag<R: RepositoryQuery>(
    repo: &R,
    remote: &str,
    main_branch: &str,
) -> Result<Option<SemVerCore>> {
    let rev = format!("{}/{}", remote, main_branch);

    let output = match repo.describe_exact_tag_at(&rev) {
        Ok(output) if output.success() => output,
        Ok(output) => {
            debug!(rev = %rev, exit_code = output.exit_code, "no exact tag on main branch");
            return Ok(None);
        }
        Err(e) => {
            debug!(rev = %rev, error = %e, "exact tag query failed");
            return Ok(None);
        }
    };

    let found = output.first_line().unwrap_or_default();
    let core = SemVerCore::parse(found).map_err(|_| VersionError::wrong_tag_format(found))?;

    debug!(rev = %rev, tag = %core, "main branch tag");
    Ok(Some(core))
}

/// Verify that `tag` is reachable from `<remote>/<main_branch>`.
///
/// Unlike [find_main_tag], a query that fails or cannot run is fatal.
pub fn ensure_tag_on_main<R: RepositoryQuery>(
    repo: &R,
    tag: &str,
    remote: &str,
    main_branch: &str,
) -> Result<()> {
    let output = repo
        .list_branches_containing_tag(tag)
        .map_err(|e| match e {
            VersionError::GitCommand(_) => e,
            other => VersionError::git_command(other.to_string()),
        })?;

    if !output.success() {
        return Err(VersionError::git_command(format!(
            "listing branches containing tag {} exited with code {}",
            tag, output.exit_code
        )));
    }

    let expected = format!("{}/{}", remote, main_branch);
    if output.lines().any(|branch| branch == expected) {
        debug!(tag, branch = %expected, "tag belongs to main branch");
        Ok(())
    } else {
        Err(VersionError::TagOwnership {
            tag: tag.to_string(),
            branch: main_branch.to_string(),
        })
    }
}
