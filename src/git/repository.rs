use crate::error::Result;
use crate::git::{QueryOutput, RepositoryQuery};
use git2::{BranchType, DescribeOptions, ErrorCode, Repository as Git2Repo};
use std::path::Path;
use tracing::debug;

// Exit codes the git CLI uses for the same situations
const EXIT_BAD_OBJECT: i32 = 129;
const EXIT_FATAL: i32 = 128;

/// Repository queries answered in-process through libgit2
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl RepositoryQuery for Git2Repository {
    fn list_branches_containing_tag(&self, tag: &str) -> Result<QueryOutput> {
        let reference_name = format!("refs/tags/{}", tag);
        let tagged = match self.repo.find_reference(&reference_name) {
            Ok(reference) => reference.peel_to_commit()?.id(),
            Err(e) if e.code() == ErrorCode::NotFound => {
                debug!(tag, "tag not found");
                return Ok(QueryOutput::failed(EXIT_BAD_OBJECT));
            }
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in self.repo.branches(Some(BranchType::Remote))? {
            let (branch, _) = entry?;
            let tip = match branch.get().resolve().ok().and_then(|r| r.target()) {
                Some(oid) => oid,
                None => continue,
            };
            let name = match branch.name()? {
                Some(name) => name.to_string(),
                None => continue,
            };

            if tip == tagged || self.repo.graph_descendant_of(tip, tagged)? {
                names.push(name);
            }
        }

        names.sort();
        debug!(tag, branches = ?names, "branches containing tag");

        let mut stdout = names.join("\n");
        if !stdout.is_empty() {
            stdout.push('\n');
        }
        Ok(QueryOutput::ok(stdout))
    }

    fn describe_exact_tag_at(&self, rev: &str) -> Result<QueryOutput> {
        let commit = match self.repo.revparse_single(rev) {
            Ok(object) => object.peel_to_commit()?,
            Err(e) if e.code() == ErrorCode::NotFound => {
                debug!(rev, "revision not found");
                return Ok(QueryOutput::failed(EXIT_FATAL));
            }
            Err(e) => return Err(e.into()),
        };

        let mut options = DescribeOptions::new();
        options.describe_tags().max_candidates_tags(0);

        let output = match commit.as_object().describe(&options) {
            Ok(description) => {
                let tag = description.format(None)?;
                debug!(rev, tag = %tag, "exact tag found");
                QueryOutput::ok(format!("{}\n", tag))
            }
            Err(e) if e.code() == ErrorCode::NotFound => {
                debug!(rev, "no exact tag");
                QueryOutput::failed(EXIT_FATAL)
            }
            Err(e) => return Err(e.into()),
        };
        Ok(output)
    }
}
