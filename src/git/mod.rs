//! Repository query abstraction layer
//!
//! Version resolution needs exactly two answers from version control:
//! which remote branches contain a tag, and which tag (if any) sits exactly
//! on a given revision. Both are expressed by the [RepositoryQuery] trait so
//! the resolver can run against a real repository or canned answers.
//!
//! - [command::GitCommand]: shells out to the `git` executable with a timeout
//! - [repository::Git2Repository]: answers the same queries through `git2`
//! - [mock::MockRepository]: canned `(exit code, stdout)` pairs for tests
//!
//! ```rust
//! # use branch_version::git::{MockRepository, RepositoryQuery};
//! let repo = MockRepository::new().with_exact_tag("origin/main", "1.2.3");
//! let output = repo.describe_exact_tag_at("origin/main").unwrap();
//! assert!(output.success());
//! assert_eq!(output.first_line(), Some("1.2.3"));
//! ```

pub mod command;
pub mod mock;
pub mod repository;

pub use command::GitCommand;
pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Raw answer of a repository query: a status code plus stdout text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutput {
    pub exit_code: i32,
    pub stdout: String,
}

impl QueryOutput {
    /// Successful answer with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        QueryOutput {
            exit_code: 0,
            stdout: stdout.into(),
        }
    }

    /// Failed answer with the given exit code and no output
    pub fn failed(exit_code: i32) -> Self {
        QueryOutput {
            exit_code,
            stdout: String::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// First line of stdout, without the line terminator
    pub fn first_line(&self) -> Option<&str> {
        self.stdout.lines().next()
    }

    /// Non-empty stdout lines, trimmed
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

/// Version-control queries needed by the resolver.
///
/// `Err` means the query could not be executed at all (missing binary,
/// timeout, unreadable repository). A query that ran but had no answer is an
/// `Ok` with a non-zero exit code, the way the `git` CLI reports it.
pub trait RepositoryQuery {
    /// Remote branches containing `tags/<tag>`, one short name per line
    /// (e.g. `origin/main`)
    fn list_branches_containing_tag(&self, tag: &str) -> Result<QueryOutput>;

    /// The tag pointing exactly at `rev` (e.g. `origin/main`); non-zero exit
    /// when there is none
    fn describe_exact_tag_at(&self, rev: &str) -> Result<QueryOutput>;
}

impl<T: RepositoryQuery + ?Sized> RepositoryQuery for &T {
    fn list_branches_containing_tag(&self, tag: &str) -> Result<QueryOutput> {
        (**self).list_branches_containing_tag(tag)
    }

    fn describe_exact_tag_at(&self, rev: &str) -> Result<QueryOutput> {
        (**self).describe_exact_tag_at(rev)
    }
}

impl<T: RepositoryQuery + ?Sized> RepositoryQuery for Box<T> {
    fn list_branches_containing_tag(&self, tag: &str) -> Result<QueryOutput> {
        (**self).list_branches_containing_tag(tag)
    }

    fn describe_exact_tag_at(&self, rev: &str) -> Result<QueryOutput> {
        (**self).describe_exact_tag_at(rev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_output_lines() {
        let output = QueryOutput::ok("origin/main\n  origin/develop \n\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec!["origin/main", "origin/develop"]);
    }

    #[test]
    fn test_query_output_first_line() {
        assert_eq!(QueryOutput::ok("1.2.3\n").first_line(), Some("1.2.3"));
        assert_eq!(QueryOutput::ok("").first_line(), None);
    }

    #[test]
    fn test_query_output_status() {
        assert!(QueryOutput::ok("").success());
        assert!(!QueryOutput::failed(128).success());
    }
}
