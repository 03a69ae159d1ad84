use crate::error::{Result, VersionError};
use crate::git::{QueryOutput, RepositoryQuery};
use std::cell::RefCell;
use std::collections::HashMap;

/// Mock repository answering queries from canned `(exit code, stdout)` pairs.
///
/// Unknown tags answer like `git branch --contains` on a malformed object
/// (exit 129) and unknown revisions answer like `git describe --exact-match`
/// without a tag (exit 128).
#[derive(Default)]
pub struct MockRepository {
    branches_containing: HashMap<String, QueryOutput>,
    exact_tags: HashMap<String, QueryOutput>,
    unavailable: bool,
    calls: RefCell<Vec<String>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `list_branches_containing_tag(tag)` with the given branch names
    pub fn with_branches_containing(mut self, tag: impl Into<String>, branches: &[&str]) -> Self {
        let mut stdout = branches.join("\n");
        if !stdout.is_empty() {
            stdout.push('\n');
        }
        self.branches_containing
            .insert(tag.into(), QueryOutput::ok(stdout));
        self
    }

    /// Answer `list_branches_containing_tag(tag)` with a raw output
    pub fn with_branch_query_output(mut self, tag: impl Into<String>, output: QueryOutput) -> Self {
        self.branches_containing.insert(tag.into(), output);
        self
    }

    /// Answer `describe_exact_tag_at(rev)` with the given tag
    pub fn with_exact_tag(mut self, rev: impl Into<String>, tag: impl Into<String>) -> Self {
        self.exact_tags
            .insert(rev.into(), QueryOutput::ok(format!("{}\n", tag.into())));
        self
    }

    /// Answer `describe_exact_tag_at(rev)` with a raw output
    pub fn with_describe_output(mut self, rev: impl Into<String>, output: QueryOutput) -> Self {
        self.exact_tags.insert(rev.into(), output);
        self
    }

    /// Make every query fail as if `git` could not be executed
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Queries made so far, rendered as `method(argument)`
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.borrow_mut().push(call.clone());
        if self.unavailable {
            return Err(VersionError::git_command(format!("{}: git unavailable", call)));
        }
        Ok(())
    }
}

impl RepositoryQuery for MockRepository {
    fn list_branches_containing_tag(&self, tag: &str) -> Result<QueryOutput> {
        self.record(format!("list_branches_containing_tag({})", tag))?;
        Ok(self
            .branches_containing
            .get(tag)
            .cloned()
            .unwrap_or_else(|| QueryOutput::failed(129)))
    }

    fn describe_exact_tag_at(&self, rev: &str) -> Result<QueryOutput> {
        self.record(format!("describe_exact_tag_at({})", rev))?;
        Ok(self
            .exact_tags
            .get(rev)
            .cloned()
            .unwrap_or_else(|| QueryOutput::failed(128)))
    }
}
