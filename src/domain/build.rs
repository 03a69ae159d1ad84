use crate::domain::reference::Reference;

/// Immutable per-invocation build context supplied by the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Full ref being built (e.g. `refs/heads/feature/login`)
    pub reference: Reference,
    /// Monotonically increasing build counter
    pub run_number: u64,
    /// Commit identifier
    pub sha: String,
}

impl BuildContext {
    pub fn new(reference: impl Into<String>, run_number: u64, sha: impl Into<String>) -> Self {
        BuildContext {
            reference: Reference::new(reference),
            run_number,
            sha: sha.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_context_new() {
        let ctx = BuildContext::new("refs/heads/develop", 7, "abc123");
        assert_eq!(ctx.reference.as_str(), "refs/heads/develop");
        assert_eq!(ctx.run_number, 7);
        assert_eq!(ctx.sha, "abc123");
    }
}
