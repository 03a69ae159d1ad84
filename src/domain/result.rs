use crate::domain::reference::BranchCategory;

/// Computed version for one invocation.
///
/// Only `major_minor_patch` and `suffix` are independent; the three output
/// strings are derived from them and the commit id at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionResult {
    category: BranchCategory,
    suffix: String,
    major_minor_patch: String,
    informational_version: String,
    sem_ver: String,
    assembly_sem_ver: String,
}

impl VersionResult {
    /// Assemble the derived strings from the core, the suffix and the commit id
    pub fn assemble(
        category: BranchCategory,
        major_minor_patch: impl Into<String>,
        suffix: impl Into<String>,
        sha: &str,
    ) -> Self {
        let major_minor_patch = major_minor_patch.into();
        let suffix = suffix.into();

        let sem_ver = format!("{}{}", major_minor_patch, suffix);
        // Informational versions end up in file names, so '/' is not allowed there
        let informational_version = format!("{}+{}", sem_ver, sha).replace('/', "-");
        let assembly_sem_ver = format!("{}.0", major_minor_patch);

        VersionResult {
            category,
            suffix,
            major_minor_patch,
            informational_version,
            sem_ver,
            assembly_sem_ver,
        }
    }

    pub fn category(&self) -> BranchCategory {
        self.category
    }

    pub fn description(&self) -> &'static str {
        self.category.description()
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn major_minor_patch(&self) -> &str {
        &self.major_minor_patch
    }

    /// `<core><suffix>+<sha>` with every `/` replaced by `-`
    pub fn informational_version(&self) -> &str {
        &self.informational_version
    }

    /// `<core><suffix>`
    pub fn sem_ver(&self) -> &str {
        &self.sem_ver
    }

    /// `<core>.0`
    pub fn assembly_sem_ver(&self) -> &str {
        &self.assembly_sem_ver
    }
}
