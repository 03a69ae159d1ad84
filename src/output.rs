//! Named outputs handed back to the invoking pipeline

use crate::domain::VersionResult;
use crate::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

pub const INFORMATIONAL_VERSION: &str = "informational-version";
pub const SEMVER: &str = "semver";
pub const ASSEMBLY_SEMVER: &str = "assembly-semver";

const DELIMITER: &str = "BRANCH_VERSION_EOF";

/// The three version strings under their output names, in emission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionOutputs {
    entries: Vec<(&'static str, String)>,
}

impl VersionOutputs {
    pub fn from_result(result: &VersionResult) -> Self {
        VersionOutputs {
            entries: vec![
                (
                    INFORMATIONAL_VERSION,
                    result.informational_version().to_string(),
                ),
                (SEMVER, result.sem_ver().to_string()),
                (ASSEMBLY_SEMVER, result.assembly_sem_ver().to_string()),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(key, value)| (*key, value.as_str()))
    }

    /// `name: value` lines for the console log
    pub fn log_lines(&self) -> Vec<String> {
        self.iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect()
    }

    /// Render in the pipeline output file format (`name=value`, or a
    /// delimited block for values spanning lines)
    pub fn to_output_file_format(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            if value.contains('\n') {
                out.push_str(&format!("{}<<{}\n{}\n{}\n", key, DELIMITER, value, DELIMITER));
            } else {
                out.push_str(&format!("{}={}\n", key, value));
            }
        }
        out
    }

    /// Append the outputs to the pipeline output file
    pub fn append_to_file(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "writing outputs");
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(self.to_output_file_format().as_bytes())?;
        Ok(())
    }
}
