//! Stamping the computed version into project metadata files

pub mod dotnet;

pub use dotnet::DotnetProjectUpdater;

use crate::error::Result;
use std::path::PathBuf;

/// Writes a version into every project file matching a pattern.
///
/// A failure on any single file aborts the whole update.
pub trait ProjectFileUpdater {
    /// Returns the files that were updated, in the order they were processed
    fn update(&self, pattern: &str, version: &str) -> Result<Vec<PathBuf>>;
}
