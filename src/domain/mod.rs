//! Domain logic - pure version rules independent of git operations

pub mod build;
pub mod reference;
pub mod result;
pub mod version;

pub use build::BuildContext;
pub use reference::{BranchCategory, BranchRef, Reference};
pub use result::VersionResult;
pub use version::SemVerCore;
