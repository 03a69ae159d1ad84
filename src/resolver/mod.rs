//! Version resolution: ref classification, main branch lookups and assembly

pub mod main_tag;
pub mod version_resolver;

pub use version_resolver::{Resolution, VersionResolver};
