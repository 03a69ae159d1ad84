//! User interface module - console formatting and pipeline detection.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_failure, display_outputs, display_success,
    format_annotation, Annotation,
};

/// Whether the process runs as a GitHub Actions step, where warnings and
/// errors are reported as workflow annotations.
pub fn is_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS")
        .map(|value| value == "true")
        .unwrap_or(false)
}
