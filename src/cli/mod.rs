//! Command-line surface: argument parsing and workflow orchestration

pub mod args;
pub mod orchestration;

pub use args::Args;
pub use orchestration::{open_repository, run_resolve_workflow, ResolveWorkflowArgs, WorkflowResult};
