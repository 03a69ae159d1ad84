//! Pure formatting functions for console output.
//!
//! Functions here only build strings or print them; nothing reads input.

use crate::boundary::BoundaryWarning;
use crate::output::VersionOutputs;
use console::style;

/// Severity of a pipeline annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    Warning,
    Error,
}

/// Format a workflow command such as `::warning::message`.
///
/// `%`, `\r` and `\n` are escaped so the message stays on one line.
pub fn format_annotation(level: Annotation, message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    let command = match level {
        Annotation::Warning => "warning",
        Annotation::Error => "error",
    };
    format!("::{}::{}", command, escaped)
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a non-fatal warning as a pipeline warning annotation.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    println!("{}", format_annotation(Annotation::Warning, &warning.to_string()));
}

/// Print the fatal error that ended the run.
pub fn display_failure(message: &str, annotate: bool) {
    if annotate {
        println!("{}", format_annotation(Annotation::Error, message));
    }
    display_error(message);
}

/// Print the computed outputs, one `name: value` per line.
pub fn display_outputs(outputs: &VersionOutputs) {
    for line in outputs.log_lines() {
        println!("{}", line);
    }
}
