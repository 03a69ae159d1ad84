use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use branch_version::cli::{open_repository, run_resolve_workflow, Args, ResolveWorkflowArgs};
use branch_version::config;
use branch_version::project::DotnetProjectUpdater;
use branch_version::ui;

fn main() {
    init_tracing();

    let args = Args::parse();
    let annotate = ui::is_github_actions();

    if let Err(e) = run(args, annotate) {
        ui::display_failure(&format!("{:#}", e), annotate);
        std::process::exit(1);
    }
}

/// Console logging controlled by RUST_LOG (default: info), on stderr so
/// stdout only carries the version lines and workflow commands.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args, annotate: bool) -> Result<()> {
    let config = config::load_config(args.config.as_deref())
        .context("Error loading config")?
        .with_overrides(args.overrides());

    let repo = open_repository(&config, &args.repo)?;
    let updater = DotnetProjectUpdater::new(&args.repo);

    let workflow_args = ResolveWorkflowArgs {
        config,
        build: args.build_context(),
        output_file: args.output_file(),
    };

    let result = run_resolve_workflow(workflow_args, repo, &updater)?;

    // Warnings were already logged; the pipeline also wants them as annotations
    if annotate {
        for warning in &result.warnings {
            ui::display_boundary_warning(warning);
        }
    }
    ui::display_outputs(&result.outputs);

    if !result.updated_projects.is_empty() {
        ui::display_success(&format!(
            "Stamped {} into {} project file(s)",
            result.version.informational_version(),
            result.updated_projects.len()
        ));
    }

    Ok(())
}
