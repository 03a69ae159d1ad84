use crate::error::{Result, VersionError};
use crate::git::{QueryOutput, RepositoryQuery};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Repository queries answered by the `git` executable
pub struct GitCommand {
    program: String,
    workdir: PathBuf,
    timeout: Duration,
}

impl GitCommand {
    /// Run `git` inside `workdir`, killing any invocation that outlives `timeout`
    pub fn new<P: AsRef<Path>>(workdir: P, timeout: Duration) -> Self {
        GitCommand {
            program: "git".to_string(),
            workdir: workdir.as_ref().to_path_buf(),
            timeout,
        }
    }

    /// Use a different executable in place of `git`
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn run(&self, args: &[&str]) -> Result<QueryOutput> {
        let rendered = format!("{} {}", self.program, args.join(" "));
        debug!(command = %rendered, workdir = %self.workdir.display(), "running git");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| VersionError::git_command(format!("Failed to run {}: {}", rendered, e)))?;

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        // Dropping the timed-out future drops the child, which kills it
        let output = runtime
            .block_on(async { tokio::time::timeout(self.timeout, command.output()).await })
            .map_err(|_| {
                VersionError::git_command(format!(
                    "{} timed out after {}s",
                    rendered,
                    self.timeout.as_secs_f64()
                ))
            })?
            .map_err(|e| VersionError::git_command(format!("Failed to run {}: {}", rendered, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        let exit_code = output.status.code().unwrap_or(-1);

        debug!(exit_code, stdout = %stdout.trim(), stderr = %stderr.trim(), "git finished");

        Ok(QueryOutput { exit_code, stdout })
    }
}

impl RepositoryQuery for GitCommand {
    fn list_branches_containing_tag(&self, tag: &str) -> Result<QueryOutput> {
        let target = format!("tags/{}", tag);
        self.run(&[
            "branch",
            "-r",
            "--format=%(refname:short)",
            "--contains",
            &target,
        ])
    }

    fn describe_exact_tag_at(&self, rev: &str) -> Result<QueryOutput> {
        self.run(&["describe", "--tags", "--exact-match", rev])
    }
}
