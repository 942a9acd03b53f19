//! External checker invocation.

use anyhow::Context;
use camino::Utf8Path;
use declfix_types::report::VerifyResult;
use declfix_types::script::VerifyCommand;
use std::process::Command;
use tracing::debug;

/// Run the configured checker synchronously, blocking, with no timeout, and
/// count output lines containing the error marker. A non-zero exit status is
/// expected when errors remain and is not a fault; a command that cannot be
/// launched at all is.
pub fn run_verify(repo_root: &Utf8Path, cmd: &VerifyCommand) -> anyhow::Result<VerifyResult> {
    let command_display = if cmd.args.is_empty() {
        cmd.command.clone()
    } else {
        format!("{} {}", cmd.command, cmd.args.join(" "))
    };
    debug!(command = %command_display, "running verify command");

    let output = Command::new(&cmd.command)
        .args(&cmd.args)
        .current_dir(repo_root)
        .output()
        .with_context(|| format!("launch verify command {}", command_display))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let error_lines = stdout
        .lines()
        .chain(stderr.lines())
        .filter(|line| line.contains(&cmd.error_marker))
        .count() as u64;

    Ok(VerifyResult {
        command: command_display,
        error_lines,
    })
}
