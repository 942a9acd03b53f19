mod config;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use config::load_config;
use declfix_core::{run_script, RunError, RunSettings};
use declfix_render::{render_op_line, render_summary_box};
use declfix_types::report::ToolInfo;
use declfix_types::script::PatchScript;
use fs_err as fs;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Fallback script path when neither the CLI nor declfix.toml names one.
const DEFAULT_SCRIPT: &str = "fixes.json";

#[derive(Debug, Parser)]
#[command(
    name = "declfix",
    version,
    about = "Idempotent, block-scoped patcher for declaration blocks in text sources."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a patch script against a repository.
    Run(RunArgs),
}

#[derive(Debug, Parser)]
struct RunArgs {
    /// Patch script (JSON). Default: `script` from declfix.toml, then fixes.json.
    #[arg(long)]
    script: Option<Utf8PathBuf>,

    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Decide every operation and print the patch without writing anything.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Skip the script's verify command.
    #[arg(long, default_value_t = false)]
    no_verify: bool,

    /// Write the run report as JSON to this path.
    #[arg(long)]
    report: Option<Utf8PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Run(args) => cmd_run(args),
    };

    match result {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn cmd_run(args: RunArgs) -> Result<(), RunError> {
    let config = load_config(&args.repo_root)?;

    let script_path = args
        .script
        .or_else(|| config.script.map(|p| args.repo_root.join(p)))
        .unwrap_or_else(|| args.repo_root.join(DEFAULT_SCRIPT));
    debug!(script = %script_path, "loading patch script");

    let contents = fs::read_to_string(&script_path)
        .with_context(|| format!("read script {}", script_path))?;
    let script: PatchScript = serde_json::from_str(&contents)
        .with_context(|| format!("parse script {}", script_path))?;

    let settings = RunSettings {
        repo_root: args.repo_root,
        dry_run: args.dry_run,
        run_verify: config.verify.enabled && !args.no_verify,
    };
    let tool = ToolInfo {
        name: "declfix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    };

    let outcome = run_script(&settings, &script, tool)?;

    for result in &outcome.report.results {
        println!("{}", render_op_line(result));
    }
    println!();
    print!("{}", render_summary_box(&outcome.report));

    if settings.dry_run && !outcome.patch.is_empty() {
        println!();
        print!("{}", outcome.patch);
    }

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&outcome.report)
            .context("serialize run report")?;
        fs::write(path, json).with_context(|| format!("write report {}", path))?;
    }

    // Per policy the exit status reflects only structural/runtime faults,
    // never the per-operation failure count.
    Ok(())
}
