//! tsdoc-readme — stitch TypeDoc API tables into component READMEs.
//!
//! Runs in two phases:
//!
//! 1. **Extract** — walk the reflection JSON and render a markdown fragment
//!    for every public `MDC*` module, grouped by component
//! 2. **Patch** — replace the marker region of `<packages>/<component>/README.md`
//!    with that component's fragments
//!
//! Usage: `tsdoc-readme docs.json -d packages -c mdc-`

mod buffer;
mod extract;
mod logging;
mod markdown;
mod model;
mod patch;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(
    name = "tsdoc-readme",
    about = "Generate README API tables from TypeDoc reflection JSON"
)]
struct Cli {
    /// Reflection JSON produced by TypeDoc. Use - to read from stdin.
    #[arg(default_value = "docs.json")]
    input: String,

    /// Directory containing one sub-directory per component
    #[arg(short = 'd', long, default_value = "./packages")]
    packages_dir: PathBuf,

    /// Only components whose name contains this text are written
    #[arg(short = 'c', long, default_value = "mdc-")]
    component: String,

    /// Print patched READMEs to stdout instead of writing them
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let json = read_input(&cli.input)?;
    let project = model::parse_project(&json)?;

    let buffer = extract::extract(&project);
    if buffer.is_empty() {
        warn!("no documented {}* modules found", extract::MODULE_PREFIX);
        return Ok(());
    }
    debug!(components = buffer.len(), "extraction finished");

    let config = patch::PatchConfig {
        packages_dir: cli.packages_dir,
        component: cli.component,
        dry_run: cli.dry_run,
    };
    for report in patch::flush(&buffer, &config) {
        match report.result {
            Ok(patch::PatchOutcome::DryRun(content)) => {
                println!("==> {} <==", report.path.display());
                println!("{}", content);
            }
            Ok(outcome) => debug!(key = %report.key, ?outcome, "patched"),
            // Already logged by flush; other components are unaffected.
            Err(_) => {}
        }
    }

    Ok(())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut json = String::new();
        io::stdin()
            .read_to_string(&mut json)
            .context("failed to read stdin")?;
        return Ok(json);
    }
    fs::read_to_string(input).with_context(|| format!("failed to read {}", input))
}
