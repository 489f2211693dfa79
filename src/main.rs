//! tidy-merge - Merge layered clang-tidy configuration files.
//!
//! Main entry point for the CLI.
//!
//! # Overview
//!
//! A repository often carries one baseline `.clang-tidy` at its root plus
//! overlay configs in subdirectories that tighten or relax checks for the
//! code beneath them. clang-tidy itself only reads the nearest config, so
//! build tooling that wants "root plus every overlay on the path" has to
//! produce a single merged file. This binary does that merge:
//!
//! 1. Load the baseline document.
//! 2. Filter the named overlays to those whose directory is an
//!    ancestor-or-equal of `--scope-dir` (when given), ordered shallow→deep.
//! 3. Fold each overlay into the baseline (`Checks` concatenation,
//!    `CheckOptions` last-wins union, deep-merge elsewhere).
//! 4. Write the result to `--out` with deterministic key ordering.
//!
//! The run is single-threaded and run-to-completion; the output file is the
//! only thing written, and only after the whole merge has succeeded.

use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use tidy_merge::{APP_NAME, VERSION, merge_config_files};

#[derive(Parser)]
#[command(name = "tidy-merge")]
#[command(about = "Merge layered clang-tidy configuration files", version)]
struct Cli {
    /// Path to the baseline clang-tidy YAML config
    #[arg(long)]
    baseline: Utf8PathBuf,

    /// Additional YAML config to fold in (repeatable)
    #[arg(long = "config-file")]
    config_file: Vec<Utf8PathBuf>,

    /// Only apply configs whose directory contains this directory,
    /// shallow first
    #[arg(long = "scope-dir")]
    scope_dir: Option<Utf8PathBuf>,

    /// Output path for the merged config; parent directories are created
    #[arg(long)]
    out: Utf8PathBuf,

    /// Enable debug-level logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tidy_merge::logging::setup_logging(cli.verbose)?;
    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    merge_config_files(
        &cli.baseline,
        &cli.config_file,
        cli.scope_dir.as_deref(),
        &cli.out,
    )?;

    Ok(())
}
