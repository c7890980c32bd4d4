//! The pack command: discover, clone, stage, archive
//!
//! Wires the discovery walk to the clone worker pool over the bounded
//! channel, then hands the drained staging tree to the packager. The walk
//! and the workers run concurrently; archiving starts only after both sides
//! have fully drained.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::{
    acquire_stats_lock, create_processing_context, get_clone_concurrency, run_clone_workers,
    set_terminal_title, set_terminal_title_and_flush, spawn_discovery, RunStatistics,
    NO_REPOS_MESSAGE,
};
use crate::staging::{copy_aux_files, create_archive, RunContext};

const SCANNING_MESSAGE: &str = "🔍 Scanning for matching git repositories...";

/// Options for one packaging run
pub struct PackOptions {
    /// Regular expression matched against repository directory names
    pub pattern: String,
    /// Directory to scan; current directory when absent
    pub root: Option<PathBuf>,
    /// Files copied into the staging root before archiving
    pub aux_files: Vec<PathBuf>,
    /// Explicit clone-worker count
    pub jobs: Option<usize>,
    /// Clone repositories one at a time
    pub sequential: bool,
}

/// Outcome of a completed run
pub struct PackOutcome {
    /// Absolute path of the produced archive; `None` when nothing was staged
    pub archive_path: Option<PathBuf>,
    pub statistics: RunStatistics,
    pub duration: Duration,
}

/// Runs one packaging pass and returns the outcome.
///
/// The staging directory lives exactly as long as this call: it is created
/// before discovery starts and removed on every exit path once the archive
/// (if any) has been written.
pub async fn run_pack(options: PackOptions) -> Result<PackOutcome> {
    let pattern = Regex::new(&options.pattern)
        .with_context(|| format!("invalid name pattern '{}'", options.pattern))?;
    let root = match options.root {
        Some(root) => root,
        None => std::env::current_dir().context("failed to resolve current directory")?,
    };

    let run = RunContext::create()?;
    let start_time = std::time::Instant::now();
    let concurrency = get_clone_concurrency(options.jobs, options.sequential);
    let context =
        create_processing_context(run.staging_path().to_path_buf(), start_time, concurrency)?;

    let (rx, walk_handle) = spawn_discovery(root, pattern);
    run_clone_workers(rx, &context).await;
    let report = walk_handle.await.context("discovery walk panicked")?;

    {
        let mut stats_guard = acquire_stats_lock(&context.statistics);
        for skipped in &report.skipped {
            stats_guard.record_skipped_dir(&skipped.path.to_string_lossy(), &skipped.reason);
        }
    }
    let statistics = acquire_stats_lock(&context.statistics).clone();

    let total_repos = statistics.cloned_repos + statistics.skipped_repos + statistics.error_repos;
    if total_repos == 0 && options.aux_files.is_empty() {
        return Ok(PackOutcome {
            archive_path: None,
            statistics,
            duration: start_time.elapsed(),
        });
    }

    copy_aux_files(run.staging_path(), &options.aux_files)?;

    let staging_root = run.staging_path().to_path_buf();
    let stem = run.archive_stem().to_string();
    let archive_path = tokio::task::spawn_blocking(move || create_archive(&staging_root, &stem))
        .await
        .context("archive task panicked")??;

    Ok(PackOutcome {
        archive_path: Some(archive_path),
        statistics,
        duration: start_time.elapsed(),
    })
}

/// Handles the pack command for the CLI: progress output, final summary,
/// and the archive path on stdout
pub async fn handle_pack_command(options: PackOptions) -> Result<()> {
    set_terminal_title("🚀 repopack");
    eprintln!("{}", SCANNING_MESSAGE);

    let outcome = match run_pack(options).await {
        Ok(outcome) => outcome,
        Err(e) => {
            set_terminal_title_and_flush("✅ repopack");
            return Err(e);
        }
    };

    eprintln!("\n{}", outcome.statistics.generate_summary(outcome.duration));

    // Print the final detailed breakdown if there are any issues to report
    let detailed_summary = outcome.statistics.generate_detailed_summary();
    if !detailed_summary.is_empty() {
        eprintln!("\n{}", "━".repeat(70));
        eprintln!("{}", detailed_summary);
        eprintln!("{}", "━".repeat(70));
    }
    eprintln!();

    match outcome.archive_path {
        Some(path) => println!("{}", path.display()),
        None => eprintln!("{}", NO_REPOS_MESSAGE),
    }

    set_terminal_title_and_flush("✅ repopack");
    Ok(())
}
