//! Clone worker pool
//!
//! Drains the discovery channel and mirrors each repository into the
//! staging root. Jobs run as spawned tasks gated by the context's
//! semaphore: a permit is acquired before each job is spawned, so a
//! saturated pool stops draining the channel and backpressure propagates
//! to the walk through the bounded channel. Each job is consumed by exactly
//! one worker; a failed job is recorded and the rest continue.

use futures::stream::{FuturesUnordered, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::config::UNKNOWN_REPO_NAME;
use super::progress::{
    acquire_owned_permit, acquire_stats_lock, create_footer_progress_bar, create_progress_bar,
    ProcessingContext,
};
use super::stats::clean_error_message;
use crate::git::{mirror_repo, Status};

/// Consumes clone jobs until the discovery channel closes, then waits for
/// every in-flight clone to finish. Results land in the context's
/// statistics.
pub async fn run_clone_workers(mut rx: mpsc::Receiver<PathBuf>, context: &ProcessingContext) {
    let footer_pb = create_footer_progress_bar(&context.multi_progress);
    {
        let stats_guard = acquire_stats_lock(&context.statistics);
        footer_pb.set_message(stats_guard.generate_summary(context.start_time.elapsed()));
    }

    let mut workers = FuturesUnordered::new();

    while let Some(repo_path) = rx.recv().await {
        let repo_name = repo_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(UNKNOWN_REPO_NAME)
            .to_string();
        let progress_bar =
            create_progress_bar(&context.multi_progress, &context.progress_style, &repo_name);

        let permit = acquire_owned_permit(Arc::clone(&context.semaphore)).await;

        let stats_clone = Arc::clone(&context.statistics);
        let footer_clone = footer_pb.clone();
        let staging_root = context.staging_root.clone();
        let start_time = context.start_time;

        workers.push(tokio::spawn(async move {
            let _permit = permit;

            let (status, message, _destination) = mirror_repo(&repo_path, &staging_root).await;
            let display_message = match status {
                Status::Error => clean_error_message(&message),
                _ => message.clone(),
            };

            progress_bar.set_prefix(format!("{} {}", status.symbol(), repo_name));
            progress_bar.set_message(format!("{:<10}   {}", status.text(), display_message));
            progress_bar.finish();

            // Update statistics based on operation result
            let mut stats_guard = acquire_stats_lock(&stats_clone);
            let repo_path_str = repo_path.to_string_lossy();
            stats_guard.update(&repo_name, &repo_path_str, &status, &display_message);

            // Refresh the footer summary after each repository completes
            let summary = stats_guard.generate_summary(start_time.elapsed());
            drop(stats_guard);
            footer_clone.set_message(summary);
        }));
    }

    // Channel closed: the tree is exhausted. Wait for in-flight clones.
    while workers.next().await.is_some() {}

    footer_pb.finish();
}
