//! Progress bar management and processing context structures

use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::config::{DEFAULT_PROGRESS_BAR_LENGTH, PROGRESS_CHARS, PROGRESS_TEMPLATE};
use super::stats::RunStatistics;

/// Processing context that encapsulates all shared state needed by the
/// clone workers
///
/// Repositories are not known up front — they arrive over the discovery
/// channel — so unlike a fixed work list this context carries no repository
/// vector, only the destination, the shared statistics, and the concurrency
/// gate.
pub struct ProcessingContext {
    /// Root of the staging directory clone jobs write into
    pub staging_root: PathBuf,
    /// Multi-progress instance for managing multiple concurrent progress bars
    pub multi_progress: MultiProgress,
    /// Styled progress bar configuration
    pub progress_style: ProgressStyle,
    /// Thread-safe statistics tracking for operation results
    pub statistics: Arc<Mutex<RunStatistics>>,
    /// Semaphore for controlling concurrent clone operations
    pub semaphore: Arc<tokio::sync::Semaphore>,
    /// Maximum configured concurrency level
    pub max_concurrency: usize,
    /// Start time for duration calculations
    pub start_time: std::time::Instant,
}

/// Creates a ProcessingContext for a run
pub fn create_processing_context(
    staging_root: PathBuf,
    start_time: std::time::Instant,
    concurrent_limit: usize,
) -> Result<ProcessingContext> {
    let multi_progress = MultiProgress::new();
    let progress_style = create_progress_style()?;
    let statistics = Arc::new(Mutex::new(RunStatistics::new()));
    let semaphore = Arc::new(tokio::sync::Semaphore::new(concurrent_limit));

    Ok(ProcessingContext {
        staging_root,
        multi_progress,
        progress_style,
        statistics,
        semaphore,
        max_concurrency: concurrent_limit,
        start_time,
    })
}

/// Creates and configures a progress bar for a repository
/// Returns a configured ProgressBar with the specified repository name
pub(crate) fn create_progress_bar(
    multi: &MultiProgress,
    style: &ProgressStyle,
    repo_name: &str,
) -> ProgressBar {
    let pb = multi.add(ProgressBar::new(DEFAULT_PROGRESS_BAR_LENGTH));
    pb.set_style(style.clone());
    pb.set_prefix(format!("🟡 {}", repo_name));
    pb.set_message("cloning...");
    pb
}

/// Creates a progress bar style configuration
pub(crate) fn create_progress_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_bar()
        .template(PROGRESS_TEMPLATE)?
        .progress_chars(PROGRESS_CHARS))
}

/// Creates a footer progress bar for displaying summary information
pub(crate) fn create_footer_progress_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let footer_pb = multi_progress.add(ProgressBar::new(0));
    let footer_style = ProgressStyle::default_bar()
        .template("{wide_msg}")
        .expect("Failed to create footer progress style");
    footer_pb.set_style(footer_style);
    footer_pb
}

/// Helper function to safely acquire the statistics lock
pub(crate) fn acquire_stats_lock(
    stats: &'_ Arc<Mutex<RunStatistics>>,
) -> std::sync::MutexGuard<'_, RunStatistics> {
    stats.lock().expect("Failed to acquire statistics lock")
}

/// Acquires an owned permit so a spawned clone task can carry it
pub(crate) async fn acquire_owned_permit(
    semaphore: Arc<tokio::sync::Semaphore>,
) -> tokio::sync::OwnedSemaphorePermit {
    semaphore
        .acquire_owned()
        .await
        .expect("Failed to acquire semaphore permit for clone worker")
}
