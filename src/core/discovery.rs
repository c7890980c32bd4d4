//! Concurrent repository discovery
//!
//! The directory tree is walked by a tree of tokio tasks: one task per
//! directory that gets recursed into. Matching repository roots are emitted
//! onto a bounded channel while the walk is still running; a full channel
//! suspends the scanning tasks until the clone workers catch up.
//!
//! Completion protocol: every recursive descent increments `PendingScans`
//! before its task is spawned and decrements it when that subtree (including
//! all of its own descendants) has been scanned. A supervisor task waits for
//! the counter to drain to zero and only then releases the last sender, so
//! the channel closes exactly when the whole tree has been visited. A
//! consumer reading until channel-closed therefore observes every discovered
//! repository exactly once.

use regex::Regex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;

use super::config::{DISCOVERY_CHANNEL_CAPACITY, SKIP_DIRECTORIES};
use crate::git::is_git_repository;

/// A directory subtree the walk could not read, with the reason
#[derive(Clone, Debug)]
pub struct SkippedDir {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a finished discovery walk
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    pub skipped: Vec<SkippedDir>,
}

/// Counts outstanding scan tasks
///
/// `wait_idle` resolves once every spawned subtree scan has completed. The
/// counter must be incremented before the corresponding task is spawned;
/// a parent's own count is held while it enters children, so the counter
/// cannot transiently read zero while work remains.
struct PendingScans {
    active: AtomicUsize,
    idle: Notify,
}

impl PendingScans {
    fn new() -> Self {
        Self {
            active: AtomicUsize::new(0),
            idle: Notify::new(),
        }
    }

    fn enter(&self) {
        self.active.fetch_add(1, Ordering::SeqCst);
    }

    fn exit(&self) {
        if self.active.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.idle.notify_waiters();
        }
    }

    async fn wait_idle(&self) {
        loop {
            // Register interest before reading the counter so a notification
            // between the load and the await is not lost
            let notified = self.idle.notified();
            if self.active.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Shared state of one discovery walk
struct WalkContext {
    pattern: Regex,
    tx: mpsc::Sender<PathBuf>,
    pending: PendingScans,
    skipped: Mutex<Vec<SkippedDir>>,
}

impl WalkContext {
    fn record_skip(&self, path: PathBuf, reason: String) {
        self.skipped
            .lock()
            .expect("Failed to acquire skipped-directory lock")
            .push(SkippedDir { path, reason });
    }
}

/// Starts a discovery walk rooted at `root`.
///
/// Returns the receiving end of the repository channel together with a
/// handle resolving to the walk's [`DiscoveryReport`] once the tree has been
/// exhausted. The channel yields each matching repository path exactly once
/// and closes only after the entire tree has been visited.
pub fn spawn_discovery(
    root: PathBuf,
    pattern: Regex,
) -> (mpsc::Receiver<PathBuf>, JoinHandle<DiscoveryReport>) {
    let (tx, rx) = mpsc::channel(DISCOVERY_CHANNEL_CAPACITY);
    let ctx = Arc::new(WalkContext {
        pattern,
        tx,
        pending: PendingScans::new(),
        skipped: Mutex::new(Vec::new()),
    });

    ctx.pending.enter();
    spawn_scan(root, Arc::clone(&ctx));

    let supervisor = tokio::spawn(async move {
        ctx.pending.wait_idle().await;
        let skipped = std::mem::take(
            &mut *ctx
                .skipped
                .lock()
                .expect("Failed to acquire skipped-directory lock"),
        );
        // ctx drops here, releasing the last sender and closing the channel
        DiscoveryReport { skipped }
    });

    (rx, supervisor)
}

fn spawn_scan(dir: PathBuf, ctx: Arc<WalkContext>) {
    tokio::spawn(scan_dir(dir, ctx));
}

/// Scans one directory level: matching repositories are emitted and not
/// descended into; everything else spawns a child scan task.
async fn scan_dir(dir: PathBuf, ctx: Arc<WalkContext>) {
    let mut entries = match tokio::fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) => {
            ctx.record_skip(dir, e.to_string());
            ctx.pending.exit();
            return;
        }
    };

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                ctx.record_skip(dir.clone(), e.to_string());
                break;
            }
        };

        let is_dir = entry
            .file_type()
            .await
            .map(|ft| ft.is_dir())
            .unwrap_or(false);
        if !is_dir {
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || SKIP_DIRECTORIES.contains(&name.as_ref()) {
            continue;
        }

        let path = entry.path();
        if ctx.pattern.is_match(&name) && is_git_repository(&path) {
            // Match wins over recursion: the subtree below a discovered
            // repository is never walked, so nested matches stay invisible
            if ctx.tx.send(path).await.is_err() {
                // Consumer hung up; finishing the walk serves nobody
                break;
            }
        } else {
            ctx.pending.enter();
            spawn_scan(path, Arc::clone(&ctx));
        }
    }

    ctx.pending.exit();
}
