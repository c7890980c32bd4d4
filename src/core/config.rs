//! Configuration constants and settings

// Concurrency Configuration
//
// Clone operations are network/disk-bound, so a moderate worker pool keeps
// the pipe full without thrashing the disk. The channel between discovery
// and the clone workers is bounded; a full channel suspends the walk.

// Default concurrency cap for clone workers
pub const CLONE_CONCURRENT_CAP: usize = 12;

/// Determines the number of concurrent clone workers based on CLI args and
/// system resources
///
/// Priority order:
/// 1. --sequential flag → 1
/// 2. --jobs N flag → N
/// 3. Smart default → min(CPU_CORES + 2, 12)
pub fn get_clone_concurrency(jobs: Option<usize>, sequential: bool) -> usize {
    if sequential {
        return 1;
    }

    if let Some(n) = jobs {
        return n.max(1); // Ensure at least 1
    }

    let cpu_count = num_cpus::get();
    (cpu_count + 2).min(CLONE_CONCURRENT_CAP)
}

// Discovery configuration
pub const DISCOVERY_CHANNEL_CAPACITY: usize = 100;

// Directories never descended into during discovery
pub const SKIP_DIRECTORIES: &[&str] = &[
    "node_modules",
    "vendor",
    "target",
    "build",
    ".next",
    "dist",
    "__pycache__",
    ".venv",
    "venv",
];

// Progress bar configuration
pub const DEFAULT_PROGRESS_BAR_LENGTH: u64 = 100;
pub const PROGRESS_CHARS: &str = "##-";
pub const PROGRESS_TEMPLATE: &str = "{prefix:.bold} {wide_msg}";

// UI Constants
pub const NO_REPOS_MESSAGE: &str = "No matching git repositories found.";
pub const UNKNOWN_REPO_NAME: &str = "unknown";

// Display formatting constants
pub const ERROR_MESSAGE_MAX_LENGTH: usize = 40;
pub const ERROR_MESSAGE_TRUNCATE_LENGTH: usize = 37;
