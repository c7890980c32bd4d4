//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality:
//! - Concurrent repository discovery
//! - The clone worker pool
//! - Processing context management
//! - Statistics tracking
//! - Configuration utilities
//!
//! Internal implementation details are not exposed through this API.

// Discovery
pub use super::discovery::{spawn_discovery, DiscoveryReport, SkippedDir};

// Clone workers
pub use super::orchestrator::run_clone_workers;

// Core types
pub use super::progress::{create_processing_context, ProcessingContext};
pub use super::stats::RunStatistics;

// Configuration
pub use super::config::{get_clone_concurrency, CLONE_CONCURRENT_CAP, DISCOVERY_CHANNEL_CAPACITY};

// User-facing messages
pub use super::config::NO_REPOS_MESSAGE;

// Terminal utilities (re-exported from utils)
pub use crate::utils::{set_terminal_title, set_terminal_title_and_flush};

// Internal helpers for command modules
pub(crate) use super::progress::acquire_stats_lock;
