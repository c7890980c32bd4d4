//! # repopack
//!
//! `repopack` discovers git repositories whose directory names match a
//! pattern, clones each one's current branch into a fresh staging
//! directory, and packages the staging tree into a single `.zip` archive
//! for transport. It powers the `repopack` CLI tool.
//!
//! ## Core Features
//!
//! - **Concurrent Discovery**: an async task-tree walk emits repository
//!   roots over a bounded channel while cloning is already underway.
//! - **Faithful Clones**: single-branch clones of each repository's current
//!   branch, with the source's remote set reproduced exactly.
//! - **Portable Output**: one timestamped archive containing every clone
//!   plus any auxiliary files.
//!
//! ## Example
//!
//! ```rust,no_run
//! use repopack::commands::pack::{run_pack, PackOptions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let outcome = run_pack(PackOptions {
//!         pattern: String::from("-sync$"),
//!         root: None,
//!         aux_files: Vec::new(),
//!         jobs: None,
//!         sequential: false,
//!     })
//!     .await?;
//!     if let Some(path) = outcome.archive_path {
//!         println!("{}", path.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod git;
pub mod staging;
pub mod utils;
