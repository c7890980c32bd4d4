//! Repository probe
//!
//! Answers a single question: is this directory the root of a git working
//! copy? The check is purely filesystem-based so it can run inside the
//! discovery walk without spawning a process per candidate directory.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Check if a .git file (for submodules/worktrees) contains a gitdir reference
/// Only reads the first 5 lines for efficiency
fn is_gitdir_file(path: &Path) -> bool {
    match fs::File::open(path) {
        Ok(file) => {
            let reader = BufReader::new(file);
            reader
                .lines()
                .take(5)
                .filter_map(Result::ok)
                .any(|line| line.trim_start().starts_with("gitdir:"))
        }
        Err(_) => false,
    }
}

/// Returns true if `path` is the root of a git working copy.
///
/// A directory qualifies when it contains a `.git` directory, or a `.git`
/// file pointing at an external git dir (submodule/worktree layout).
/// Nonexistent paths, plain files, and ordinary directories return false;
/// the false path is the expected answer, not an error.
pub fn is_git_repository(path: &Path) -> bool {
    let git_entry = path.join(".git");
    match fs::metadata(&git_entry) {
        Ok(meta) if meta.is_dir() => true,
        Ok(meta) if meta.is_file() => is_gitdir_file(&git_entry),
        _ => false,
    }
}
