//! Test fixtures and builders

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::git::{add_git_remote, create_test_commit, setup_git_repo};

/// Builder for creating git repositories inside an existing directory tree
pub struct TestRepoBuilder {
    name: String,
    commits: Vec<(String, String, String)>, // (file, content, message)
    remotes: Vec<(String, String)>,         // (name, url)
}

impl TestRepoBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            commits: Vec::new(),
            remotes: Vec::new(),
        }
    }

    /// Adds a file + commit to the repository
    pub fn with_commit(mut self, file: &str, content: &str, message: &str) -> Self {
        self.commits
            .push((file.to_string(), content.to_string(), message.to_string()));
        self
    }

    /// Adds a remote to the repository
    pub fn with_remote(mut self, name: &str, url: &str) -> Self {
        self.remotes.push((name.to_string(), url.to_string()));
        self
    }

    /// Creates the repository under `parent` and returns its path.
    /// A repository with no explicit commits gets one initial commit so its
    /// HEAD is born.
    pub fn build_in(self, parent: &Path) -> Result<PathBuf> {
        let repo_path = parent.join(&self.name);
        std::fs::create_dir_all(&repo_path)?;
        setup_git_repo(&repo_path)?;

        if self.commits.is_empty() {
            create_test_commit(&repo_path, "README.md", "# test repo", "Initial commit")?;
        } else {
            for (file, content, message) in &self.commits {
                create_test_commit(&repo_path, file, content, message)?;
            }
        }

        for (name, url) in &self.remotes {
            add_git_remote(&repo_path, name, url)?;
        }

        Ok(repo_path)
    }
}
