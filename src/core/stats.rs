//! Run statistics tracking and summary rendering

use std::time::Duration;

use super::config::{ERROR_MESSAGE_MAX_LENGTH, ERROR_MESSAGE_TRUNCATE_LENGTH};
use crate::git::Status;

/// Statistics for tracking the results of one packaging run
#[derive(Clone, Default)]
pub struct RunStatistics {
    pub cloned_repos: u32,
    pub skipped_repos: u32,
    pub error_repos: u32,
    failed_repos: Vec<(String, String, String)>, // (repo_name, repo_path, error_message)
    skipped_repo_list: Vec<(String, String, String)>, // (repo_name, repo_path, reason)
    skipped_dirs: Vec<(String, String)>,         // (dir_path, reason)
}

impl RunStatistics {
    /// Creates a new statistics tracker with all counters initialized to zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on one repository's mirror result
    pub fn update(&mut self, repo_name: &str, repo_path: &str, status: &Status, message: &str) {
        match status {
            Status::Cloned => self.cloned_repos += 1,
            Status::Skip => {
                self.skipped_repos += 1;
                self.skipped_repo_list.push((
                    repo_name.to_string(),
                    repo_path.to_string(),
                    message.to_string(),
                ));
            }
            Status::Error => {
                self.error_repos += 1;
                self.failed_repos.push((
                    repo_name.to_string(),
                    repo_path.to_string(),
                    message.to_string(),
                ));
            }
        }
    }

    /// Records a directory subtree the discovery walk could not read
    pub fn record_skipped_dir(&mut self, dir_path: &str, reason: &str) {
        self.skipped_dirs
            .push((dir_path.to_string(), reason.to_string()));
    }

    /// True when at least one repository failed or a subtree was unreadable
    pub fn has_problems(&self) -> bool {
        !self.failed_repos.is_empty() || !self.skipped_dirs.is_empty()
    }

    /// Generates the one-line summary of the run
    pub fn generate_summary(&self, duration: Duration) -> String {
        let duration_secs = duration.as_secs_f64();

        if self.error_repos > 0 {
            format!(
                "✅ Completed in {:.1}s • {} cloned • {} skipped • {} failed",
                duration_secs, self.cloned_repos, self.skipped_repos, self.error_repos
            )
        } else if self.skipped_repos > 0 {
            format!(
                "✅ Completed in {:.1}s • {} cloned • {} skipped",
                duration_secs, self.cloned_repos, self.skipped_repos
            )
        } else {
            format!(
                "✅ Completed in {:.1}s • {} cloned",
                duration_secs, self.cloned_repos
            )
        }
    }

    /// Generates detailed warning messages for repositories and directories
    /// needing attention
    pub fn generate_detailed_summary(&self) -> String {
        let mut lines = Vec::new();

        // Failed repos get priority
        if !self.failed_repos.is_empty() {
            lines.push(format!("🔴 FAILED REPOS ({})", self.failed_repos.len()));
            for (i, (repo_name, repo_path, error)) in self.failed_repos.iter().enumerate() {
                let tree_char = if i == self.failed_repos.len() - 1 {
                    "└─"
                } else {
                    "├─"
                };
                lines.push(format!(
                    "   {} {:20} {:30} # {}",
                    tree_char, repo_name, repo_path, error
                ));
            }
            lines.push(String::new());
        }

        if !self.skipped_repo_list.is_empty() {
            lines.push(format!(
                "🟠 SKIPPED REPOS ({})",
                self.skipped_repo_list.len()
            ));
            for (i, (repo_name, repo_path, reason)) in self.skipped_repo_list.iter().enumerate() {
                let tree_char = if i == self.skipped_repo_list.len() - 1 {
                    "└─"
                } else {
                    "├─"
                };
                lines.push(format!(
                    "   {} {:20} {:30} # {}",
                    tree_char, repo_name, repo_path, reason
                ));
            }
            lines.push(String::new());
        }

        if !self.skipped_dirs.is_empty() {
            lines.push(format!(
                "🟡 UNREADABLE DIRECTORIES ({})",
                self.skipped_dirs.len()
            ));
            for (i, (dir_path, reason)) in self.skipped_dirs.iter().enumerate() {
                let tree_char = if i == self.skipped_dirs.len() - 1 {
                    "└─"
                } else {
                    "├─"
                };
                lines.push(format!("   {} {:30} # {}", tree_char, dir_path, reason));
            }
        }

        // Remove trailing blank line if it exists
        if lines.last() == Some(&String::new()) {
            lines.pop();
        }

        lines.join("\n")
    }
}

/// Cleans and formats error messages for display
pub(crate) fn clean_error_message(error: &str) -> String {
    // Replace newlines/tabs with spaces and collapse whitespace
    let cleaned = error.replace('\n', " ").replace('\r', "").replace('\t', " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    // Extract key error patterns
    if cleaned.contains("timed out") {
        "timeout (180s)".to_string()
    } else if cleaned.contains("authentication") || cleaned.contains("Permission denied") {
        "authentication failed".to_string()
    } else if cleaned.contains("Connection") || cleaned.contains("network") {
        "network error".to_string()
    } else if cleaned.contains("already exists and is not an empty directory") {
        "destination already exists".to_string()
    } else if cleaned.len() > ERROR_MESSAGE_MAX_LENGTH {
        format!("{}...", &cleaned[..ERROR_MESSAGE_TRUNCATE_LENGTH])
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_counts_by_status() {
        let mut stats = RunStatistics::new();
        stats.update("a", "/r/a", &Status::Cloned, "main");
        stats.update("b", "/r/b", &Status::Skip, "detached HEAD");
        stats.update("c", "/r/c", &Status::Error, "clone failed");

        assert_eq!(stats.cloned_repos, 1);
        assert_eq!(stats.skipped_repos, 1);
        assert_eq!(stats.error_repos, 1);
        assert!(stats.has_problems());
    }

    #[test]
    fn test_summary_omits_empty_categories() {
        let mut stats = RunStatistics::new();
        stats.update("a", "/r/a", &Status::Cloned, "main");

        let summary = stats.generate_summary(Duration::from_secs(2));
        assert!(summary.contains("1 cloned"));
        assert!(!summary.contains("skipped"));
        assert!(!summary.contains("failed"));
    }

    #[test]
    fn test_detailed_summary_lists_failures_and_skips() {
        let mut stats = RunStatistics::new();
        stats.update("bad", "/r/bad", &Status::Error, "clone failed");
        stats.record_skipped_dir("/r/locked", "permission denied");

        let detail = stats.generate_detailed_summary();
        assert!(detail.contains("FAILED REPOS (1)"));
        assert!(detail.contains("bad"));
        assert!(detail.contains("UNREADABLE DIRECTORIES (1)"));
        assert!(detail.contains("/r/locked"));
    }

    #[test]
    fn test_detailed_summary_empty_when_clean() {
        let mut stats = RunStatistics::new();
        stats.update("a", "/r/a", &Status::Cloned, "main");
        assert!(stats.generate_detailed_summary().is_empty());
    }

    #[test]
    fn test_clean_error_message_patterns() {
        assert_eq!(
            clean_error_message("Git operation timed out after 180 seconds"),
            "timeout (180s)"
        );
        assert_eq!(
            clean_error_message("fatal: authentication required"),
            "authentication failed"
        );
        assert_eq!(clean_error_message("Connection refused"), "network error");
    }

    #[test]
    fn test_clean_error_message_truncates_long_text() {
        let long = "x".repeat(100);
        let cleaned = clean_error_message(&long);
        assert!(cleaned.ends_with("..."));
        assert_eq!(cleaned.len(), ERROR_MESSAGE_TRUNCATE_LENGTH + 3);
    }

    #[test]
    fn test_clean_error_message_collapses_whitespace() {
        assert_eq!(
            clean_error_message("fatal:\n\tsomething   odd"),
            "fatal: something odd"
        );
    }
}
