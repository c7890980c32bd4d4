//! Git command execution and repository mirroring
//!
//! Everything here shells out to the `git` binary through a timeout wrapper;
//! a hung network operation fails the affected repository instead of
//! stalling the whole run.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

use super::status::Status;

// Timeout constants
const GIT_OPERATION_TIMEOUT_SECS: u64 = 180; // 3 minutes per operation

// Git command arguments
const GIT_REMOTE_ARGS: &[&str] = &["remote"];
const GIT_REV_PARSE_HEAD_ARGS: &[&str] = &["rev-parse", "--abbrev-ref", "HEAD"];

// `rev-parse --abbrev-ref HEAD` prints the literal ref name on a detached HEAD
const DETACHED_HEAD_BRANCH: &str = "HEAD";

/// A remote's symbolic name and its configured URL, read from a source
/// repository and reproduced verbatim on the mirrored destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteDescriptor {
    pub name: String,
    pub url: String,
}

/// Runs a git command in the specified directory with a timeout
/// Returns (success, stdout, stderr)
pub async fn run_git(path: &Path, args: &[&str]) -> Result<(bool, String, String)> {
    let timeout_duration = Duration::from_secs(GIT_OPERATION_TIMEOUT_SECS);

    let result = tokio::time::timeout(
        timeout_duration,
        Command::new("git").args(args).current_dir(path).output(),
    )
    .await;

    match result {
        Ok(Ok(output)) => Ok((
            output.status.success(),
            String::from_utf8_lossy(&output.stdout).trim().to_string(),
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        )),
        Ok(Err(e)) => Err(e.into()),
        Err(_) => Err(anyhow::anyhow!(
            "Git operation timed out after {} seconds",
            GIT_OPERATION_TIMEOUT_SECS
        )),
    }
}

/// Resolves the branch a repository's HEAD currently points to.
///
/// Returns `Ok(None)` for a detached HEAD. An unborn HEAD (no commits yet)
/// surfaces as an error since there is nothing clonable to point a
/// single-branch clone at.
pub async fn current_branch(repo: &Path) -> Result<Option<String>> {
    match run_git(repo, GIT_REV_PARSE_HEAD_ARGS).await? {
        (true, branch, _) if branch == DETACHED_HEAD_BRANCH => Ok(None),
        (true, branch, _) => Ok(Some(branch)),
        (false, _, err) => Err(anyhow::anyhow!("no resolvable HEAD: {}", err)),
    }
}

/// Lists the remotes configured on a repository, with their fetch URLs.
pub async fn list_remotes(repo: &Path) -> Result<Vec<RemoteDescriptor>> {
    let (success, stdout, stderr) = run_git(repo, GIT_REMOTE_ARGS).await?;
    if !success {
        anyhow::bail!("failed to list remotes: {}", stderr);
    }

    let mut remotes = Vec::new();
    for name in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let (success, url, stderr) = run_git(repo, &["remote", "get-url", name]).await?;
        if !success {
            anyhow::bail!("failed to read URL of remote '{}': {}", name, stderr);
        }
        remotes.push(RemoteDescriptor {
            name: name.to_string(),
            url,
        });
    }
    Ok(remotes)
}

/// Removes a remote from a repository.
pub async fn remove_remote(repo: &Path, name: &str) -> Result<()> {
    let (success, _, stderr) = run_git(repo, &["remote", "remove", name]).await?;
    if !success {
        anyhow::bail!("failed to remove remote '{}': {}", name, stderr);
    }
    Ok(())
}

/// Adds a remote to a repository.
pub async fn add_remote(repo: &Path, remote: &RemoteDescriptor) -> Result<()> {
    let (success, _, stderr) =
        run_git(repo, &["remote", "add", &remote.name, &remote.url]).await?;
    if !success {
        anyhow::bail!("failed to add remote '{}': {}", remote.name, stderr);
    }
    Ok(())
}

/// Clones a single branch of `source` into `destination`.
async fn clone_single_branch(source: &Path, destination: &Path, branch: &str) -> Result<()> {
    let source_str = source.to_string_lossy().into_owned();
    let dest_str = destination.to_string_lossy().into_owned();
    // The staging root always exists by the time jobs run, so it serves as
    // the working directory for the clone invocation.
    let cwd = destination
        .parent()
        .ok_or_else(|| anyhow::anyhow!("destination has no parent directory"))?;

    let (success, _, stderr) = run_git(
        cwd,
        &[
            "clone",
            "--quiet",
            "--single-branch",
            "--branch",
            branch,
            source_str.as_str(),
            dest_str.as_str(),
        ],
    )
    .await?;
    if !success {
        anyhow::bail!("clone failed: {}", stderr);
    }
    Ok(())
}

/// Replaces the destination's remote set with the source's.
///
/// The clone step auto-configures a remote pointing at the local source
/// path; the shipped repository must instead carry the source's remotes,
/// by name and URL, exactly.
async fn rewrite_remotes(source: &Path, destination: &Path) -> Result<()> {
    for remote in list_remotes(destination).await? {
        remove_remote(destination, &remote.name).await?;
    }
    for remote in list_remotes(source).await? {
        add_remote(destination, &remote).await?;
    }
    Ok(())
}

/// Mirrors one source repository into `staging_root/<basename>`.
///
/// Clones the source's current branch only, then rewrites the clone's
/// remotes to match the source's. Returns (status, message, destination);
/// the destination is `None` unless a clone was produced.
pub async fn mirror_repo(source: &Path, staging_root: &Path) -> (Status, String, Option<PathBuf>) {
    let name = match source.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => {
            return (
                Status::Error,
                "source path has no directory name".to_string(),
                None,
            )
        }
    };

    let branch = match current_branch(source).await {
        Ok(Some(branch)) => branch,
        Ok(None) => return (Status::Skip, "detached HEAD".to_string(), None),
        Err(e) => return (Status::Error, e.to_string(), None),
    };

    let destination = staging_root.join(name);
    if let Err(e) = clone_single_branch(source, &destination, &branch).await {
        return (Status::Error, e.to_string(), None);
    }

    if let Err(e) = rewrite_remotes(source, &destination).await {
        return (Status::Error, e.to_string(), Some(destination));
    }

    (Status::Cloned, branch, Some(destination))
}
