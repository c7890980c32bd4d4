//! Staging directory lifecycle and archive output
//!
//! One run owns one uniquely named staging directory in the system temp
//! location. Clone jobs write disjoint subdirectories into it, auxiliary
//! files land at its root, and the whole tree is packaged into a single
//! `.zip` once every job has finished. The directory itself is removed when
//! the [`RunContext`] drops, archived or not.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Owns the per-run staging directory and the archive naming derived from it
pub struct RunContext {
    staging: TempDir,
    archive_stem: String,
}

impl RunContext {
    /// Creates the timestamped staging directory for a run.
    ///
    /// The directory name is `SYNC_<timestamp>_` plus an OS-randomized
    /// suffix for collision avoidance; the archive stem reuses the full
    /// unique name so two runs in the same second cannot clobber each
    /// other's output.
    pub fn create() -> Result<Self> {
        let prefix = format!("SYNC_{}_", Local::now().format("%Y%m%d%H%M%S"));
        let staging = tempfile::Builder::new()
            .prefix(&prefix)
            .tempdir()
            .context("failed to create staging directory")?;
        let archive_stem = staging
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .context("staging directory has no name")?;
        Ok(Self {
            staging,
            archive_stem,
        })
    }

    /// Root directory clone jobs and auxiliary files are written into
    pub fn staging_path(&self) -> &Path {
        self.staging.path()
    }

    /// Base name (without extension) of the archive this run produces
    pub fn archive_stem(&self) -> &str {
        &self.archive_stem
    }
}

/// Copies auxiliary files into the staging root, keeping their base names.
/// `std::fs::copy` carries the permission bits along with the contents.
pub fn copy_aux_files(staging_root: &Path, files: &[PathBuf]) -> Result<()> {
    for file in files {
        let name = file
            .file_name()
            .with_context(|| format!("auxiliary path has no file name: {}", file.display()))?;
        std::fs::copy(file, staging_root.join(name))
            .with_context(|| format!("failed to copy auxiliary file {}", file.display()))?;
    }
    Ok(())
}

/// Writes every file under the staging root into `<system temp>/<stem>.zip`,
/// preserving relative paths, empty directories, and unix permission bits.
/// Returns the absolute archive path.
pub fn create_archive(staging_root: &Path, archive_stem: &str) -> Result<PathBuf> {
    let archive_path = std::env::temp_dir().join(format!("{}.zip", archive_stem));
    let file = File::create(&archive_path)
        .with_context(|| format!("failed to create archive {}", archive_path.display()))?;
    let mut writer = ZipWriter::new(file);

    for entry in WalkDir::new(staging_root) {
        let entry = entry.context("failed to walk staging directory")?;
        let rel = entry
            .path()
            .strip_prefix(staging_root)
            .context("staging entry outside staging root")?;
        if rel.as_os_str().is_empty() {
            continue;
        }
        let name = rel.to_string_lossy().replace('\\', "/");

        #[allow(unused_mut)]
        let mut options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            options = options.unix_permissions(entry.metadata()?.permissions().mode());
        }

        if entry.file_type().is_dir() {
            writer.add_directory(name, options)?;
        } else {
            writer.start_file(name, options)?;
            let mut f = File::open(entry.path())
                .with_context(|| format!("failed to read {}", entry.path().display()))?;
            io::copy(&mut f, &mut writer)?;
        }
    }

    writer
        .finish()
        .context("failed to finalize archive")?;
    Ok(archive_path)
}
