//! Integration tests for staging and archive output

use repopack::staging::{copy_aux_files, create_archive};
use std::fs;
use std::fs::File;
use std::io::Read;
use tempfile::TempDir;

#[test]
fn test_archive_contains_full_relative_tree() {
    let staging = TempDir::new().expect("Failed to create staging directory");

    // A clone-shaped subtree plus a file at the staging root
    let repo = staging.path().join("proj-sync");
    fs::create_dir_all(repo.join("src")).unwrap();
    fs::write(repo.join("README.md"), "# proj").unwrap();
    fs::write(repo.join("src").join("lib.rs"), "pub fn f() {}").unwrap();
    fs::write(staging.path().join("manifest.txt"), "proj-sync\n").unwrap();
    // An empty directory must survive the round trip too
    fs::create_dir(repo.join("empty")).unwrap();

    let archive_path =
        create_archive(staging.path(), "SYNC_test_full_tree").expect("Failed to create archive");
    assert!(archive_path.ends_with("SYNC_test_full_tree.zip"));
    assert_eq!(archive_path.parent().unwrap(), std::env::temp_dir());

    let mut archive =
        zip::ZipArchive::new(File::open(&archive_path).unwrap()).expect("Failed to open archive");
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    assert!(names.contains(&"manifest.txt".to_string()));
    assert!(names.contains(&"proj-sync/README.md".to_string()));
    assert!(names.contains(&"proj-sync/src/lib.rs".to_string()));
    assert!(names.iter().any(|n| n.trim_end_matches('/') == "proj-sync/empty"));

    let mut content = String::new();
    archive
        .by_name("proj-sync/src/lib.rs")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "pub fn f() {}");

    fs::remove_file(archive_path).unwrap();
}

#[cfg(unix)]
#[test]
fn test_archive_preserves_unix_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let staging = TempDir::new().expect("Failed to create staging directory");
    let script = staging.path().join("setup.sh");
    fs::write(&script, "#!/bin/sh\necho ok\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let archive_path =
        create_archive(staging.path(), "SYNC_test_permissions").expect("Failed to create archive");

    let mut archive =
        zip::ZipArchive::new(File::open(&archive_path).unwrap()).expect("Failed to open archive");
    let entry = archive.by_name("setup.sh").unwrap();
    assert_eq!(entry.unix_mode().map(|m| m & 0o777), Some(0o755));
    drop(entry);

    fs::remove_file(archive_path).unwrap();
}

#[cfg(unix)]
#[test]
fn test_aux_copy_preserves_mode_bits() {
    use std::os::unix::fs::PermissionsExt;

    let source_dir = TempDir::new().unwrap();
    let staging = TempDir::new().unwrap();
    let tool = source_dir.path().join("deploy.sh");
    fs::write(&tool, "#!/bin/sh\n").unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o744)).unwrap();

    copy_aux_files(staging.path(), &[tool]).expect("Failed to copy aux file");

    let copied = staging.path().join("deploy.sh");
    let mode = fs::metadata(copied).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o744);
}

#[test]
fn test_aux_copy_multiple_files() {
    let source_dir = TempDir::new().unwrap();
    let staging = TempDir::new().unwrap();
    let a = source_dir.path().join("a.txt");
    let b = source_dir.path().join("b.cfg");
    fs::write(&a, "alpha").unwrap();
    fs::write(&b, "beta").unwrap();

    copy_aux_files(staging.path(), &[a, b]).expect("Failed to copy aux files");

    assert_eq!(fs::read_to_string(staging.path().join("a.txt")).unwrap(), "alpha");
    assert_eq!(fs::read_to_string(staging.path().join("b.cfg")).unwrap(), "beta");
}
