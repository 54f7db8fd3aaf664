use anyhow::{Context, Result};
use colored::Colorize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::build::{BuildOpts, BuildReport};

/// Result status for a single file copy.
#[derive(Debug, PartialEq)]
enum FileStatus {
    New,
    Updated,
    Unchanged,
}

/// Mirror the static asset tree into the output directory.
///
/// With `clean` the output directory is removed first. Files whose content
/// already matches the destination are left untouched.
pub fn copy_static(
    static_dir: &Path,
    output_dir: &Path,
    clean: bool,
    opts: &BuildOpts,
    report: &mut BuildReport,
) -> Result<()> {
    if clean && output_dir.exists() {
        fs::remove_dir_all(output_dir)
            .with_context(|| format!("Failed to clean {}", output_dir.display()))?;
        log::info!("removed {}", output_dir.display());
    }
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    if !static_dir.is_dir() {
        let msg = format!("Static directory {} not found, no assets copied", static_dir.display());
        log::warn!("{msg}");
        report.warnings.push(msg);
        return Ok(());
    }

    for rel_path in list_files_recursive(static_dir)? {
        let src = static_dir.join(&rel_path);
        let dst = output_dir.join(&rel_path);

        match copy_single_file(&src, &dst)? {
            FileStatus::New | FileStatus::Updated => {
                report.assets_copied += 1;
                if opts.verbose && !opts.quiet {
                    println!("  {} {}", "Copied".green(), rel_path.display());
                }
            }
            FileStatus::Unchanged => {
                report.assets_unchanged += 1;
                if opts.verbose && !opts.quiet {
                    println!("  {} {}", "Unchanged".dimmed(), rel_path.display());
                }
            }
        }
    }

    Ok(())
}

/// Copy one file unless the destination already has identical content.
fn copy_single_file(src: &Path, dst: &Path) -> Result<FileStatus> {
    let status = if !dst.exists() {
        FileStatus::New
    } else if file_hash(src)? == file_hash(dst)? {
        return Ok(FileStatus::Unchanged);
    } else {
        FileStatus::Updated
    };

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::copy(src, dst)
        .with_context(|| format!("Failed to copy {} -> {}", src.display(), dst.display()))?;

    Ok(status)
}

/// Compute SHA-256 hash of file contents.
fn file_hash(path: &Path) -> Result<String> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Recursively list all files under a directory, returning relative paths.
pub(crate) fn list_files_recursive(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if !dir.exists() {
        return Ok(files);
    }

    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            let rel = entry
                .path()
                .strip_prefix(dir)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(rel);
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> BuildOpts {
        BuildOpts {
            verbose: false,
            quiet: true,
        }
    }

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("mdsite-test-assets").join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_file_hash_consistency() {
        let dir = scratch("hash");
        let file = dir.join("test.txt");
        fs::write(&file, "hello world").unwrap();

        let h1 = file_hash(&file).unwrap();
        let h2 = file_hash(&file).unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64); // SHA-256 hex length

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_copy_mirrors_nested_tree() {
        let root = scratch("mirror");
        let src = root.join("static");
        let out = root.join("public");
        fs::create_dir_all(src.join("images/icons")).unwrap();
        fs::write(src.join("index.css"), "body {}").unwrap();
        fs::write(src.join("images/icons/star.svg"), "<svg/>").unwrap();

        let mut report = BuildReport::default();
        copy_static(&src, &out, true, &quiet(), &mut report).unwrap();

        assert_eq!(report.assets_copied, 2);
        assert_eq!(fs::read_to_string(out.join("index.css")).unwrap(), "body {}");
        assert!(out.join("images/icons/star.svg").exists());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_unchanged_files_are_skipped_without_clean() {
        let root = scratch("unchanged");
        let src = root.join("static");
        let out = root.join("public");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.txt"), "same").unwrap();
        fs::write(src.join("b.txt"), "new").unwrap();
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("a.txt"), "same").unwrap();
        fs::write(out.join("b.txt"), "old").unwrap();

        let mut report = BuildReport::default();
        copy_static(&src, &out, false, &quiet(), &mut report).unwrap();

        assert_eq!(report.assets_unchanged, 1);
        assert_eq!(report.assets_copied, 1);
        assert_eq!(fs::read_to_string(out.join("b.txt")).unwrap(), "new");

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_clean_removes_stale_output() {
        let root = scratch("clean");
        let src = root.join("static");
        let out = root.join("public");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("stale.html"), "old page").unwrap();

        let mut report = BuildReport::default();
        copy_static(&src, &out, true, &quiet(), &mut report).unwrap();

        assert!(out.exists());
        assert!(!out.join("stale.html").exists());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_missing_static_dir_is_warning() {
        let root = scratch("missing");
        let mut report = BuildReport::default();
        copy_static(&root.join("nope"), &root.join("public"), true, &quiet(), &mut report)
            .unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert!(root.join("public").exists());

        let _ = fs::remove_dir_all(&root);
    }
}
