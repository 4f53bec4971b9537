use glob::{glob_with, MatchOptions, Pattern};
use log::{debug, warn};
use rustc_hash::FxHashSet;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::*;

/// Substring marking filesystem metadata entries (`.DS_Store` and friends).
const METADATA_MARKER: &str = ".DS";

/// Find every raw read file under `raw_dir`, recursively.
///
/// Symlinked directories are followed. Entries whose name contains `.DS` are skipped, including
/// whole directories, and so are links whose target cannot be resolved. The result is sorted by
/// full path so that forward/reverse assignment does not depend on the platform's directory
/// order. A file reachable through several links is returned once, under its first path.
pub fn discover(raw_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let raw_dir = raw_dir.as_ref();
    let meta = fs::metadata(raw_dir).map_err(|e| Error::file_io(raw_dir, e))?;
    if !meta.is_dir() {
        return Err(Error::file_io(
            raw_dir,
            io::Error::new(io::ErrorKind::Other, "not a directory"),
        ));
    }

    let root = Pattern::escape(&raw_dir.to_string_lossy());
    let pattern = format!("{}/**/*", root.trim_end_matches('/'));
    let options = MatchOptions {
        case_sensitive: true,
        ..Default::default()
    };
    let entries = glob_with(&pattern, options).map_err(|e| Error::InvalidGlob {
        pattern: pattern.clone(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping unreadable \"{}\": {}", e.path().display(), e.error());
                continue;
            }
        };

        if is_metadata(raw_dir, &path) {
            debug!("Skipping \"{}\"", path.display());
            continue;
        }

        match fs::metadata(&path) {
            Ok(m) if m.is_file() => files.push(path),
            Ok(_) => (),
            Err(e) => warn!("Skipping \"{}\", link target is unreadable: {e}", path.display()),
        }
    }
    files.sort();

    // symlink cycles show the same file under ever longer paths
    let mut seen = FxHashSet::default();
    files.retain(|f| match fs::canonicalize(f) {
        Ok(real) => seen.insert(real),
        Err(_) => true,
    });

    debug!("Found {} files under \"{}\"", files.len(), raw_dir.display());
    Ok(files)
}

fn is_metadata(raw_dir: &Path, path: &Path) -> bool {
    path.strip_prefix(raw_dir)
        .unwrap_or(path)
        .components()
        .any(|c| c.as_os_str().to_string_lossy().contains(METADATA_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"@r\nACGT\n+\nIIII\n").unwrap();
    }

    #[test]
    fn walks_nested_dirs_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("run2/S2_R2.fastq"));
        touch(&root.join("run1/S1_R1.fastq"));
        touch(&root.join("run2/S2_R1.fastq"));
        touch(&root.join("run1/S1_R2.fastq"));

        let files = discover(root).unwrap();
        assert_eq!(
            files,
            vec![
                root.join("run1/S1_R1.fastq"),
                root.join("run1/S1_R2.fastq"),
                root.join("run2/S2_R1.fastq"),
                root.join("run2/S2_R2.fastq"),
            ]
        );
    }

    #[test]
    fn skips_metadata_entries() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join(".DS_Store"));
        touch(&root.join("run1/.DS_Store"));
        touch(&root.join("run1/S1_R1.fastq"));
        touch(&root.join("stuff.DS/S9_R1.fastq"));

        let files = discover(root).unwrap();
        assert_eq!(files, vec![root.join("run1/S1_R1.fastq")]);
    }

    #[test]
    fn empty_dir_gives_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        assert!(discover(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::FileIo { .. }));
    }

    #[test]
    fn only_metadata_gives_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join(".DS_Store"));
        touch(&dir.path().join("run1.DS/S1_R1.fastq"));
        assert!(discover(dir.path()).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinked_run_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data/run1");
        let raw = dir.path().join("raw");
        touch(&data.join("S1_R1.fastq"));
        touch(&data.join("S1_R2.fastq"));
        fs::create_dir(&raw).unwrap();
        std::os::unix::fs::symlink(&data, raw.join("run1")).unwrap();

        let files = discover(&raw).unwrap();
        assert_eq!(
            files,
            vec![raw.join("run1/S1_R1.fastq"), raw.join("run1/S1_R2.fastq")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn dangling_link_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("S1_R1.fastq"));
        touch(&root.join("S1_R2.fastq"));
        std::os::unix::fs::symlink(root.join("gone@host.1234"), root.join(".#S1_R1.fastq"))
            .unwrap();

        let files = discover(root).unwrap();
        assert_eq!(files, vec![root.join("S1_R1.fastq"), root.join("S1_R2.fastq")]);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_cycle_lists_each_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("S1_R1.fastq"));
        touch(&root.join("S1_R2.fastq"));
        std::os::unix::fs::symlink(root, root.join("loop")).unwrap();

        let files = discover(root).unwrap();
        assert_eq!(files, vec![root.join("S1_R1.fastq"), root.join("S1_R2.fastq")]);
    }
}
