//! Atomic writer for rendered output.
//!
//! ## `atomic_write` protocol
//!
//! 1. Render content (already done by caller, fully in memory).
//! 2. Compare with the current destination → skip if identical.
//! 3. Write to `<path>.jellyforge.tmp` next to the destination.
//! 4. Rename to final path (atomic on POSIX).
//! 5. On any failure, remove the temporary file; the destination keeps its
//!    previous content.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Suffix of the temporary sibling used during a write.
pub const TMP_SUFFIX: &str = ".jellyforge.tmp";

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped: it already holds exactly the rendered content.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

/// Temporary path used while writing `path`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(TMP_SUFFIX);
    PathBuf::from(tmp)
}

/// Atomically replace `path` with `content`.
pub fn atomic_write(path: &Path, content: &str, dry_run: bool) -> std::io::Result<WriteResult> {
    atomic_write_with_tmp(path, content, dry_run, &tmp_path(path))
}

fn atomic_write_with_tmp(
    path: &Path,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> std::io::Result<WriteResult> {
    if current_content(path).as_deref() == Some(content) {
        tracing::debug!(path = %path.display(), "unchanged");
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!(path = %path.display(), "[dry-run] would write");
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Err(e) = std::fs::write(tmp, content) {
        let _ = std::fs::remove_file(tmp);
        return Err(e);
    }

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(e);
    }

    tracing::info!(path = %path.display(), "wrote");
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

/// Current destination content; `None` when missing or unreadable.
fn current_content(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(err) if err.kind() == ErrorKind::NotFound => None,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "cannot read existing output");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn first_write_returns_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.jelly");
        let result = atomic_write(&path, "hello", false).unwrap();
        assert!(matches!(result, WriteResult::Written { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn same_content_returns_unchanged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("file.jelly");
        atomic_write(&path, "same content", false).unwrap();
        let result = atomic_write(&path, "same content", false).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
    }

    #[test]
    fn changed_content_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("file.jelly");
        atomic_write(&path, "v1", false).unwrap();
        let result = atomic_write(&path, "v2", false).unwrap();
        assert!(matches!(result, WriteResult::Written { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "v2");
    }

    #[test]
    fn dry_run_does_not_write_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.jelly");
        let result = atomic_write(&path, "content", true).unwrap();
        assert!(matches!(result, WriteResult::WouldWrite { .. }));
        assert!(!path.exists(), "dry-run must not create files");
    }

    #[test]
    fn content_is_written_verbatim() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("crlf.jelly");
        atomic_write(&path, "a\r\nb", false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\r\nb");
    }

    #[test]
    fn tmp_path_is_a_sibling() {
        assert_eq!(
            tmp_path(Path::new("/r/views/config.jelly")),
            PathBuf::from("/r/views/config.jelly.jellyforge.tmp")
        );
    }

    #[cfg(unix)]
    #[test]
    fn tmp_path_keeps_non_utf8_components() {
        use std::os::unix::ffi::OsStrExt;

        let dir = std::ffi::OsStr::from_bytes(b"caf\xe9");
        let path = Path::new("/r").join(dir).join("x.jelly");
        let tmp = tmp_path(&path);
        assert_eq!(tmp.parent(), path.parent());
        assert_eq!(tmp.file_name().unwrap(), "x.jelly.jellyforge.tmp");
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clean.jelly");
        atomic_write(&path, "data", false).unwrap();
        assert!(!tmp_path(&path).exists(), ".jellyforge.tmp must be cleaned up");
    }

    #[test]
    fn rename_failure_leaves_destination_and_cleans_tmp() {
        let root = TempDir::new().unwrap();
        // A non-empty directory where the file should go makes the rename fail.
        let path = root.path().join("blocked.jelly");
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("keep"), "original").unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp = tmp_dir.path().join("blocked.jelly.jellyforge.tmp");

        atomic_write_with_tmp(&path, "new content", false, &tmp)
            .expect_err("rename over a non-empty directory should fail");
        assert_eq!(fs::read_to_string(path.join("keep")).unwrap(), "original");
        assert!(!tmp.exists(), ".jellyforge.tmp should be cleaned up");
    }
}
