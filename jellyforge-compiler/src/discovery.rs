//! Template discovery and destination paths.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

use crate::error::{discovery_err, CompileError};
use crate::report::FileFailure;

/// Default template-source suffix.
pub const DEFAULT_SUFFIX: &str = "tera";

/// One discovered template and where its output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl TemplateFile {
    /// Source path relative to `root`, `/`-separated.
    pub fn relative_source(&self, root: &Path) -> String {
        relative_display(root, &self.source)
    }

    /// Destination path relative to `root`, `/`-separated.
    pub fn relative_destination(&self, root: &Path) -> String {
        relative_display(root, &self.destination)
    }
}

fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Sibling destination of `path`: the file name with `.<suffix>` removed
/// from its end. `None` when the name does not end in the suffix or nothing
/// would be left of it.
pub fn destination_for(path: &Path, suffix: &str) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let dotted = format!(".{suffix}");
    let stem = name.strip_suffix(&dotted)?;
    if stem.is_empty() {
        return None;
    }
    Some(path.with_file_name(OsString::from(stem)))
}

/// Everything found under a root.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredTree {
    /// Templates, sorted by full path.
    pub templates: Vec<TemplateFile>,
    /// Entries below the root that could not be inspected.
    pub unreadable: Vec<FileFailure>,
}

/// Recursive walk that follows symlinks and visits each real directory once.
struct Walk<'a> {
    suffix: &'a str,
    files: Vec<PathBuf>,
    unreadable: Vec<FileFailure>,
    visited: HashSet<PathBuf>,
}

impl Walk<'_> {
    fn dir(&mut self, dir: &Path) {
        match fs::read_dir(dir) {
            Ok(entries) => self.entries(dir, entries),
            Err(err) => self.skip(dir, err),
        }
    }

    fn entries(&mut self, dir: &Path, entries: ReadDir) {
        let mut paths = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => paths.push(entry.path()),
                Err(err) => self.skip(dir, err),
            }
        }
        paths.sort();

        for path in paths {
            // `fs::metadata` follows symlinks, so linked templates and
            // directories are walked like real ones.
            let meta = match fs::metadata(&path) {
                Ok(meta) => meta,
                Err(err) if destination_for(&path, self.suffix).is_some() => {
                    self.skip(&path, err);
                    continue;
                }
                Err(err) => {
                    tracing::debug!(path = %path.display(), error = %err, "ignoring unreadable entry");
                    continue;
                }
            };
            if meta.is_dir() {
                match fs::canonicalize(&path) {
                    Ok(real) => {
                        if self.visited.insert(real) {
                            self.dir(&path);
                        } else {
                            tracing::debug!(path = %path.display(), "directory already walked");
                        }
                    }
                    Err(err) => self.skip(&path, err),
                }
            } else if meta.is_file() {
                self.files.push(path);
            }
        }
    }

    fn skip(&mut self, path: &Path, err: std::io::Error) {
        tracing::warn!(path = %path.display(), error = %err, "cannot read entry");
        self.unreadable.push(FileFailure::read(path.to_path_buf(), &err));
    }
}

/// Every template under `root`, sorted by full path.
///
/// Only a root that cannot be listed is fatal; nothing has been rendered or
/// written at that point. Deeper directories or templates that cannot be
/// inspected are returned in [`DiscoveredTree::unreadable`] and the walk
/// goes on.
pub fn discover(root: &Path, suffix: &str) -> Result<DiscoveredTree, CompileError> {
    let entries = fs::read_dir(root).map_err(|e| discovery_err(root, e))?;
    let mut walk = Walk {
        suffix,
        files: Vec::new(),
        unreadable: Vec::new(),
        visited: HashSet::new(),
    };
    if let Ok(real) = fs::canonicalize(root) {
        walk.visited.insert(real);
    }
    walk.entries(root, entries);

    let mut files = walk.files;
    files.sort();
    let templates: Vec<TemplateFile> = files
        .into_iter()
        .filter_map(|source| {
            let destination = destination_for(&source, suffix)?;
            Some(TemplateFile {
                source,
                destination,
            })
        })
        .collect();
    tracing::debug!(
        root = %root.display(),
        count = templates.len(),
        unreadable = walk.unreadable.len(),
        "discovered templates"
    );
    Ok(DiscoveredTree {
        templates,
        unreadable: walk.unreadable,
    })
}
