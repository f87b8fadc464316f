//! Dry-run unified diff support for `jellyforge diff`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use similar::TextDiff;

use crate::pipeline::{prepare, render_file, CompileOptions};
use crate::report::FileFailure;
use crate::CompileError;

/// A single rendered file diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Diff result for a template tree.
#[derive(Debug, Clone, Serialize)]
pub struct DiffReport {
    pub root: PathBuf,
    pub diffs: Vec<FileDiff>,
    pub failures: Vec<FileFailure>,
}

/// Render what `compile` would generate and compare it to current on-disk
/// content.
///
/// No files are written. Templates that fail to render are listed in
/// `failures` rather than diffed.
pub fn diff_root(root: &Path, options: &CompileOptions) -> Result<DiffReport, CompileError> {
    let (tree, engine) = prepare(root, options)?;

    let mut diffs = Vec::new();
    let mut failures = tree.unreadable;
    for file in &tree.templates {
        let rendered = match render_file(&engine, root, file) {
            Ok(rendered) => rendered,
            Err(failure) => {
                tracing::warn!(path = %failure.source.display(), error = %failure.message, "cannot diff template");
                failures.push(failure);
                continue;
            }
        };
        let existing = match read_existing_or_empty(&file.destination) {
            Ok(existing) => existing,
            Err(err) => {
                let failure =
                    FileFailure::unreadable_destination(file.source.clone(), &file.destination, &err);
                tracing::warn!(path = %file.destination.display(), error = %err, "cannot diff template");
                failures.push(failure);
                continue;
            }
        };
        if existing == rendered {
            continue;
        }

        let relative = file.relative_destination(root);
        let old_header = format!("a/{relative}");
        let new_header = format!("b/{relative}");
        let unified = TextDiff::from_lines(&existing, &rendered)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();

        diffs.push(FileDiff {
            path: file.destination.clone(),
            unified_diff: unified,
        });
    }

    Ok(DiffReport {
        root: root.to_path_buf(),
        diffs,
        failures,
    })
}

fn read_existing_or_empty(path: &Path) -> std::io::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(err),
    }
}
