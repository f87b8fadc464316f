//! End-of-run report.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use jellyforge_renderer::RenderError;

use crate::writer::WriteResult;

/// Why one template produced no output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The source could not be read (missing, unreadable, not UTF-8).
    Read,
    /// The template failed to parse or raised while evaluating.
    Evaluation,
    /// A tag operation received a value it cannot emit.
    InvalidAttribute,
    /// The destination could not be written.
    Persist,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Read => "read",
            FailureKind::Evaluation => "evaluation",
            FailureKind::InvalidAttribute => "invalid attribute",
            FailureKind::Persist => "persist",
        };
        f.write_str(s)
    }
}

/// One template that was skipped because of an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub source: PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

impl FileFailure {
    pub fn read(source: PathBuf, err: &std::io::Error) -> Self {
        FileFailure {
            source,
            kind: FailureKind::Read,
            message: err.to_string(),
        }
    }

    pub fn render(source: PathBuf, err: &RenderError) -> Self {
        let kind = if err.is_invalid_attribute() {
            FailureKind::InvalidAttribute
        } else {
            FailureKind::Evaluation
        };
        FileFailure {
            source,
            kind,
            message: err.to_string(),
        }
    }

    /// The existing destination exists but cannot be read back.
    pub fn unreadable_destination(
        source: PathBuf,
        destination: &std::path::Path,
        err: &std::io::Error,
    ) -> Self {
        FileFailure {
            source,
            kind: FailureKind::Persist,
            message: format!("cannot read existing {}: {err}", destination.display()),
        }
    }

    pub fn persist(source: PathBuf, destination: &std::path::Path, err: &std::io::Error) -> Self {
        FileFailure {
            source,
            kind: FailureKind::Persist,
            message: format!("cannot write {}: {err}", destination.display()),
        }
    }
}

/// Everything a compile run did.
#[derive(Debug, Clone, Serialize)]
pub struct CompileReport {
    pub root: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Number of templates found.
    pub discovered: usize,
    pub dry_run: bool,
    /// `true` when fail-fast stopped the run before every template was tried.
    pub aborted: bool,
    pub results: Vec<WriteResult>,
    pub failures: Vec<FileFailure>,
}

impl CompileReport {
    pub fn written_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, WriteResult::Written { .. } | WriteResult::WouldWrite { .. }))
            .count()
    }

    pub fn unchanged_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, WriteResult::Unchanged { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// No template failed and the run was not cut short.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.aborted
    }
}
