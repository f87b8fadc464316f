//! Error types for jellyforge-compiler.

use std::path::PathBuf;

use thiserror::Error;

use jellyforge_core::ExtensionError;

/// Errors that abort a whole compile run.
///
/// Per-file problems never appear here; they are collected as
/// [`FileFailure`](crate::report::FileFailure)s in the run's report.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The template root could not be enumerated.
    #[error("cannot enumerate templates under {path}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The extension file exists but could not be loaded.
    #[error("extension error: {0}")]
    Extension(#[from] ExtensionError),
}

/// Convenience constructor for [`CompileError::Discovery`].
pub(crate) fn discovery_err(path: impl Into<PathBuf>, source: std::io::Error) -> CompileError {
    CompileError::Discovery {
        path: path.into(),
        source,
    }
}
