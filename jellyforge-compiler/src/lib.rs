//! # jellyforge-compiler
//!
//! Walks a template tree, renders every template in its own context, and
//! writes each result next to its source with the template suffix removed.
//!
//! Call [`compile`] for a full run; a failing template is recorded in the
//! returned [`CompileReport`] and does not stop the others.

pub mod diff;
pub mod discovery;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod writer;

pub use diff::{diff_root, DiffReport, FileDiff};
pub use discovery::{destination_for, discover, DiscoveredTree, TemplateFile, DEFAULT_SUFFIX};
pub use error::CompileError;
pub use pipeline::{compile, CompileOptions};
pub use report::{CompileReport, FailureKind, FileFailure};
pub use writer::WriteResult;
