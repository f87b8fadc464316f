//! Compile pipeline: discover, render, persist, report.

use std::path::Path;

use chrono::Utc;

use jellyforge_core::extension;
use jellyforge_renderer::{TemplateContext, TemplateEngine};

use crate::discovery::{discover, DiscoveredTree, TemplateFile, DEFAULT_SUFFIX};
use crate::error::CompileError;
use crate::report::{CompileReport, FileFailure};
use crate::writer::{atomic_write, WriteResult};

/// Knobs for one compile run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Template-source suffix, without the leading dot.
    pub suffix: String,
    /// Render everything, write nothing.
    pub dry_run: bool,
    /// Stop at the first failing template instead of moving on.
    pub fail_fast: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            suffix: DEFAULT_SUFFIX.to_string(),
            dry_run: false,
            fail_fast: false,
        }
    }
}

/// Discover the templates under `root` and build the engine for them.
///
/// An unlistable root or a broken extension file is fatal, and both are
/// detected before anything is rendered.
pub(crate) fn prepare(
    root: &Path,
    options: &CompileOptions,
) -> Result<(DiscoveredTree, TemplateEngine), CompileError> {
    let tree = discover(root, &options.suffix)?;
    let registry = extension::registry_for_root(root)?;
    Ok((tree, TemplateEngine::new(registry)))
}

/// Read and evaluate one template into a fresh rendering context.
pub(crate) fn render_file(
    engine: &TemplateEngine,
    root: &Path,
    file: &TemplateFile,
) -> Result<String, FileFailure> {
    let source = std::fs::read_to_string(&file.source)
        .map_err(|e| FileFailure::read(file.source.clone(), &e))?;
    let name = file.relative_source(root);
    let vars = TemplateContext::new(name.clone(), file.relative_destination(root));
    engine
        .render(&name, &source, &vars)
        .map_err(|e| FileFailure::render(file.source.clone(), &e))
}

fn compile_file(
    engine: &TemplateEngine,
    root: &Path,
    file: &TemplateFile,
    dry_run: bool,
) -> Result<WriteResult, FileFailure> {
    let rendered = render_file(engine, root, file)?;
    atomic_write(&file.destination, &rendered, dry_run)
        .map_err(|e| FileFailure::persist(file.source.clone(), &file.destination, &e))
}

/// Compile every template under `root`.
///
/// A template that cannot be read, evaluated or written is recorded in the
/// report and the run moves on to the next one (unless `fail_fast`). So is
/// an entry below the root that cannot be inspected. Only a root that
/// cannot be enumerated, or a broken extension file, fails the whole call.
pub fn compile(root: &Path, options: &CompileOptions) -> Result<CompileReport, CompileError> {
    let started_at = Utc::now();
    let (tree, engine) = prepare(root, options)?;
    let templates = tree.templates;

    let mut results = Vec::new();
    let mut failures = tree.unreadable;
    let mut aborted = false;

    // Under fail-fast an unreadable entry already ends the run.
    let pending: &[TemplateFile] = if options.fail_fast && !failures.is_empty() {
        aborted = !templates.is_empty();
        &[]
    } else {
        &templates
    };

    for (idx, file) in pending.iter().enumerate() {
        match compile_file(&engine, root, file, options.dry_run) {
            Ok(result) => results.push(result),
            Err(failure) => {
                tracing::warn!(
                    path = %failure.source.display(),
                    kind = %failure.kind,
                    error = %failure.message,
                    "template skipped"
                );
                failures.push(failure);
                if options.fail_fast {
                    aborted = idx + 1 < pending.len();
                    break;
                }
            }
        }
    }

    let report = CompileReport {
        root: root.to_path_buf(),
        started_at,
        finished_at: Utc::now(),
        discovered: templates.len(),
        dry_run: options.dry_run,
        aborted,
        results,
        failures,
    };
    tracing::info!(
        root = %root.display(),
        discovered = report.discovered,
        written = report.written_count(),
        unchanged = report.unchanged_count(),
        failed = report.failed_count(),
        "compile finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::report::FailureKind;

    #[test]
    fn empty_tree_returns_empty_report() {
        let root = TempDir::new().expect("root");
        let report = compile(root.path(), &CompileOptions::default()).expect("compile");
        assert_eq!(report.discovered, 0);
        assert!(report.results.is_empty());
        assert!(report.is_success());
    }

    #[test]
    fn fail_fast_stops_after_first_failure() {
        let root = TempDir::new().expect("root");
        fs::write(root.path().join("a.jelly.tera"), "{{ textbox() }}").unwrap();
        fs::write(root.path().join("b.jelly.tera"), "{{ submit(value=\"OK\") }}").unwrap();

        let options = CompileOptions {
            fail_fast: true,
            ..CompileOptions::default()
        };
        let report = compile(root.path(), &options).expect("compile");
        assert!(report.aborted);
        assert_eq!(report.failed_count(), 1);
        assert!(report.results.is_empty());
        assert!(!root.path().join("b.jelly").exists());
    }

    #[test]
    fn non_utf8_source_is_a_read_failure() {
        let root = TempDir::new().expect("root");
        fs::write(root.path().join("bin.jelly.tera"), [0xff, 0xfe, 0x00]).unwrap();
        let report = compile(root.path(), &CompileOptions::default()).expect("compile");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind, FailureKind::Read);
    }
}
