//! `jellyforge compile` — render every template under a root.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use jellyforge_compiler::{compile, CompileOptions, CompileReport, WriteResult, DEFAULT_SUFFIX};

/// Arguments for `jellyforge compile`.
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Directory to scan for templates.
    pub root: PathBuf,

    /// Template suffix, without the leading dot.
    #[arg(long, default_value = DEFAULT_SUFFIX)]
    pub suffix: String,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Stop at the first template that fails.
    #[arg(long)]
    pub fail_fast: bool,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl CompileArgs {
    pub fn run(self) -> Result<()> {
        let options = CompileOptions {
            suffix: self.suffix,
            dry_run: self.dry_run,
            fail_fast: self.fail_fast,
        };
        tracing::debug!(root = %self.root.display(), suffix = %options.suffix, "compiling");
        let report = compile(&self.root, &options)
            .with_context(|| format!("compile failed for '{}'", self.root.display()))?;

        if self.json {
            let json = serde_json::to_string_pretty(&report)
                .context("failed to serialize compile report")?;
            println!("{json}");
        } else {
            print_report(&report);
        }

        if !report.is_success() {
            bail!(
                "{} of {} template(s) failed",
                report.failed_count(),
                report.discovered
            );
        }
        Ok(())
    }
}

fn print_report(report: &CompileReport) {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };
    let root = report.root.display();

    if report.discovered == 0 {
        println!("{prefix}✓ '{root}' — no templates found");
        return;
    }

    let mark = if report.is_success() {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!(
        "{prefix}{mark} '{root}' compiled ({} written, {} unchanged, {} failed)",
        report.written_count(),
        report.unchanged_count(),
        report.failed_count()
    );

    for r in &report.results {
        let path = relative(&report.root, r.path());
        match r {
            WriteResult::Written { .. } => println!("  ✎  {path}"),
            WriteResult::WouldWrite { .. } => println!("  ~  {path}"),
            WriteResult::Unchanged { .. } => println!("  ·  {path}"),
        }
    }
    for failure in &report.failures {
        println!(
            "  {}  {} ({}): {}",
            "✗".red(),
            relative(&report.root, &failure.source),
            failure.kind,
            failure.message
        );
    }
    if report.aborted {
        println!("{}", "stopped after the first failure (--fail-fast)".yellow());
    }
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
