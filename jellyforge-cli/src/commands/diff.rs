//! `jellyforge diff <root>` — show unified diffs for what compile would write.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use jellyforge_compiler::{diff_root, CompileOptions, DEFAULT_SUFFIX};

/// Arguments for `jellyforge diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Directory to scan for templates.
    pub root: PathBuf,

    /// Template suffix, without the leading dot.
    #[arg(long, default_value = DEFAULT_SUFFIX)]
    pub suffix: String,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let options = CompileOptions {
            suffix: self.suffix,
            ..CompileOptions::default()
        };
        let result = diff_root(&self.root, &options)
            .with_context(|| format!("diff failed for '{}'", self.root.display()))?;

        if result.diffs.is_empty() && result.failures.is_empty() {
            println!("No differences for '{}'.", result.root.display());
            return Ok(());
        }

        for diff in &result.diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        for failure in &result.failures {
            eprintln!(
                "{} ({}): {}",
                failure.source.display(),
                failure.kind,
                failure.message
            );
        }
        if !result.failures.is_empty() {
            bail!("{} template(s) could not be rendered", result.failures.len());
        }
        Ok(())
    }
}
