//! `jellyforge tags` — list the tag vocabulary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use jellyforge_core::{extension, TagRegistry};

/// Arguments for `jellyforge tags`.
#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Include extension tags declared in this root's `jellyforge.yaml`.
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Print as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct TagRow {
    #[tabled(rename = "tag")]
    name: String,
    #[tabled(rename = "element")]
    element: String,
    #[tabled(rename = "shape")]
    shape: String,
}

impl TagsArgs {
    pub fn run(self) -> Result<()> {
        let registry = match &self.root {
            Some(root) => extension::registry_for_root(root)
                .with_context(|| format!("cannot load tags for '{}'", root.display()))?,
            None => TagRegistry::with_builtins(),
        };

        let rows: Vec<TagRow> = registry
            .ops()
            .map(|op| TagRow {
                name: op.name().to_string(),
                element: op.element().to_string(),
                shape: op.shape().to_string(),
            })
            .collect();

        if self.json {
            let json =
                serde_json::to_string_pretty(&rows).context("failed to serialize tag list")?;
            println!("{json}");
            return Ok(());
        }

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
