//! Catalog loading functionality

use super::{Catalog, ContentItem, Mood};
use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Builds the catalog, either from a JSON file or from the built-in table,
/// and runs the integrity checks unless `check` is false.
pub fn load_catalog<P: AsRef<Path>>(path: Option<P>, check: bool) -> Result<Catalog> {
    let catalog = match path {
        None => {
            info!("Using the built-in catalog.");
            Catalog::builtin()
        }
        Some(path) => {
            let path = path.as_ref();
            info!("Loading catalog from {}...", path.display());
            let file_text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
            let entries: HashMap<Mood, Vec<ContentItem>> = serde_json::from_str(&file_text)
                .with_context(|| format!("Failed to parse catalog file {}", path.display()))?;
            Catalog::new(entries)
        }
    };

    if check {
        info!("Performing checks...");
        let problems = catalog.check();
        if !problems.is_empty() {
            info!("Found {} problems:", problems.len());
            for problem in problems.iter() {
                info!("- {:?}", problem);
            }
            bail!("Catalog violates its invariants, refusing to serve it.");
        }
        info!("Catalog checked, no issues found.");
    } else {
        info!("Skipping checks.");
    }

    Ok(catalog)
}
