//! TOML dataset parser.
//!
//! Loads datasets from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{default_left_title, default_right_title, Dataset, Item};

/// Intermediate TOML structure for parsing dataset files.
#[derive(Debug, Deserialize)]
struct TomlDatasetFile {
    dataset: TomlDatasetHeader,
    #[serde(default)]
    items: Vec<TomlItem>,
}

#[derive(Debug, Deserialize)]
struct TomlDatasetHeader {
    id: String,
    name: String,
    #[serde(default = "default_left_title")]
    left_title: String,
    #[serde(default = "default_right_title")]
    right_title: String,
}

#[derive(Debug, Deserialize)]
struct TomlItem {
    id: u32,
    left: String,
    right: String,
    #[serde(default)]
    detail: Option<String>,
}

/// Parse a single TOML file into a `Dataset`.
pub fn parse_dataset(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset file: {}", path.display()))?;

    parse_dataset_str(&content, path)
}

/// Parse a TOML string into a `Dataset` (useful for testing).
///
/// Duplicate item ids are rejected: tiles are matched by id.
pub fn parse_dataset_str(content: &str, source_path: &Path) -> Result<Dataset> {
    let parsed: TomlDatasetFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut seen = HashSet::new();
    for item in &parsed.items {
        anyhow::ensure!(
            seen.insert(item.id),
            "duplicate item id {} in {}",
            item.id,
            source_path.display()
        );
    }

    let items = parsed
        .items
        .into_iter()
        .map(|i| Item {
            id: i.id,
            left: i.left,
            right: i.right,
            detail: i.detail.filter(|d| !d.trim().is_empty()),
        })
        .collect();

    Ok(Dataset {
        id: parsed.dataset.id,
        name: parsed.dataset.name,
        left_title: parsed.dataset.left_title,
        right_title: parsed.dataset.right_title,
        items,
    })
}

/// Recursively load all `.toml` dataset files from a directory.
pub fn load_dataset_directory(dir: &Path) -> Result<Vec<Dataset>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            sets.extend(load_dataset_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_dataset(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// A warning from dataset validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The item ID (if applicable).
    pub item_id: Option<u32>,
    /// Warning message.
    pub message: String,
}

/// Validate a dataset for common issues.
pub fn validate_dataset(set: &Dataset) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.items.len() < 2 {
        warnings.push(ValidationWarning {
            item_id: None,
            message: format!(
                "dataset has {} item(s); at least 2 are needed for a shuffled board",
                set.items.len()
            ),
        });
    }

    let mut seen_ids = HashSet::new();
    for item in &set.items {
        if !seen_ids.insert(item.id) {
            warnings.push(ValidationWarning {
                item_id: Some(item.id),
                message: format!("duplicate item ID: {}", item.id),
            });
        }
    }

    for item in &set.items {
        if item.left.trim().is_empty() || item.right.trim().is_empty() {
            warnings.push(ValidationWarning {
                item_id: Some(item.id),
                message: "left or right label is empty".into(),
            });
        }
    }

    // Two identical right labels look interchangeable but only one is correct.
    let mut seen_right = HashSet::new();
    for item in &set.items {
        if !seen_right.insert(item.right.trim().to_lowercase()) {
            warnings.push(ValidationWarning {
                item_id: Some(item.id),
                message: format!("right label '{}' is used more than once", item.right),
            });
        }
    }

    warnings
}
