//! The `peakmatch history` command.

use std::path::PathBuf;

use anyhow::Result;

use peakmatch_core::config::load_config_from;
use peakmatch_core::history::HistoryStore;
use peakmatch_core::storage::JsonFileStore;

use crate::render;

pub fn execute(user: Option<String>, format: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let history = HistoryStore::open(JsonFileStore::new(&config.history_dir))?;

    // Improvements are computed over everyone's sessions before filtering.
    let mut rows = history.rows();
    if let Some(user) = user.as_deref().map(str::trim) {
        rows.retain(|r| r.entry.user_name == user);
    }

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        _ => {
            if rows.is_empty() {
                println!("No history yet. Play a quiz first!");
            } else {
                println!("{}", render::history(&rows));
            }
        }
    }

    Ok(())
}
