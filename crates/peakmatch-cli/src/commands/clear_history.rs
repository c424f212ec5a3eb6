//! The `peakmatch clear-history` command.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Result;

use peakmatch_core::config::load_config_from;
use peakmatch_core::history::HistoryStore;
use peakmatch_core::storage::JsonFileStore;

pub fn execute(yes: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mut history = HistoryStore::open(JsonFileStore::new(&config.history_dir))?;

    let confirmed = yes || {
        println!("Are you sure you want to clear all history? This cannot be undone. [y/N]");
        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)?;
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    };

    if !confirmed {
        println!("Cancelled.");
        return Ok(());
    }

    let count = history.len();
    history.clear_all()?;
    println!("History cleared ({count} session(s) removed).");
    Ok(())
}
