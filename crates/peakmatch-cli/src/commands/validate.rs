//! The `peakmatch validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(dataset_path: PathBuf) -> Result<()> {
    let sets = if dataset_path.is_dir() {
        peakmatch_core::parser::load_dataset_directory(&dataset_path)?
    } else {
        vec![peakmatch_core::parser::parse_dataset(&dataset_path)?]
    };

    let mut total_warnings = 0;

    for set in &sets {
        println!("Dataset: {} ({} items)", set.name, set.items.len());

        let warnings = peakmatch_core::parser::validate_dataset(set);
        for w in &warnings {
            let prefix = w
                .item_id
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All datasets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
