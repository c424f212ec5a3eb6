//! The `peakmatch init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("peakmatch.toml").exists() {
        println!("peakmatch.toml already exists, skipping.");
    } else {
        std::fs::write("peakmatch.toml", SAMPLE_CONFIG)?;
        println!("Created peakmatch.toml");
    }

    std::fs::create_dir_all("datasets")?;
    let example_path = std::path::Path::new("datasets/example.toml");
    if example_path.exists() {
        println!("datasets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_DATASET)?;
        println!("Created datasets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: peakmatch validate --dataset datasets/example.toml");
    println!("  2. Run: peakmatch play --name <you> --dataset datasets/example.toml");
    println!("  3. Run: peakmatch history");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# peakmatch configuration

# Where finished sessions are kept.
history_dir = "${HOME}/.local/share/peakmatch"

# How long a wrong pair stays marked (ms).
mismatch_delay_ms = 400

# Pause before the result screen (ms).
result_delay_ms = 500

# Play a custom dataset instead of the built-in mountains.
# dataset = "datasets/example.toml"

# Fix the shuffle for reproducible boards.
# seed = 42
"#;

const EXAMPLE_DATASET: &str = r#"[dataset]
id = "rivers"
name = "Great Rivers"
left_title = "Rivers"
right_title = "Continents"

[[items]]
id = 1
left = "Nile"
right = "Africa"
detail = "6,650 km"

[[items]]
id = 2
left = "Amazon"
right = "South America"
detail = "6,400 km"

[[items]]
id = 3
left = "Yangtze"
right = "Asia"
detail = "6,300 km"

[[items]]
id = 4
left = "Mississippi"
right = "North America"
detail = "3,730 km"

[[items]]
id = 5
left = "Danube"
right = "Europe"
detail = "2,850 km"

[[items]]
id = 6
left = "Murray"
right = "Australia"
detail = "2,508 km"
"#;
