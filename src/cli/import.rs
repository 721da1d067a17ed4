use anyhow::{Context, Result};
use std::path::Path;

use almanac::config::AlmanacConfig;
use almanac::knowledge::transfer::import_json;

/// Replace the knowledge base with the articles in a JSON file.
///
/// The file is validated before anything is replaced; on failure the stored
/// knowledge base is untouched.
pub fn import(config: &AlmanacConfig, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read import file: {}", file.display()))?;

    let mut store = super::open_store(config)?;
    let before = store.len();

    let count = import_json(&mut store, &json, config.transfer.validation)
        .with_context(|| format!("failed to load \"{}\"", file.display()))?;

    println!("Successfully loaded \"{}\".", file.display());
    println!("  Articles before: {before}");
    println!("  Articles now:    {count}");
    println!("  Validation:      {}", config.transfer.validation);

    super::report_durability(&store);
    Ok(())
}
