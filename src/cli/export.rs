use anyhow::{Context, Result};
use std::path::Path;

use almanac::config::AlmanacConfig;
use almanac::knowledge::transfer::export_json;

/// Export every article as pretty JSON to stdout, or to `output`.
///
/// When `output` is a directory the configured export filename is used inside it.
pub fn export(config: &AlmanacConfig, output: Option<&Path>) -> Result<()> {
    let store = super::open_store(config)?;
    let json = export_json(store.articles())?;

    match output {
        None => println!("{json}"),
        Some(path) => {
            let path = if path.is_dir() {
                path.join(&config.transfer.export_filename)
            } else {
                path.to_path_buf()
            };
            std::fs::write(&path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Saved to {}", path.display());
        }
    }

    eprintln!("Exported {} articles.", store.len());
    Ok(())
}
