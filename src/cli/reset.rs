//! CLI `reset` command: restore the built-in articles after user confirmation.

use anyhow::{bail, Result};
use std::io::Write;

use almanac::config::AlmanacConfig;
use almanac::knowledge::seed::default_articles;

/// Replace every article with the default set after user confirmation.
pub fn reset(config: &AlmanacConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    println!("WARNING: This will replace ALL articles with the built-in defaults.");
    println!("Database: {}", db_path.display());
    print!("\nType YES to confirm: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    if input.trim() != "YES" {
        bail!("reset cancelled");
    }

    let mut store = super::open_store(config)?;
    store.replace_all(default_articles());

    println!("Knowledge base reset to {} default articles.", store.len());
    super::report_durability(&store);
    Ok(())
}
