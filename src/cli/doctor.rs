//! CLI `doctor` command: run storage diagnostics and print a health report.

use anyhow::{Context, Result};

use almanac::config::AlmanacConfig;
use almanac::db;

/// Run storage diagnostics and print a health report.
pub fn doctor(config: &AlmanacConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    if !db_path.exists() {
        println!("Database: not found at {}", db_path.display());
        println!("The built-in articles are used until the first save (ingest, import or serve).");
        return Ok(());
    }

    let file_size = std::fs::metadata(&db_path)
        .map(|m| m.len())
        .unwrap_or(0);

    let conn = db::open_database(&db_path)
        .context("failed to open database (may be corrupt)")?;

    let report = db::check_database_health(&conn, &config.storage.storage_key)
        .context("failed to run health check")?;

    println!("Almanac Health Report");
    println!("=====================");
    println!();
    println!("Database:          {}", db_path.display());
    println!("File size:         {}", format_bytes(file_size));
    println!("Schema version:    {}", report.schema_version);
    println!("Stored keys:       {}", report.key_count);
    println!();
    println!("Knowledge base (key \"{}\"):", config.storage.storage_key);
    match (report.stored_bytes, report.stored_articles) {
        (None, _) => println!("  Status:          not saved yet (defaults in use)"),
        (Some(bytes), Some(count)) => {
            println!("  Articles:        {count}");
            println!("  Size:            {}", format_bytes(bytes));
        }
        (Some(bytes), None) => {
            println!("  WARNING: stored value ({}) is not a JSON array; defaults will be used", format_bytes(bytes));
        }
    }
    if let Some(ref saved) = report.last_saved {
        println!("  Last saved:      {saved}");
    }
    println!();
    println!("Extraction:");
    println!("  Provider:        {}", config.extraction.provider);
    println!("  Model:           {}", config.extraction.extraction_model);
    let key_set = std::env::var(&config.extraction.api_key_env).is_ok_and(|k| !k.is_empty());
    println!(
        "  API key:         {} ({})",
        if key_set { "set" } else { "NOT SET" },
        config.extraction.api_key_env
    );
    println!();
    if report.integrity_ok {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   FAILED ({})", report.integrity_details);
        println!();
        println!("Recovery steps:");
        println!("  1. Export from a good copy: almanac export -o backup.json");
        println!("  2. Remove the database, then: almanac import backup.json");
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
