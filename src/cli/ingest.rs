use anyhow::{Context, Result};
use std::path::Path;

use almanac::config::AlmanacConfig;
use almanac::knowledge::ingest;
use almanac::knowledge::lock_store;

/// Read a text file and add it to the knowledge base through AI extraction.
pub async fn ingest(config: &AlmanacConfig, file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read file: {}", file.display()))?;

    let source_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let client = almanac::extraction::create_client(&config.extraction)?;
    let store = super::open_store(config)?.into_shared();

    println!("Processing \"{source_name}\"...");
    let ingested = ingest::ingest(
        &store,
        &client,
        &source_name,
        &text,
        config.extraction.max_input_chars,
    )
    .await
    .with_context(|| format!("failed to add \"{source_name}\""))?;
    let article = &ingested.article;

    println!("Successfully added \"{source_name}\" to the knowledge base.");
    println!("  ID:        {}", article.id);
    println!("  Title:     {}", article.title);
    println!("  Keywords:  {}", article.keywords.join(", "));

    if !ingested.saved {
        super::report_durability(&lock_store(&store));
    }
    Ok(())
}
