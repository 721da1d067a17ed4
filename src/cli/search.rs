use anyhow::Result;

use almanac::config::AlmanacConfig;
use almanac::knowledge::search::rank;

/// Run a keyword search from the terminal.
pub fn search(config: &AlmanacConfig, query: &str, limit: Option<usize>) -> Result<()> {
    let store = super::open_store(config)?;
    let limit = limit.unwrap_or(config.retrieval.default_max_results);

    let ranked = rank(store.articles(), query);

    if ranked.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!("Found {} result(s)\n", ranked.len());

    for (i, hit) in ranked.iter().take(limit).enumerate() {
        println!(
            "  {}. {} [{}] (score: {})",
            i + 1,
            hit.article.title,
            hit.article.id,
            hit.score,
        );
        println!("     {}", super::preview(&hit.article.content, 120));
        println!();
    }

    if ranked.len() > limit {
        println!("  ... {} more (use --limit to show them)", ranked.len() - limit);
    }

    Ok(())
}
