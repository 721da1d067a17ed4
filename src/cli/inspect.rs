//! CLI `show` and `list` commands.

use anyhow::{bail, Result};

use almanac::config::AlmanacConfig;

/// Print one article in full, keywords included.
pub fn show(config: &AlmanacConfig, id: &str) -> Result<()> {
    let store = super::open_store(config)?;

    let Some(article) = store.get(id) else {
        bail!("article not found: {id}");
    };

    println!("{}", article.title);
    println!("{}", "=".repeat(article.title.chars().count().max(3)));
    println!("ID:        {}", article.id);
    println!("Keywords:  {}", article.keywords.join(", "));
    println!();
    println!("{}", article.content);

    Ok(())
}

/// List every article in storage order.
pub fn list(config: &AlmanacConfig) -> Result<()> {
    let store = super::open_store(config)?;

    println!("Knowledge Base ({} articles)", store.len());
    println!("{}", "=".repeat(40));

    for article in store.articles() {
        println!("  {:<28} {}", article.id, article.title);
        if !article.keywords.is_empty() {
            println!("  {:<28} [{}]", "", article.keywords.join(", "));
        }
    }

    Ok(())
}
