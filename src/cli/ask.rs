use anyhow::{bail, Context, Result};

use almanac::config::AlmanacConfig;
use almanac::knowledge::query;
use almanac::knowledge::search::rank;

/// Answer `question` using one article as context.
///
/// Without `--article`, the best keyword match for the question is used.
pub async fn ask(config: &AlmanacConfig, question: &str, article_id: Option<&str>) -> Result<()> {
    let store = super::open_store(config)?;

    let article = match article_id {
        Some(id) => match store.get(id) {
            Some(article) => article,
            None => bail!("article not found: {id}"),
        },
        None => match rank(store.articles(), question).first() {
            Some(hit) => hit.article.clone(),
            None => bail!("no article matches the question; pass --article <id>"),
        },
    };

    let client = almanac::extraction::create_client(&config.extraction)?;

    eprintln!("Using \"{}\" [{}] as context", article.title, article.id);
    let answer = query::answer(&client, question, &article.content)
        .await
        .context("failed to get an answer")?;

    println!("{answer}");
    Ok(())
}
