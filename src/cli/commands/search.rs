use std::time::Duration;

use crate::api::views::SearchResultView;
use crate::clients::mobygames::CatalogClient;
use crate::config::{Config, api_key_from_env};

pub async fn cmd_search_catalog(config: &Config, title: &str) -> anyhow::Result<()> {
    let api_key = api_key_from_env()?;
    let catalog = CatalogClient::new(
        config.catalog.endpoint.clone(),
        api_key,
        Duration::from_secs(config.catalog.request_timeout_seconds),
    )?;

    println!("Searching for: {title}");

    let search = catalog.search(title).await?;

    if search.count == 0 {
        println!("No games found matching '{title}'");
        return Ok(());
    }

    println!();
    println!("{} result(s):", search.count);
    println!("{:-<60}", "");

    for record in &search.games {
        let view = SearchResultView::from_record(record);
        println!("• {}", view.title);
        if let Some(image) = &view.image {
            println!("  Cover: {image}");
        }
        if let Some(description) = &view.description {
            println!("  {description}");
        }
        println!();
    }

    println!("Pick a result to save from the web UI: gameshelf serve");

    Ok(())
}
