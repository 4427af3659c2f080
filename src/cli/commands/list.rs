//! List games command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_list_games(config: &Config) -> anyhow::Result<()> {
    let store = Store::from_config(&config.general).await?;
    let games = store.list_all().await?;

    if games.is_empty() {
        println!("No games saved yet.");
        println!();
        println!("Add one from the web UI: gameshelf serve");
        return Ok(());
    }

    println!("Saved games ({} total)", games.len());
    println!("{:-<70}", "");

    for game in games {
        println!("[{}] {}", game.id, game.title);
        if let Some(description) = &game.description {
            println!("    {description}");
        }
        println!("    Cover: {}", game.image_url);
    }

    Ok(())
}
