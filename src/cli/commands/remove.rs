use crate::config::Config;
use crate::db::Store;

pub async fn cmd_remove_game(config: &Config, id: i32, skip_confirm: bool) -> anyhow::Result<()> {
    let store = Store::from_config(&config.general).await?;

    let Some(game) = store.get(id).await? else {
        println!("Game with ID {id} not found.");
        println!("Use 'gameshelf list' to see game IDs.");
        return Ok(());
    };

    if !skip_confirm {
        println!("Remove '{}' (ID: {})?", game.title, game.id);
        println!("Enter 'y' to confirm, anything else to cancel:");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let removed = store.delete(id).await?;
    println!("✓ Removed: {}", removed.title);

    Ok(())
}
