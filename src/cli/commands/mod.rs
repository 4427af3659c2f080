mod list;
mod remove;
mod search;

pub use list::cmd_list_games;
pub use remove::cmd_remove_game;
pub use search::cmd_search_catalog;
