//! CLI module - Command-line interface for gameshelf
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// gameshelf - personal game collection tracker
#[derive(Parser)]
#[command(name = "gameshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    Serve,

    /// List saved games
    #[command(alias = "ls", alias = "l")]
    List,

    /// Search the catalog without saving anything
    #[command(alias = "s")]
    Search {
        /// Game title to look up
        #[arg(required = true)]
        title: Vec<String>,
    },

    /// Delete a saved game
    #[command(alias = "rm", alias = "r")]
    Remove {
        /// Game ID
        id: i32,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Create default config file
    Init,
}

pub use commands::*;
