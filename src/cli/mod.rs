//! Command-line front-end: one-shot searches, the trending list, an
//! interactive search prompt and the JSON API server.

mod commands;

use clap::{Parser, Subcommand};

/// Reelfinder - movie search with trending searches
#[derive(Parser)]
#[command(name = "reelfinder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search movies by title
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Show the most popular movies right now
    #[command(alias = "d")]
    Discover,

    /// Show the most searched terms
    #[command(alias = "t")]
    Trending {
        /// Number of entries to show (at most store.trending_limit)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search as you type; each line replaces the current query
    #[command(alias = "i")]
    Interactive,

    /// Start the JSON API server
    #[command(alias = "web")]
    Serve {
        /// Port to listen on (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
