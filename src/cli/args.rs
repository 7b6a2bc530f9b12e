use clap::{Parser, Subcommand};

use crate::watchlist::WatchlistKey;

/// moviescope - Browse movies and TV shows from TMDB in your terminal
#[derive(Parser)]
#[command(name = "moviescope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Keep the watchlist in memory for this session only
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// First-time setup
    Init,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set a config value (format: key=value)
        #[arg(long)]
        set: Option<String>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },

    /// Search movies, opening the browser on the results
    #[command(alias = "s")]
    Search {
        /// Search query
        query: Option<String>,
    },

    /// Print trending titles
    Trending {
        /// TV shows instead of movies
        #[arg(long)]
        tv: bool,

        /// Today's trends instead of this week's
        #[arg(long)]
        day: bool,
    },

    /// Print top rated titles
    TopRated {
        /// TV shows instead of movies
        #[arg(long)]
        tv: bool,
    },

    /// Print details for a title, e.g. movie:550 or tv:1396
    Show {
        key: WatchlistKey,
    },

    /// Inspect or edit the watchlist
    #[command(alias = "w")]
    Watchlist {
        #[command(subcommand)]
        action: Option<WatchlistAction>,
    },
}

#[derive(Subcommand)]
pub enum WatchlistAction {
    /// Print saved titles with their details
    List,

    /// Add a title if absent, remove it if present
    Toggle { key: WatchlistKey },

    /// Exit successfully when the title is saved
    Has { key: WatchlistKey },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::api::MediaKind;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_keys() {
        let cli = Cli::parse_from(["moviescope", "watchlist", "toggle", "tv:1396"]);
        match cli.command {
            Some(Commands::Watchlist {
                action: Some(WatchlistAction::Toggle { key }),
            }) => assert_eq!(key, WatchlistKey::new(MediaKind::TvSeries, 1396)),
            _ => panic!("expected watchlist toggle"),
        }

        assert!(Cli::try_parse_from(["moviescope", "show", "movie:abc"]).is_err());
    }

    #[test]
    fn test_trending_flags() {
        let cli = Cli::parse_from(["moviescope", "trending", "--tv", "--day", "--ephemeral"]);
        assert!(cli.ephemeral);
        assert!(matches!(
            cli.command,
            Some(Commands::Trending { tv: true, day: true })
        ));
    }
}
