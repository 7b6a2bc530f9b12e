use std::io::{self, Write};

use anyhow::Context;

use crate::api::{backdrop_url, poster_url, MediaItem, MediaKind, MetadataSource, TimeWindow, TmdbClient};
use crate::catalog::{self, Section, TitleDetail};
use crate::cli::WatchlistAction;
use crate::config::{config_path, load_config, read_config, save_config, Config};
use crate::error::{ConfigError, Result};
use crate::ui::App;
use crate::watchlist::{SqliteStorage, WatchlistKey, WatchlistStore, STORAGE_KEY};

const SETTABLE_KEYS: &str = "tmdb_api_key, language, player_command, theme";

/// Run first-time setup, prompting for the TMDB API key
pub async fn init() -> Result<()> {
    if config_path().exists() {
        let answer = prompt("Configuration already exists. Overwrite? [y/N]: ")?;
        if !answer.eq_ignore_ascii_case("y") {
            println!("Setup cancelled.");
            return Ok(());
        }
    }

    println!("moviescope needs a TMDB API key (https://www.themoviedb.org/settings/api).");
    let api_key = prompt("TMDB API key: ")?;
    if api_key.is_empty() {
        println!("No key entered. Setup cancelled.");
        return Ok(());
    }

    let config = Config::new(api_key);
    let client = TmdbClient::new(&config.tmdb)?;
    print!("Checking key... ");
    io::stdout().flush()?;
    match client.top_rated(MediaKind::Movie).await {
        Ok(_) => println!("ok"),
        Err(e) => {
            println!("failed ({})", e);
            println!("Saving anyway; fix it later with 'moviescope config --set tmdb_api_key=...'.");
        }
    }

    save_config(&config)?;
    println!("Configuration saved to {}", config_path().display());
    println!("\nRun 'moviescope' to start browsing.");
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Handle the config command
pub async fn config(show: bool, set: Option<String>, reset: bool) -> Result<()> {
    if reset {
        if config_path().exists() {
            std::fs::remove_file(config_path())?;
            println!("Configuration reset. Run 'moviescope init' to set up again.");
        } else {
            println!("No configuration file found.");
        }
        return Ok(());
    }

    if let Some(key_value) = set {
        let Some((key, value)) = key_value.split_once('=') else {
            println!("Invalid format. Use: --set key=value");
            println!("Available keys: {}", SETTABLE_KEYS);
            return Ok(());
        };

        let mut config = match read_config() {
            Ok(config) => config,
            Err(ConfigError::NotFound) => Config::new(String::new()),
            Err(e) => return Err(e.into()),
        };

        if !apply_setting(&mut config, key.trim(), value.trim()) {
            println!("Unknown key: {}", key);
            println!("Available keys: {}", SETTABLE_KEYS);
            return Ok(());
        }

        save_config(&config)?;
        println!("Configuration updated.");
        return Ok(());
    }

    if show {
        match read_config() {
            Ok(config) => {
                println!("Configuration file: {}\n", config_path().display());
                println!("[tmdb]");
                if config.has_api_key() {
                    println!("api_key = \"{}...\"", masked(&config.tmdb.api_key));
                } else {
                    println!("api_key = (not configured)");
                }
                println!("language = \"{}\"", config.tmdb.language);
                println!("timeout_secs = {}", config.tmdb.timeout_secs);
                println!("\n[player]");
                println!("command = \"{}\"", config.player.command);
                println!("args = {:?}", config.player.args);
                println!("\n[ui]");
                println!("theme = \"{}\"", config.ui.theme);
            }
            Err(e) => println!("Error: {}", e),
        }
        return Ok(());
    }

    println!("Usage: moviescope config [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --show         Show current configuration");
    println!("  --set KEY=VAL  Set a configuration value");
    println!("  --reset        Reset configuration to defaults");
    println!();
    println!("Available keys for --set:");
    println!("  tmdb_api_key    TMDB API key");
    println!("  language        Language for titles and overviews (default: en-US)");
    println!("  player_command  Trailer player command (default: mpv)");
    println!("  theme           UI theme: default, minimal");

    Ok(())
}

fn apply_setting(config: &mut Config, key: &str, value: &str) -> bool {
    match key {
        "tmdb_api_key" => config.tmdb.api_key = value.to_string(),
        "language" => config.tmdb.language = value.to_string(),
        "player_command" => config.player.command = value.to_string(),
        "theme" => config.ui.theme = value.to_string(),
        _ => return false,
    }
    true
}

fn masked(secret: &str) -> String {
    secret.chars().take(8).collect()
}

fn client() -> Result<TmdbClient> {
    let config = load_config()?;
    Ok(TmdbClient::new(&config.tmdb)?)
}

/// Watchlist store, in memory when `ephemeral`
pub fn open_store(ephemeral: bool) -> Result<WatchlistStore<SqliteStorage>> {
    let store = if ephemeral {
        WatchlistStore::new(SqliteStorage::open_in_memory(STORAGE_KEY)?)
    } else {
        WatchlistStore::open_default().context("Failed to open watchlist database")?
    };
    Ok(store)
}

/// Print trending titles
pub async fn trending(tv: bool, day: bool) -> Result<()> {
    let kind = kind_flag(tv);
    let window = if day { TimeWindow::Day } else { TimeWindow::Week };
    let items = client()?.trending(kind, window).await?;

    let period = match window {
        TimeWindow::Day => "today",
        TimeWindow::Week => "this week",
    };
    print_items(&format!("Trending {} {}", plural(kind), period), &items);
    Ok(())
}

/// Print top rated titles
pub async fn top_rated(tv: bool) -> Result<()> {
    let kind = kind_flag(tv);
    let items = client()?.top_rated(kind).await?;
    print_items(&format!("Top rated {}", plural(kind)), &items);
    Ok(())
}

/// Print the full detail view of one title
pub async fn show(key: WatchlistKey, ephemeral: bool) -> Result<()> {
    let client = client()?;
    let store = open_store(ephemeral)?;

    let detail = catalog::load_detail(&client, key.kind, key.id).await?;
    let saved = store.contains(&key).await;
    print_detail(&detail, saved);
    Ok(())
}

/// Handle the watchlist command. Returns false when `has` finds nothing.
pub async fn watchlist(action: Option<WatchlistAction>, ephemeral: bool) -> Result<bool> {
    let store = open_store(ephemeral)?;

    match action.unwrap_or(WatchlistAction::List) {
        WatchlistAction::List => {
            let watchlist = store.load().await;
            if watchlist.is_empty() {
                println!("Your watchlist is empty.");
                return Ok(true);
            }

            let items = store.resolve_all(&client()?, &watchlist).await;
            print_items(&format!("Watchlist ({} saved)", watchlist.len()), &items);
            let missing = watchlist.len() - items.len();
            if missing > 0 {
                println!("\n{} saved title(s) could not be loaded right now.", missing);
            }
        }
        WatchlistAction::Toggle { key } => {
            let toggled = store.toggle(key).await?;
            let verb = if toggled.is_member { "Added" } else { "Removed" };
            println!("{} {} ({} saved).", verb, key, toggled.watchlist.len());
        }
        WatchlistAction::Has { key } => {
            let saved = store.contains(&key).await;
            println!("{}", if saved { "yes" } else { "no" });
            return Ok(saved);
        }
    }

    Ok(true)
}

fn kind_flag(tv: bool) -> MediaKind {
    if tv {
        MediaKind::TvSeries
    } else {
        MediaKind::Movie
    }
}

fn plural(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "movies",
        MediaKind::TvSeries => "TV shows",
    }
}

fn print_items(heading: &str, items: &[MediaItem]) {
    println!("{}\n", heading);
    if items.is_empty() {
        println!("No Results Found");
        return;
    }
    for item in items {
        println!("{}", item_line(item));
    }
}

fn item_line(item: &MediaItem) -> String {
    let mut line = format!("{:<14} {}", WatchlistKey::from(item).to_string(), item.title);
    if !item.release_year.is_empty() {
        line.push_str(&format!(" ({})", item.release_year));
    }
    if let Some(rating) = item.rating.filter(|r| *r > 0.0) {
        line.push_str(&format!("  ★ {:.1}", rating));
    }
    line
}

fn print_detail(detail: &TitleDetail, saved: bool) {
    let item = &detail.item;
    println!("{} [{}]", item.title, item.kind.label());
    println!("{}", detail.meta_line());
    println!();
    if item.overview.is_empty() {
        println!("No description available.");
    } else {
        println!("{}", item.overview);
    }
    println!();
    println!("Poster:   {}", poster_url(item.poster_path.as_deref(), "w500"));
    if let Some(backdrop) = backdrop_url(item.backdrop_path.as_deref(), "original") {
        println!("Backdrop: {}", backdrop);
    }
    println!("Watchlist: {}", if saved { "saved" } else { "not saved" });

    println!("\nCast");
    match &detail.cast {
        Section::Ready(cast) => {
            for member in cast {
                match member.character.as_deref().filter(|c| !c.is_empty()) {
                    Some(role) => println!("  {} as {}", member.name, role),
                    None => println!("  {}", member.name),
                }
            }
        }
        _ => println!("  Cast not available."),
    }

    match &detail.trailer {
        Section::Ready(video) => println!("\nTrailer: {} ({})", video.name, video.watch_url()),
        _ => println!("\nTrailer not available."),
    }
}

/// Open the browser on the search screen
pub async fn search(query: Option<String>, ephemeral: bool) -> Result<()> {
    let config = load_config()?;
    let mut app = App::new(config, open_store(ephemeral)?)?;
    app.set_initial_query(query.as_deref().unwrap_or(""));
    app.run().await
}

/// Run interactive mode (default)
pub async fn interactive(ephemeral: bool) -> Result<()> {
    let config = match load_config() {
        Ok(c) => c,
        Err(ConfigError::NotFound) | Err(ConfigError::MissingApiKey) => {
            println!("No configuration found. Running setup...\n");
            init().await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut app = App::new(config, open_store(ephemeral)?)?;
    app.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::item;

    #[test]
    fn test_apply_setting() {
        let mut config = Config::new(String::new());
        assert!(apply_setting(&mut config, "tmdb_api_key", "abc"));
        assert!(apply_setting(&mut config, "theme", "minimal"));
        assert!(!apply_setting(&mut config, "rd_api_key", "x"));

        assert_eq!(config.tmdb.api_key, "abc");
        assert_eq!(config.ui.theme, "minimal");
    }

    #[test]
    fn test_item_line() {
        let mut movie = item(MediaKind::Movie, 550, "Fight Club");
        movie.release_year = "1999".to_string();
        movie.rating = Some(8.43);
        assert_eq!(item_line(&movie), "movie:550      Fight Club (1999)  ★ 8.4");

        let mut show = item(MediaKind::TvSeries, 1396, "Breaking Bad");
        show.release_year = String::new();
        show.rating = None;
        assert_eq!(item_line(&show), "tv:1396        Breaking Bad");
    }

    #[tokio::test]
    async fn test_ephemeral_store_starts_empty() {
        let store = open_store(true).unwrap();
        assert!(store.load().await.is_empty());
        assert!(store.toggle(WatchlistKey::movie(550)).await.unwrap().is_member);
    }
}
