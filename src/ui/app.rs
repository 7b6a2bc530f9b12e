use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use crate::api::{MediaKind, TmdbClient};
use crate::catalog::{self, Section};
use crate::config::Config;
use crate::error::Result;
use crate::player::Player;
use crate::ui::components::Spinner;
use crate::ui::screens::{
    DetailAction, DetailScreen, ErrorAction, ErrorScreen, HomeAction, HomeScreen, ListingAction,
    ListingScreen, SearchAction, SearchScreen,
};
use crate::ui::theme::Theme;
use crate::watchlist::{SqliteStorage, WatchlistKey, WatchlistStore};

type Term = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListingKind {
    TvShows,
    Watchlist,
}

/// Application state
enum Screen {
    Home(HomeScreen),
    Search(SearchScreen),
    Listing(ListingScreen, ListingKind),
    Detail(DetailScreen),
    Loading(Spinner),
    Error(ErrorScreen),
}

/// Pending async operation
#[derive(Debug, Clone, PartialEq)]
enum PendingOperation {
    None,
    LoadHome,
    Search(String),
    OpenDetail(MediaKind, u64),
    LoadTvShows,
    LoadWatchlist,
    ToggleWatchlist(WatchlistKey),
    PlayTrailer(String),
    /// Re-check the featured title after returning home
    RefreshHome,
}

/// Main TUI application
pub struct App {
    screen: Screen,
    /// Screens to return to, innermost last
    history: Vec<Screen>,
    pending: PendingOperation,
    /// Operation an error screen can retry
    retry: Option<PendingOperation>,
    initial_query: Option<String>,
    /// Watchlist changed since the watchlist listing was built
    watchlist_dirty: bool,
    should_quit: bool,
    tmdb: TmdbClient,
    watchlist: WatchlistStore<SqliteStorage>,
    player: Player,
    theme: Theme,
}

impl App {
    pub fn new(config: Config, watchlist: WatchlistStore<SqliteStorage>) -> Result<Self> {
        let tmdb = TmdbClient::new(&config.tmdb).context("Failed to create TMDB client")?;

        Ok(Self {
            screen: Screen::Loading(Spinner::new("Loading movies...")),
            history: Vec::new(),
            pending: PendingOperation::LoadHome,
            retry: None,
            initial_query: None,
            watchlist_dirty: false,
            should_quit: false,
            tmdb,
            watchlist,
            player: Player::new(config.player.clone()),
            theme: Theme::from_name(&config.ui.theme),
        })
    }

    /// Open the search screen with `query` once home has loaded
    pub fn set_initial_query(&mut self, query: &str) {
        let query = query.trim();
        if !query.is_empty() {
            self.initial_query = Some(query.to_string());
        }
    }

    /// Run the TUI application
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = self.setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        self.restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut Term) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if self.pending != PendingOperation::None {
                self.handle_pending_operation(terminal).await?;
                continue;
            }

            // Poll with a timeout so the spinner animates and the debounce fires
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            if let Screen::Search(screen) = &mut self.screen {
                if let Some(query) = screen.poll_debounce(Instant::now()) {
                    self.pending = PendingOperation::Search(query);
                }
            }
        }
        Ok(())
    }

    fn setup_terminal(&self) -> Result<Term> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;
        Ok(terminal)
    }

    fn restore_terminal(&self, terminal: &mut Term) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        match &mut self.screen {
            Screen::Home(screen) => screen.render(frame, area, &self.theme),
            Screen::Search(screen) => screen.render(frame, area, &self.theme),
            Screen::Listing(screen, _) => screen.render(frame, area, &self.theme),
            Screen::Detail(screen) => screen.render(frame, area, &self.theme),
            Screen::Loading(spinner) => spinner.render(frame, area, &self.theme),
            Screen::Error(screen) => screen.render(frame, area, &self.theme),
        }
    }

    /// Push the current screen and show a spinner while `operation` runs
    fn navigate(&mut self, operation: PendingOperation, message: &str) {
        let previous = std::mem::replace(&mut self.screen, Screen::Loading(Spinner::new(message)));
        self.history.push(previous);
        self.pending = operation;
    }

    fn go_back(&mut self) {
        let Some(previous) = self.history.pop() else {
            self.should_quit = true;
            return;
        };

        match &previous {
            Screen::Home(_) => self.pending = PendingOperation::RefreshHome,
            Screen::Listing(_, ListingKind::Watchlist) if self.watchlist_dirty => {
                self.pending = PendingOperation::LoadWatchlist;
            }
            _ => {}
        }
        self.screen = previous;
    }

    fn show_error(&mut self, message: String, retry: Option<PendingOperation>) {
        let can_retry = retry.is_some();
        self.retry = retry;
        self.screen = Screen::Error(ErrorScreen::new(message, can_retry));
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match &mut self.screen {
            Screen::Home(screen) => match screen.handle_key(key) {
                Some(HomeAction::Open(item)) => {
                    self.navigate(PendingOperation::OpenDetail(item.kind, item.id), "Loading title...");
                }
                Some(HomeAction::ToggleFeatured(key)) => {
                    self.pending = PendingOperation::ToggleWatchlist(key);
                }
                Some(HomeAction::Search) => {
                    let previous = std::mem::replace(&mut self.screen, Screen::Search(SearchScreen::new()));
                    self.history.push(previous);
                }
                Some(HomeAction::TvShows) => {
                    self.navigate(PendingOperation::LoadTvShows, "Loading TV shows...");
                }
                Some(HomeAction::Watchlist) => {
                    self.navigate(PendingOperation::LoadWatchlist, "Loading watchlist...");
                }
                Some(HomeAction::Quit) => self.should_quit = true,
                None => {}
            },
            Screen::Search(screen) => match screen.handle_key(key) {
                Some(SearchAction::SearchNow(query)) => {
                    self.pending = PendingOperation::Search(query);
                }
                Some(SearchAction::Open(item)) => {
                    self.navigate(PendingOperation::OpenDetail(item.kind, item.id), "Loading title...");
                }
                Some(SearchAction::Back) => self.go_back(),
                None => {}
            },
            Screen::Listing(screen, _) => match screen.handle_key(key) {
                Some(ListingAction::Open(item)) => {
                    self.navigate(PendingOperation::OpenDetail(item.kind, item.id), "Loading title...");
                }
                Some(ListingAction::Search) => {
                    let previous = std::mem::replace(&mut self.screen, Screen::Search(SearchScreen::new()));
                    self.history.push(previous);
                }
                Some(ListingAction::Back) => self.go_back(),
                None => {}
            },
            Screen::Detail(screen) => match screen.handle_key(key) {
                Some(DetailAction::ToggleWatchlist(key)) => {
                    self.pending = PendingOperation::ToggleWatchlist(key);
                }
                Some(DetailAction::PlayTrailer(url)) => {
                    self.pending = PendingOperation::PlayTrailer(url);
                }
                Some(DetailAction::Back) => self.go_back(),
                None => {}
            },
            // Operations run to completion before keys are read again
            Screen::Loading(_) => {}
            Screen::Error(screen) => match screen.handle_key(key) {
                Some(ErrorAction::Retry) => {
                    if let Some(operation) = self.retry.take() {
                        self.screen = Screen::Loading(Spinner::new("Retrying..."));
                        self.pending = operation;
                    }
                }
                Some(ErrorAction::Back) => {
                    self.retry = None;
                    self.go_back();
                }
                None => {}
            },
        }
    }

    async fn handle_pending_operation(&mut self, terminal: &mut Term) -> Result<()> {
        let operation = std::mem::replace(&mut self.pending, PendingOperation::None);

        match operation {
            PendingOperation::None => {}
            PendingOperation::LoadHome => {
                let feed = catalog::load_home(&self.tmdb).await;
                if feed.trending.is_unavailable() && feed.top_rated.is_unavailable() {
                    self.show_error(
                        "Could not reach TMDB. Check your connection and API key.".to_string(),
                        Some(PendingOperation::LoadHome),
                    );
                    return Ok(());
                }

                let featured_saved = match &feed.featured {
                    Some(item) => self.watchlist.contains(&WatchlistKey::from(item)).await,
                    None => false,
                };
                self.screen = Screen::Home(HomeScreen::new(feed, featured_saved));

                if let Some(query) = self.initial_query.take() {
                    let home = std::mem::replace(
                        &mut self.screen,
                        Screen::Search(SearchScreen::with_query(&query)),
                    );
                    self.history.push(home);
                    self.pending = PendingOperation::Search(query);
                }
            }
            PendingOperation::RefreshHome => {
                if let Screen::Home(screen) = &mut self.screen {
                    if let Some(key) = screen.featured_key() {
                        screen.set_featured_saved(self.watchlist.contains(&key).await);
                    }
                }
            }
            PendingOperation::Search(query) => {
                let results = catalog::search(&self.tmdb, &query).await;
                if let Screen::Search(screen) = &mut self.screen {
                    screen.set_results(&query, results);
                }
            }
            PendingOperation::OpenDetail(kind, id) => {
                match catalog::load_detail(&self.tmdb, kind, id).await {
                    Ok(detail) => {
                        let saved = self.watchlist.contains(&WatchlistKey::new(kind, id)).await;
                        self.screen = Screen::Detail(DetailScreen::new(detail, saved));
                    }
                    Err(e) => {
                        self.show_error(e.to_string(), Some(PendingOperation::OpenDetail(kind, id)));
                    }
                }
            }
            PendingOperation::LoadTvShows => {
                let shows = catalog::load_tv_shows(&self.tmdb).await;
                self.screen = Screen::Listing(
                    ListingScreen::new("Trending TV Shows", shows, "No Results Found"),
                    ListingKind::TvShows,
                );
            }
            PendingOperation::LoadWatchlist => {
                let watchlist = self.watchlist.load().await;
                let items = self.watchlist.resolve_all(&self.tmdb, &watchlist).await;
                self.watchlist_dirty = false;
                let unresolved = watchlist.len() - items.len();
                let listing =
                    ListingScreen::new("My Watchlist", Section::from_list(Ok(items)), "Your watchlist is empty.")
                        .with_unresolved(unresolved);
                self.screen = Screen::Listing(listing, ListingKind::Watchlist);
            }
            PendingOperation::ToggleWatchlist(key) => match self.watchlist.toggle(key).await {
                Ok(toggled) => {
                    self.watchlist_dirty = true;
                    match &mut self.screen {
                        Screen::Detail(screen) if screen.key() == key => {
                            screen.set_in_watchlist(toggled.is_member);
                        }
                        Screen::Home(screen) if screen.featured_key() == Some(key) => {
                            screen.set_featured_saved(toggled.is_member);
                        }
                        _ => {}
                    }
                }
                Err(e) => {
                    let previous = std::mem::replace(&mut self.screen, Screen::Loading(Spinner::new("")));
                    self.history.push(previous);
                    self.show_error(format!("Failed to update watchlist: {}", e), None);
                }
            },
            PendingOperation::PlayTrailer(url) => {
                // Hand the terminal to the player
                disable_raw_mode().context("Failed to disable raw mode")?;
                execute!(io::stdout(), LeaveAlternateScreen)
                    .context("Failed to leave alternate screen")?;

                let played = self.player.play(&url);

                enable_raw_mode().context("Failed to enable raw mode")?;
                execute!(io::stdout(), EnterAlternateScreen)
                    .context("Failed to enter alternate screen")?;
                terminal.clear().context("Failed to clear terminal")?;

                if let Err(e) = played {
                    tracing::warn!(error = %e, "Trailer playback failed");
                    let previous = std::mem::replace(&mut self.screen, Screen::Loading(Spinner::new("")));
                    self.history.push(previous);
                    self.show_error(e.to_string(), None);
                }
            }
        }

        Ok(())
    }
}
