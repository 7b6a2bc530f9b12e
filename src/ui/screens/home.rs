use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::api::MediaItem;
use crate::catalog::HomeFeed;
use crate::ui::components::{media_spans, truncate_str, SelectableList};
use crate::ui::theme::{Theme, STAR};
use crate::watchlist::WatchlistKey;

/// Characters of the featured overview shown in the header
const FEATURED_OVERVIEW_CHARS: usize = 320;

/// Action from home screen
#[derive(Debug, PartialEq)]
pub enum HomeAction {
    Open(MediaItem),
    ToggleFeatured(WatchlistKey),
    Search,
    TvShows,
    Watchlist,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Trending,
    TopRated,
    Grid,
}

/// Landing screen: featured title plus trending and top rated rows
pub struct HomeScreen {
    featured: Option<MediaItem>,
    featured_saved: bool,
    trending_failed: bool,
    top_rated_failed: bool,
    trending: SelectableList<MediaItem>,
    top_rated: SelectableList<MediaItem>,
    /// Everything trending this week
    grid: SelectableList<MediaItem>,
    focus: Row,
}

impl HomeScreen {
    pub fn new(feed: HomeFeed, featured_saved: bool) -> Self {
        Self {
            trending_failed: feed.trending.is_unavailable(),
            top_rated_failed: feed.top_rated.is_unavailable(),
            trending: SelectableList::new(feed.trending.items().to_vec()),
            top_rated: SelectableList::new(feed.top_rated.items().to_vec()),
            grid: SelectableList::new(feed.grid),
            featured: feed.featured,
            featured_saved,
            focus: Row::Trending,
        }
    }

    pub fn featured_key(&self) -> Option<WatchlistKey> {
        self.featured.as_ref().map(WatchlistKey::from)
    }

    pub fn set_featured_saved(&mut self, saved: bool) {
        self.featured_saved = saved;
    }

    fn focused_list(&mut self) -> &mut SelectableList<MediaItem> {
        match self.focus {
            Row::Trending => &mut self.trending,
            Row::TopRated => &mut self.top_rated,
            Row::Grid => &mut self.grid,
        }
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<HomeAction> {
        match key.code {
            KeyCode::Enter => {
                return self.focused_list().get_selected().cloned().map(HomeAction::Open);
            }
            KeyCode::Char('p') => {
                return self.featured.clone().map(HomeAction::Open);
            }
            KeyCode::Char('a') => {
                return self.featured_key().map(HomeAction::ToggleFeatured);
            }
            KeyCode::Up | KeyCode::Char('k') => self.focused_list().previous(),
            KeyCode::Down | KeyCode::Char('j') => self.focused_list().next(),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.focus = match self.focus {
                    Row::Trending => Row::TopRated,
                    Row::TopRated => Row::Grid,
                    Row::Grid => Row::Trending,
                };
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.focus = match self.focus {
                    Row::Trending => Row::Grid,
                    Row::TopRated => Row::Trending,
                    Row::Grid => Row::TopRated,
                };
            }
            KeyCode::Char('/') => return Some(HomeAction::Search),
            KeyCode::Char('t') => return Some(HomeAction::TvShows),
            KeyCode::Char('w') => return Some(HomeAction::Watchlist),
            KeyCode::Char('q') | KeyCode::Esc => return Some(HomeAction::Quit),
            _ => {}
        }
        None
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(8), // Featured
                Constraint::Min(5),    // Rows
                Constraint::Length(1), // Help
            ])
            .margin(1)
            .split(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("moviescope", theme.title()))),
            chunks[0],
        );

        self.render_featured(frame, chunks[1], theme);

        let rows = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(chunks[2]);

        let focus = self.focus;
        render_row(
            frame,
            rows[0],
            " Trending Now ",
            &mut self.trending,
            self.trending_failed,
            focus == Row::Trending,
            theme,
        );
        render_row(
            frame,
            rows[1],
            " Top Rated ",
            &mut self.top_rated,
            self.top_rated_failed,
            focus == Row::TopRated,
            theme,
        );
        render_row(
            frame,
            rows[2],
            " All Trending ",
            &mut self.grid,
            self.trending_failed,
            focus == Row::Grid,
            theme,
        );

        let help = Line::from(vec![
            Span::styled("↑/↓", theme.highlight()),
            Span::styled(" navigate • ", theme.muted()),
            Span::styled("Tab", theme.highlight()),
            Span::styled(" row • ", theme.muted()),
            Span::styled("Enter", theme.highlight()),
            Span::styled(" details • ", theme.muted()),
            Span::styled("p", theme.highlight()),
            Span::styled(" featured • ", theme.muted()),
            Span::styled("a", theme.highlight()),
            Span::styled(" watchlist featured • ", theme.muted()),
            Span::styled("/", theme.highlight()),
            Span::styled(" search • ", theme.muted()),
            Span::styled("t", theme.highlight()),
            Span::styled(" TV • ", theme.muted()),
            Span::styled("w", theme.highlight()),
            Span::styled(" my watchlist • ", theme.muted()),
            Span::styled("q", theme.highlight()),
            Span::styled(" quit", theme.muted()),
        ]);
        frame.render_widget(Paragraph::new(help), chunks[3]);
    }

    fn render_featured(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(Span::styled(" Featured ", theme.title()));

        let Some(featured) = &self.featured else {
            let empty = Paragraph::new(Span::styled("No featured title available.", theme.muted()))
                .block(block);
            frame.render_widget(empty, area);
            return;
        };

        let width = block.inner(area).width as usize;
        let mut meta = Vec::new();
        if !featured.release_year.is_empty() {
            meta.push(Span::styled(featured.release_year.clone(), theme.normal()));
            meta.push(Span::styled(" • ", theme.muted()));
        }
        let rating = featured
            .rating
            .map(|r| format!("{} {:.1}", STAR, r))
            .unwrap_or_else(|| format!("{} N/A", STAR));
        meta.push(Span::styled(rating, theme.rating()));
        meta.push(Span::raw("   "));
        meta.push(if self.featured_saved {
            Span::styled("✓ In Watchlist", theme.saved())
        } else {
            Span::styled("+ Watchlist", theme.muted())
        });

        let lines = vec![
            Line::from(Span::styled(truncate_str(&featured.title, width), theme.highlight())),
            Line::from(meta),
            Line::from(Span::styled(
                featured.synopsis(FEATURED_OVERVIEW_CHARS),
                theme.normal(),
            )),
        ];

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn render_row(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    list: &mut SelectableList<MediaItem>,
    failed: bool,
    focused: bool,
    theme: &Theme,
) {
    if list.is_empty() {
        let message = if failed {
            Span::styled("Could not load this row.", theme.error())
        } else {
            Span::styled("Nothing here right now.", theme.muted())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if focused { theme.highlight() } else { theme.border() })
            .title(title.to_string());
        frame.render_widget(Paragraph::new(message).block(block), area);
        return;
    }

    list.render(frame, area, title, theme, focused, |item, is_selected| {
        media_spans(item, is_selected, theme)
    });
}
