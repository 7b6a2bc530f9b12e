use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::api::MediaItem;
use crate::catalog::Section;
use crate::error::FailureKind;
use crate::ui::components::{media_spans, Input, SelectableList};
use crate::ui::theme::Theme;

/// Quiet period after the last keystroke before a search fires
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(350);

/// Action from search screen
#[derive(Debug, PartialEq)]
pub enum SearchAction {
    /// Search right away, skipping the debounce
    SearchNow(String),
    Open(MediaItem),
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Input,
    Results,
}

/// Search-as-you-type screen
pub struct SearchScreen {
    pub input: Input,
    results: Section<Vec<MediaItem>>,
    list: SelectableList<MediaItem>,
    /// Query the current results belong to
    searched: Option<String>,
    /// When the input last changed without a search following it
    dirty_since: Option<Instant>,
    focus: Focus,
}

impl SearchScreen {
    pub fn new() -> Self {
        Self::with_query("")
    }

    pub fn with_query(query: &str) -> Self {
        Self {
            input: Input::with_value(query),
            results: Section::Empty,
            list: SelectableList::new(Vec::new()),
            searched: None,
            dirty_since: None,
            focus: Focus::Input,
        }
    }

    /// Install results for `query`. Stale responses for an older query are ignored.
    pub fn set_results(&mut self, query: &str, results: Section<Vec<MediaItem>>) {
        if self.input.value().trim() != query {
            return;
        }
        self.list.set_items(results.items().to_vec());
        self.results = results;
        self.searched = Some(query.to_string());
    }

    /// Query to search once the input has been quiet for [`SEARCH_DEBOUNCE`]
    pub fn poll_debounce(&mut self, now: Instant) -> Option<String> {
        let since = self.dirty_since?;
        if now.duration_since(since) < SEARCH_DEBOUNCE {
            return None;
        }
        self.dirty_since = None;

        let query = self.input.value().trim().to_string();
        if self.searched.as_deref() == Some(query.as_str()) {
            return None;
        }
        if query.is_empty() {
            self.clear_results();
            return None;
        }
        Some(query)
    }

    fn clear_results(&mut self) {
        self.results = Section::Empty;
        self.list.set_items(Vec::new());
        self.searched = None;
    }

    fn edited(&mut self) {
        self.dirty_since = Some(Instant::now());
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SearchAction> {
        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Results => self.handle_results_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Option<SearchAction> {
        match key.code {
            KeyCode::Enter => {
                let query = self.input.value().trim().to_string();
                if !query.is_empty() {
                    self.dirty_since = None;
                    return Some(SearchAction::SearchNow(query));
                }
            }
            KeyCode::Esc => return Some(SearchAction::Back),
            KeyCode::Down | KeyCode::Tab => {
                if !self.list.is_empty() {
                    self.focus = Focus::Results;
                }
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
                self.edited();
            }
            KeyCode::Char(c) => {
                self.input.insert(c);
                self.edited();
            }
            KeyCode::Backspace => {
                self.input.backspace();
                self.edited();
            }
            KeyCode::Delete => {
                self.input.delete();
                self.edited();
            }
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_start(),
            KeyCode::End => self.input.move_end(),
            _ => {}
        }
        None
    }

    fn handle_results_key(&mut self, key: KeyEvent) -> Option<SearchAction> {
        match key.code {
            KeyCode::Enter => {
                return self.list.get_selected().cloned().map(SearchAction::Open);
            }
            KeyCode::Up | KeyCode::Char('k') => self.list.previous(),
            KeyCode::Down | KeyCode::Char('j') => self.list.next(),
            KeyCode::Tab | KeyCode::Char('/') => self.focus = Focus::Input,
            KeyCode::Esc => return Some(SearchAction::Back),
            _ => {}
        }
        None
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Input
                Constraint::Length(1), // Status
                Constraint::Min(5),    // Results
                Constraint::Length(1), // Help
            ])
            .margin(1)
            .split(area);

        self.input
            .render(frame, chunks[0], " Search movies ", theme, self.focus == Focus::Input);

        let status = match (&self.results, &self.searched) {
            (Section::Ready(items), Some(query)) => Line::from(vec![
                Span::styled("Results for ", theme.muted()),
                Span::styled(format!("\"{}\"", query), theme.highlight()),
                Span::styled(format!(" ({} found)", items.len()), theme.muted()),
            ]),
            (Section::Empty, Some(_)) => Line::from(vec![
                Span::styled("No Results Found. ", theme.notice()),
                Span::styled("Try a different search term.", theme.muted()),
            ]),
            (Section::Unavailable(FailureKind::Transport), _) => Line::from(Span::styled(
                "Search failed, check your connection.",
                theme.error(),
            )),
            (Section::Unavailable(FailureKind::Malformed), _) => Line::from(Span::styled(
                "Search returned an unexpected response.",
                theme.error(),
            )),
            _ if self.dirty_since.is_some() => {
                Line::from(Span::styled("Searching...", theme.muted()))
            }
            _ => Line::from(Span::styled("Type to search.", theme.muted())),
        };
        frame.render_widget(Paragraph::new(status), chunks[1]);

        if !self.list.is_empty() {
            let focused = self.focus == Focus::Results;
            self.list.render(frame, chunks[2], " Results ", theme, focused, |item, is_selected| {
                media_spans(item, is_selected, theme)
            });
        }

        let help = Line::from(vec![
            Span::styled("Enter", theme.highlight()),
            Span::styled(" search/open • ", theme.muted()),
            Span::styled("Tab", theme.highlight()),
            Span::styled(" results • ", theme.muted()),
            Span::styled("Esc", theme.highlight()),
            Span::styled(" back", theme.muted()),
        ]);
        frame.render_widget(Paragraph::new(help), chunks[3]);
    }
}

impl Default for SearchScreen {
    fn default() -> Self {
        Self::new()
    }
}
