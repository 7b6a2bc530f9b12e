use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::api::MediaItem;
use crate::catalog::Section;
use crate::ui::components::{media_spans, SelectableList};
use crate::ui::theme::Theme;

/// Action from listing screen
#[derive(Debug, PartialEq)]
pub enum ListingAction {
    Open(MediaItem),
    Back,
    Search,
}

/// A titled list of media: TV shows, the watchlist
pub struct ListingScreen {
    title: String,
    empty_message: String,
    unavailable: bool,
    /// Entries that exist but could not be loaded
    unresolved: usize,
    list: SelectableList<MediaItem>,
}

impl ListingScreen {
    pub fn new(
        title: impl Into<String>,
        section: Section<Vec<MediaItem>>,
        empty_message: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            empty_message: empty_message.into(),
            unavailable: section.is_unavailable(),
            unresolved: 0,
            list: SelectableList::new(section.items().to_vec()),
        }
    }

    pub fn with_unresolved(mut self, unresolved: usize) -> Self {
        self.unresolved = unresolved;
        self
    }

    /// Warning shown when some entries could not be loaded
    fn unresolved_notice(&self) -> Option<String> {
        match self.unresolved {
            0 => None,
            n if self.list.is_empty() => Some(format!(
                "Some titles could not be loaded ({} saved). Try again later.",
                n
            )),
            n => Some(format!("{} more title(s) could not be loaded right now.", n)),
        }
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ListingAction> {
        match key.code {
            KeyCode::Enter => {
                if let Some(item) = self.list.get_selected() {
                    return Some(ListingAction::Open(item.clone()));
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.list.previous(),
            KeyCode::Down | KeyCode::Char('j') => self.list.next(),
            KeyCode::Esc | KeyCode::Char('q') => return Some(ListingAction::Back),
            KeyCode::Char('/') => return Some(ListingAction::Search),
            _ => {}
        }
        None
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(u16::from(self.unresolved > 0)), // Notice
                Constraint::Min(5),    // List
                Constraint::Length(2), // Help text
            ])
            .margin(1)
            .split(area);

        let title = Line::from(vec![
            Span::styled(self.title.clone(), theme.highlight()),
            Span::styled(format!(" ({})", self.list.len()), theme.muted()),
        ]);
        frame.render_widget(Paragraph::new(title), chunks[0]);

        let notice = self.unresolved_notice();
        if let Some(text) = &notice {
            if !self.list.is_empty() {
                frame.render_widget(Paragraph::new(Span::styled(text.clone(), theme.notice())), chunks[1]);
            }
        }

        if self.list.is_empty() {
            let message = if let Some(text) = notice {
                Span::styled(text, theme.error())
            } else if self.unavailable {
                Span::styled("Could not load this list. Try again later.", theme.error())
            } else {
                Span::styled(self.empty_message.clone(), theme.notice())
            };
            frame.render_widget(Paragraph::new(Line::from(message)), chunks[2]);
        } else {
            self.list.render(frame, chunks[2], " Titles ", theme, true, |item, is_selected| {
                media_spans(item, is_selected, theme)
            });
        }

        let help = Line::from(vec![
            Span::styled("↑/↓", theme.highlight()),
            Span::styled(" navigate • ", theme.muted()),
            Span::styled("Enter", theme.highlight()),
            Span::styled(" details • ", theme.muted()),
            Span::styled("/", theme.highlight()),
            Span::styled(" search • ", theme.muted()),
            Span::styled("Esc", theme.highlight()),
            Span::styled(" back", theme.muted()),
        ]);
        frame.render_widget(Paragraph::new(help), chunks[3]);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::api::testing::item;
    use crate::api::MediaKind;
    use crate::error::FailureKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_wraps_and_opens() {
        let items = vec![item(MediaKind::TvSeries, 1, "One"), item(MediaKind::TvSeries, 2, "Two")];
        let mut screen = ListingScreen::new("TV Shows", Section::Ready(items), "No Results Found");

        screen.handle_key(key(KeyCode::Up));
        match screen.handle_key(key(KeyCode::Enter)) {
            Some(ListingAction::Open(item)) => assert_eq!(item.id, 2),
            other => panic!("expected open, got {:?}", other),
        }
    }

    #[test]
    fn test_unavailable_listing_has_nothing_to_open() {
        let mut screen = ListingScreen::new(
            "TV Shows",
            Section::Unavailable(FailureKind::Transport),
            "No Results Found",
        );
        assert!(screen.unavailable);
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), Some(ListingAction::Back));
    }

    #[test]
    fn test_unresolved_entries_are_not_reported_as_empty() {
        let screen = ListingScreen::new("My Watchlist", Section::Empty, "Your watchlist is empty.")
            .with_unresolved(3);
        let notice = screen.unresolved_notice().expect("notice for unresolved titles");
        assert!(notice.starts_with("Some titles could not be loaded"));

        let partial = ListingScreen::new(
            "My Watchlist",
            Section::Ready(vec![item(MediaKind::Movie, 1, "One")]),
            "Your watchlist is empty.",
        )
        .with_unresolved(1);
        assert_eq!(
            partial.unresolved_notice().as_deref(),
            Some("1 more title(s) could not be loaded right now.")
        );

        let empty = ListingScreen::new("My Watchlist", Section::Empty, "Your watchlist is empty.");
        assert_eq!(empty.unresolved_notice(), None);
    }
}
