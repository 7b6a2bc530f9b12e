use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::catalog::{Section, TitleDetail};
use crate::ui::components::DetailCard;
use crate::ui::theme::Theme;
use crate::watchlist::WatchlistKey;

/// Action from detail screen
#[derive(Debug, PartialEq)]
pub enum DetailAction {
    ToggleWatchlist(WatchlistKey),
    PlayTrailer(String),
    Back,
}

/// Full view of one title
pub struct DetailScreen {
    pub detail: TitleDetail,
    in_watchlist: bool,
}

impl DetailScreen {
    pub fn new(detail: TitleDetail, in_watchlist: bool) -> Self {
        Self {
            detail,
            in_watchlist,
        }
    }

    pub fn key(&self) -> WatchlistKey {
        WatchlistKey::from(&self.detail.item)
    }

    pub fn set_in_watchlist(&mut self, in_watchlist: bool) {
        self.in_watchlist = in_watchlist;
    }

    fn button_label(&self) -> &'static str {
        if self.in_watchlist {
            "Remove from Watchlist"
        } else {
            "Add to Watchlist"
        }
    }

    fn trailer_url(&self) -> Option<String> {
        self.detail.trailer.as_ready().map(|video| video.watch_url())
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DetailAction> {
        match key.code {
            KeyCode::Char('a') | KeyCode::Enter => {
                return Some(DetailAction::ToggleWatchlist(self.key()));
            }
            KeyCode::Char('p') => return self.trailer_url().map(DetailAction::PlayTrailer),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => {
                return Some(DetailAction::Back);
            }
            _ => {}
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),    // Card
                Constraint::Length(1), // Help
            ])
            .margin(1)
            .split(area);

        DetailCard::render(frame, chunks[0], &self.detail, self.in_watchlist, theme);

        let mut help = vec![
            Span::styled("a", theme.highlight()),
            Span::styled(format!(" {} • ", self.button_label()), theme.muted()),
        ];
        if matches!(self.detail.trailer, Section::Ready(_)) {
            help.push(Span::styled("p", theme.highlight()));
            help.push(Span::styled(" play trailer • ", theme.muted()));
        }
        help.push(Span::styled("Esc", theme.highlight()));
        help.push(Span::styled(" back", theme.muted()));
        frame.render_widget(Paragraph::new(Line::from(help)), chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use serde_json::json;

    use super::*;
    use crate::api::{MediaKind, Video};
    use crate::error::{ApiError, FailureKind};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn detail(videos: Result<Vec<Video>, ApiError>) -> TitleDetail {
        let raw = json!({"id": 1396, "name": "Breaking Bad", "first_air_date": "2008-01-20"});
        TitleDetail::assemble(MediaKind::TvSeries, 1396, &raw, videos, Ok(Vec::new()))
    }

    #[test]
    fn test_toggle_uses_title_key() {
        let mut screen = DetailScreen::new(detail(Ok(Vec::new())), false);
        assert_eq!(screen.button_label(), "Add to Watchlist");
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('a'))),
            Some(DetailAction::ToggleWatchlist(WatchlistKey::tv(1396)))
        );

        screen.set_in_watchlist(true);
        assert_eq!(screen.button_label(), "Remove from Watchlist");
    }

    #[test]
    fn test_play_needs_a_trailer() {
        let mut screen = DetailScreen::new(detail(Err(ApiError::Status(500))), false);
        assert_eq!(screen.detail.trailer, Section::Unavailable(FailureKind::Transport));
        assert_eq!(screen.handle_key(key(KeyCode::Char('p'))), None);

        let trailer = Video {
            key: "HhesaQXLuRY".to_string(),
            name: "Official Trailer".to_string(),
            site: "YouTube".to_string(),
            video_type: "Trailer".to_string(),
        };
        let mut screen = DetailScreen::new(detail(Ok(vec![trailer])), true);
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('p'))),
            Some(DetailAction::PlayTrailer(
                "https://www.youtube.com/watch?v=HhesaQXLuRY".to_string()
            ))
        );
    }
}
