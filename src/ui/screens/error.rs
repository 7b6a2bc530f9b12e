use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::ui::theme::Theme;

/// Action from error screen
#[derive(Debug, PartialEq, Eq)]
pub enum ErrorAction {
    Retry,
    Back,
}

/// Full-screen failure with an optional retry
pub struct ErrorScreen {
    pub message: String,
    pub can_retry: bool,
}

impl ErrorScreen {
    pub fn new(message: impl Into<String>, can_retry: bool) -> Self {
        Self {
            message: message.into(),
            can_retry,
        }
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ErrorAction> {
        match key.code {
            KeyCode::Char('r') if self.can_retry => Some(ErrorAction::Retry),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => Some(ErrorAction::Back),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(area);

        let error_line = Line::from(vec![
            Span::styled("Error: ", theme.error()),
            Span::styled(self.message.as_str(), theme.normal()),
        ]);
        let error_widget = Paragraph::new(error_line)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(error_widget, chunks[1]);

        let mut help_spans = Vec::new();
        if self.can_retry {
            help_spans.push(Span::styled("r", theme.highlight()));
            help_spans.push(Span::styled(" retry • ", theme.muted()));
        }
        help_spans.push(Span::styled("Enter/Esc", theme.highlight()));
        help_spans.push(Span::styled(" go back", theme.muted()));

        let help_widget = Paragraph::new(Line::from(help_spans)).alignment(Alignment::Center);
        frame.render_widget(help_widget, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    #[test]
    fn test_retry_only_when_allowed() {
        let r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);

        let mut screen = ErrorScreen::new("TMDB request failed with status 503", true);
        assert_eq!(screen.handle_key(r), Some(ErrorAction::Retry));

        let mut screen = ErrorScreen::new("Failed to open watchlist", false);
        assert_eq!(screen.handle_key(r), None);
        assert_eq!(
            screen.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(ErrorAction::Back)
        );
    }
}
