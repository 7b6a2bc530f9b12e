use std::time::{Duration, Instant};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::{Theme, SPINNER_FRAMES};

const FRAME_MILLIS: u128 = 80;

/// Animated loading indicator
pub struct Spinner {
    started: Instant,
    message: String,
}

impl Spinner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            started: Instant::now(),
            message: message.into(),
        }
    }

    fn frame_at(elapsed: Duration) -> &'static str {
        let index = (elapsed.as_millis() / FRAME_MILLIS) as usize % SPINNER_FRAMES.len();
        SPINNER_FRAMES[index]
    }

    /// Render centered vertically in `area`
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let elapsed = self.started.elapsed();
        let mut spans = vec![
            Span::styled(format!("{} ", Self::frame_at(elapsed)), theme.highlight()),
            Span::styled(self.message.clone(), theme.normal()),
        ];
        if elapsed >= Duration::from_secs(2) {
            spans.push(Span::styled(format!(" ({}s)", elapsed.as_secs()), theme.muted()));
        }

        let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(paragraph, rows[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_cycle() {
        assert_eq!(Spinner::frame_at(Duration::ZERO), SPINNER_FRAMES[0]);
        assert_eq!(Spinner::frame_at(Duration::from_millis(80)), SPINNER_FRAMES[1]);
        let full_cycle = Duration::from_millis(80 * SPINNER_FRAMES.len() as u64);
        assert_eq!(Spinner::frame_at(full_cycle), SPINNER_FRAMES[0]);
    }
}
