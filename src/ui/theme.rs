use ratatui::style::{Color, Modifier, Style};

use crate::api::MediaKind;

/// Color palette; styles are derived from it per use
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
    pub text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin()
    }
}

impl Theme {
    /// Resolve a theme by its config name, falling back to the default
    pub fn from_name(name: &str) -> Self {
        match name {
            "minimal" => Self::minimal(),
            "default" | "catppuccin" => Self::catppuccin(),
            other => {
                tracing::warn!(theme = other, "Unknown theme, using default");
                Self::default()
            }
        }
    }

    /// Catppuccin Mocha palette
    pub fn catppuccin() -> Self {
        Self {
            primary: Color::Rgb(137, 180, 250),   // blue #89b4fa
            secondary: Color::Rgb(245, 194, 231), // pink #f5c2e7
            success: Color::Rgb(166, 227, 161),   // green #a6e3a1
            warning: Color::Rgb(249, 226, 175),   // yellow #f9e2af
            error: Color::Rgb(243, 139, 168),     // red #f38ba8
            muted: Color::Rgb(108, 112, 134),     // overlay #6c7086
            text: Color::Rgb(205, 214, 244),      // text #cdd6f4
        }
    }

    /// Plain 16-color palette for terminals without truecolor
    pub fn minimal() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Magenta,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::DarkGray,
            text: Color::Reset,
        }
    }

    pub fn normal(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Keys in help lines, focused borders, titles of the current item
    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Section headings
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.secondary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Selected list row
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// `[Movie]` / `[TV]` badges
    pub fn kind_badge(&self, kind: MediaKind) -> Style {
        match kind {
            MediaKind::Movie => Style::default().fg(self.secondary),
            MediaKind::TvSeries => Style::default().fg(self.success),
        }
    }

    /// Scores and the detail meta line
    pub fn rating(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// A title already on the watchlist
    pub fn saved(&self) -> Style {
        Style::default()
            .fg(self.success)
            .add_modifier(Modifier::BOLD)
    }

    /// Empty-result notices
    pub fn notice(&self) -> Style {
        Style::default().fg(self.warning)
    }
}

/// Selection arrow character
pub const ARROW: &str = "❯";

/// Spinner frames for loading animation
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Star character for ratings
pub const STAR: &str = "★";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("minimal").primary, Color::Cyan);
        assert_eq!(Theme::from_name("default").primary, Theme::catppuccin().primary);
        assert_eq!(Theme::from_name("solarized").text, Theme::catppuccin().text);
    }

    #[test]
    fn test_kind_badges_differ() {
        let theme = Theme::minimal();
        assert_ne!(
            theme.kind_badge(MediaKind::Movie),
            theme.kind_badge(MediaKind::TvSeries)
        );
    }
}
