use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::catalog::{Section, TitleDetail};
use crate::ui::theme::Theme;

/// Full detail panel for a title
pub struct DetailCard;

impl DetailCard {
    pub fn render(frame: &mut Frame, area: Rect, detail: &TitleDetail, saved: bool, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(Span::styled(
                format!(" {} ", detail.item.kind.label()),
                theme.title(),
            ));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 10 || inner.height < 5 {
            return;
        }
        let width = inner.width as usize;

        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled(
                truncate_str(&detail.item.title, width),
                theme.highlight(),
            )),
            Line::from(Span::styled(detail.meta_line(), theme.rating())),
            Line::from(""),
        ];

        let overview = if detail.item.overview.is_empty() {
            "No description available."
        } else {
            detail.item.overview.as_str()
        };
        lines.extend(
            wrap_text(overview, width)
                .into_iter()
                .map(|l| Line::from(Span::styled(l, theme.normal()))),
        );

        lines.push(Line::from(""));
        lines.push(if saved {
            Line::from(Span::styled("✓ In Watchlist", theme.saved()))
        } else {
            Line::from(Span::styled("+ Not in Watchlist", theme.muted()))
        });

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Cast", theme.title())));
        match &detail.cast {
            Section::Ready(cast) => {
                for member in cast {
                    let mut spans = vec![Span::styled(member.name.clone(), theme.normal())];
                    if let Some(role) = member.character.as_deref().filter(|r| !r.is_empty()) {
                        spans.push(Span::styled(format!("  as {}", role), theme.muted()));
                    }
                    lines.push(Line::from(spans));
                }
            }
            Section::Empty | Section::Unavailable(_) => {
                lines.push(Line::from(Span::styled("Cast not available.", theme.muted())));
            }
        }

        lines.push(Line::from(""));
        lines.push(match &detail.trailer {
            Section::Ready(video) => Line::from(vec![
                Span::styled("Trailer: ", theme.title()),
                Span::styled(truncate_str(&video.name, width.saturating_sub(9)), theme.normal()),
            ]),
            _ => Line::from(Span::styled("Trailer not available.", theme.muted())),
        });

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);
    }
}

/// Truncate a string to fit within a given width
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        format!("{}...", s.chars().take(max_width - 3).collect::<String>())
    } else {
        s.chars().take(max_width).collect()
    }
}

/// Greedy word wrap; words longer than the width are truncated
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_width > 0 && current_width + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_len;
            continue;
        }

        if current_width > 0 {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_len > width {
            lines.push(truncate_str(word, width));
        } else {
            current.push_str(word);
            current_width = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_str("Inception", 20), "Inception");
        assert_eq!(truncate_str("Inception", 6), "Inc...");
        assert_eq!(truncate_str("Inception", 2), "In");
    }

    #[test]
    fn test_wrap() {
        assert_eq!(
            wrap_text("a thief who steals corporate secrets", 12),
            vec!["a thief who", "steals", "corporate", "secrets"]
        );
        assert_eq!(wrap_text("supercalifragilistic ok", 8), vec!["super...", "ok"]);
        assert!(wrap_text("   ", 10).is_empty());
    }
}
