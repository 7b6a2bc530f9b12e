use ratatui::text::Span;

use crate::api::MediaItem;
use crate::ui::theme::{Theme, STAR};

/// Spans for one title in a list: kind badge, title, year and score
pub fn media_spans(item: &MediaItem, is_selected: bool, theme: &Theme) -> Vec<Span<'static>> {
    let title_style = if is_selected { theme.selected() } else { theme.normal() };

    let mut spans = vec![
        Span::styled(format!("[{}] ", item.kind.label()), theme.kind_badge(item.kind)),
        Span::styled(item.title.clone(), title_style),
    ];

    if !item.release_year.is_empty() {
        spans.push(Span::styled(format!("  {}", item.release_year), theme.muted()));
    }

    if let Some(rating) = item.rating.filter(|r| *r > 0.0) {
        spans.push(Span::styled(format!("  {} {:.1}", STAR, rating), theme.rating()));
    }

    spans
}
