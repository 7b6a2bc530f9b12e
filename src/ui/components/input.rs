use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::Theme;

/// Single-line text input; the cursor is a byte offset on a char boundary
#[derive(Debug, Default)]
pub struct Input {
    value: String,
    cursor: usize,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Clear the whole line
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    /// Render the input, drawing the cursor only when focused
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        theme: &Theme,
        focused: bool,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if focused { theme.highlight() } else { theme.border() })
            .title(title.to_string());

        let line = if focused {
            let (before, rest) = self.value.split_at(self.cursor);
            let mut chars = rest.chars();
            let cursor_char = chars.next().unwrap_or(' ');
            Line::from(vec![
                Span::styled(before.to_string(), theme.normal()),
                Span::styled(
                    cursor_char.to_string(),
                    Style::default().add_modifier(Modifier::REVERSED),
                ),
                Span::styled(chars.as_str().to_string(), theme.normal()),
            ])
        } else {
            Line::from(Span::styled(self.value.clone(), theme.normal()))
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing() {
        let mut input = Input::new();
        for c in "alen".chars() {
            input.insert(c);
        }
        input.move_left();
        input.move_left();
        input.insert('i');
        assert_eq!(input.value(), "alien");

        input.move_end();
        input.backspace();
        assert_eq!(input.value(), "alie");

        input.move_start();
        input.delete();
        assert_eq!(input.value(), "lie");
    }

    #[test]
    fn test_multibyte_cursor() {
        let mut input = Input::with_value("Amélie");
        input.move_left();
        input.move_left();
        input.move_left();
        input.backspace();
        assert_eq!(input.value(), "Amlie");

        input.move_right();
        input.insert('é');
        assert_eq!(input.value(), "Amléie");

        input.clear();
        assert_eq!(input.value(), "");
        input.backspace();
        input.move_left();
        assert_eq!(input.value(), "");
    }
}
