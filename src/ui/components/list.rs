use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::ui::theme::{Theme, ARROW};

/// A selectable list component
pub struct SelectableList<T> {
    items: Vec<T>,
    selected: usize,
    state: ListState,
}

impl<T> SelectableList<T> {
    pub fn new(items: Vec<T>) -> Self {
        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }
        Self {
            items,
            selected: 0,
            state,
        }
    }

    /// Replace the items and reset the selection
    pub fn set_items(&mut self, items: Vec<T>) {
        *self = Self::new(items);
    }

    /// Move selection up, wrapping around
    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.items.len() - 1
        } else {
            self.selected - 1
        };
        self.state.select(Some(self.selected));
    }

    /// Move selection down, wrapping around
    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.items.len();
        self.state.select(Some(self.selected));
    }

    pub fn get_selected(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Render the list with a custom item renderer
    pub fn render<F>(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        theme: &Theme,
        focused: bool,
        render_item: F,
    ) where
        F: Fn(&T, bool) -> Vec<Span<'static>>,
    {
        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let is_selected = focused && i == self.selected;

                let mut spans = if is_selected {
                    vec![Span::styled(format!("{} ", ARROW), theme.selected())]
                } else {
                    vec![Span::raw("  ")]
                };
                spans.extend(render_item(item, is_selected));

                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if focused { theme.highlight() } else { theme.border() })
                .title(title.to_string()),
        );

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}

impl<T> Default for SelectableList<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
