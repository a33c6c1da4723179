//! # Category List Component
//!
//! The home screen roster. Follows the persistent state + transient wrapper
//! pattern:
//! - `CategoryListState` lives in `TuiState`
//! - `CategoryList` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};

use crate::core::category::{Category, CategoryKey};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub struct CategoryListState {
    pub selected: usize,
    pub list_state: ListState,
}

impl Default for CategoryListState {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryListState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected: 0,
            list_state,
        }
    }

    pub fn selected_key(&self) -> CategoryKey {
        CategoryKey::ALL[self.selected.min(CategoryKey::ALL.len() - 1)]
    }
}

impl EventHandler for CategoryListState {
    type Event = CategoryKey;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<CategoryKey> {
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(CategoryKey::ALL.len() - 1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => Some(self.selected_key()),
            TuiEvent::InputChar(c) => {
                let index = c.to_digit(10)? as usize;
                let key = CategoryKey::ALL.get(index.checked_sub(1)?)?;
                self.selected = index - 1;
                self.list_state.select(Some(self.selected));
                Some(*key)
            }
            _ => None,
        }
    }
}

pub struct CategoryList<'a> {
    roster: &'a [Category],
    state: &'a mut CategoryListState,
}

impl<'a> CategoryList<'a> {
    pub fn new(roster: &'a [Category], state: &'a mut CategoryListState) -> Self {
        Self { roster, state }
    }
}

impl Component for CategoryList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" What's bothering you? ")
            .title_alignment(Alignment::Left)
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = self
            .roster
            .iter()
            .enumerate()
            .map(|(i, category)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::raw(format!("{} ", category.icon)),
                    Span::raw(category.name),
                ]))
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
