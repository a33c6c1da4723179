//! # Search Panel Component
//!
//! Query line on top, matching remedies on the left, the highlighted
//! remedy's card on the right.
//!
//! Every printable key edits the query while this tab has focus, so `q`
//! does not quit from here. Esc clears the query.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::core::search::{MatchField, SearchHit};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::RemedyCard;
use crate::tui::event::TuiEvent;

/// Events emitted by the search panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    QueryChanged(String),
}

#[derive(Default)]
pub struct SearchPanelState {
    pub query: String,
    pub selected: usize,
    pub list_state: ListState,
    /// Synced from `App::search_results` before events are routed here.
    pub result_count: usize,
}

impl SearchPanelState {
    fn query_changed(&mut self) -> Option<SearchEvent> {
        self.selected = 0;
        self.list_state.select(Some(0));
        Some(SearchEvent::QueryChanged(self.query.clone()))
    }
}

impl EventHandler for SearchPanelState {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.query.push(*c);
                self.query_changed()
            }
            TuiEvent::Paste(text) => {
                self.query
                    .extend(text.chars().filter(|c| !c.is_control()));
                self.query_changed()
            }
            TuiEvent::Backspace => {
                self.query.pop()?;
                self.query_changed()
            }
            TuiEvent::Escape => {
                if self.query.is_empty() {
                    return None;
                }
                self.query.clear();
                self.query_changed()
            }
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                if self.result_count > 0 {
                    self.selected = (self.selected + 1).min(self.result_count - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            _ => None,
        }
    }
}

pub struct SearchPanel<'a> {
    state: &'a mut SearchPanelState,
    results: &'a [SearchHit],
}

impl<'a> SearchPanel<'a> {
    pub fn new(state: &'a mut SearchPanelState, results: &'a [SearchHit]) -> Self {
        Self { state, results }
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect) {
        let [list_area, card_area] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .areas(area);

        let items: Vec<ListItem> = self
            .results
            .iter()
            .map(|hit| {
                let categories = hit
                    .categories
                    .iter()
                    .map(|key| key.display_name())
                    .collect::<Vec<_>>()
                    .join(", ");
                ListItem::new(vec![
                    Line::from(vec![
                        Span::raw(hit.remedy.name.as_str()),
                        Span::styled(
                            format!("  {}", match_label(hit.matched)),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]),
                    Line::styled(format!("  {categories}"), Style::default().fg(Color::Cyan)),
                ])
            })
            .collect();

        let selected = self.state.selected.min(self.results.len() - 1);
        self.state.list_state.select(Some(selected));

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(format!(" {} found ", self.results.len())),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            );
        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);

        RemedyCard::new(&self.results[selected].remedy).render(frame, card_area);
    }
}

fn match_label(field: MatchField) -> &'static str {
    match field {
        MatchField::Name => "name",
        MatchField::Description => "description",
        MatchField::Indication => "indication",
    }
}

impl Component for SearchPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [query_area, body_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        let query = Paragraph::new(Line::from(vec![
            Span::styled("› ", Style::default().fg(Color::Cyan)),
            Span::raw(self.state.query.as_str()),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Search remedies or symptoms ")
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(query, query_area);

        if !self.results.is_empty() {
            self.render_results(frame, body_area);
            return;
        }

        let hint = if self.state.query.trim().is_empty() {
            "Type a remedy name or a symptom, e.g. \"bruise\" or \"thirst\""
        } else {
            "No remedies match"
        };
        let empty = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, body_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::core::search::search;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_typing_edits_query() {
        let mut state = SearchPanelState::default();
        state.handle_event(&TuiEvent::InputChar('a'));
        let event = state.handle_event(&TuiEvent::InputChar('q'));
        assert_eq!(event, Some(SearchEvent::QueryChanged("aq".to_string())));

        let event = state.handle_event(&TuiEvent::Backspace);
        assert_eq!(event, Some(SearchEvent::QueryChanged("a".to_string())));

        let event = state.handle_event(&TuiEvent::Escape);
        assert_eq!(event, Some(SearchEvent::QueryChanged(String::new())));
        assert_eq!(state.handle_event(&TuiEvent::Backspace), None);
        assert_eq!(state.handle_event(&TuiEvent::Escape), None);
    }

    #[test]
    fn test_paste_drops_newlines() {
        let mut state = SearchPanelState::default();
        state.handle_event(&TuiEvent::Paste("sore\nthroat".to_string()));
        assert_eq!(state.query, "sorethroat");
    }

    #[test]
    fn test_selection_clamps_to_results() {
        let mut state = SearchPanelState {
            result_count: 2,
            ..Default::default()
        };
        for _ in 0..5 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_renders_results_with_card() {
        let catalog = Catalog::bundled().unwrap();
        let results = search(&catalog, "arnica");
        let mut state = SearchPanelState {
            query: "arnica".to_string(),
            result_count: results.len(),
            ..Default::default()
        };
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| SearchPanel::new(&mut state, &results).render(f, f.area()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("1 found"));
        assert!(text.contains("Arnica Montana"));
        assert!(text.contains("First Aid"));
    }

    #[test]
    fn test_renders_no_match_hint() {
        let mut state = SearchPanelState {
            query: "zzzz".to_string(),
            ..Default::default()
        };
        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| SearchPanel::new(&mut state, &[]).render(f, f.area()))
            .unwrap();

        assert!(buffer_text(&terminal).contains("No remedies match"));
    }
}
