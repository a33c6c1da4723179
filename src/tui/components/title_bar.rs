//! # TitleBar Component
//!
//! Top line of the screen: the tab strip on the left and the current status
//! message after it.
//!
//! ```text
//!  Home  Search  Profile  │ Suggested remedy: Drosera
//! ```
//!
//! Stateless. All data arrives as props, so it is trivial to test with a
//! `TestBackend`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::Tab;
use crate::tui::component::Component;

pub struct TitleBar {
    pub active_tab: Tab,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(active_tab: Tab, status_message: String) -> Self {
        Self {
            active_tab,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for tab in Tab::ALL {
            let style = if tab == self.active_tab {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} ", tab.title()), style));
            spans.push(Span::raw(" "));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::raw(self.status_message.clone()));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
