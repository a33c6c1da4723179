//! # Remedy Card
//!
//! Full detail of one remedy. Shown at the end of a questionnaire and next
//! to the search results.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::core::model::Remedy;
use crate::tui::component::Component;

pub struct RemedyCard<'a> {
    remedy: &'a Remedy,
}

impl<'a> RemedyCard<'a> {
    pub fn new(remedy: &'a Remedy) -> Self {
        Self { remedy }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let label = Style::default().fg(Color::DarkGray);
        let heading = Style::default().add_modifier(Modifier::BOLD);
        let remedy = self.remedy;

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Potency  ", label),
                Span::raw(remedy.potency.as_str()),
            ]),
            Line::from(vec![
                Span::styled("Dosage   ", label),
                Span::raw(remedy.dosage.as_str()),
            ]),
            Line::default(),
            Line::from(remedy.description.as_str()),
        ];

        if !remedy.key_indications.is_empty() {
            lines.push(Line::default());
            lines.push(Line::styled("Key indications", heading));
            lines.extend(
                remedy
                    .key_indications
                    .iter()
                    .map(|item| Line::from(format!("• {item}"))),
            );
        }

        if !remedy.warnings.is_empty() {
            lines.push(Line::default());
            lines.push(Line::styled("Warnings", heading.fg(Color::Yellow)));
            lines.extend(remedy.warnings.iter().map(|item| {
                Line::styled(format!("! {item}"), Style::default().fg(Color::Yellow))
            }));
        }

        lines
    }
}

impl Component for RemedyCard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(Span::styled(
                format!(" {} ", self.remedy.name),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::horizontal(1));

        let paragraph = Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
