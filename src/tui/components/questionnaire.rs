//! # Questionnaire Component
//!
//! Everything the Home tab shows once a category is open: the start prompt,
//! the current question with its numbered answers, or the suggested remedy.
//!
//! Key handling depends on where the navigator is, so
//! `QuestionnaireState::handle_event` takes the navigator state as an extra
//! argument instead of implementing `EventHandler`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::core::category::CategoryKey;
use crate::core::model::Question;
use crate::core::navigator::NavigatorState;
use crate::tui::component::Component;
use crate::tui::components::RemedyCard;
use crate::tui::event::TuiEvent;

pub const START_PROMPT: &str = "Let's find the right remedy for you";

/// Events emitted by the questionnaire view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionnaireEvent {
    Start,
    Select(usize),
    Back,
    Restart,
    Leave,
    RecordRemedy,
}

#[derive(Default)]
pub struct QuestionnaireState {
    pub highlighted: usize,
    pub list_state: ListState,
}

impl QuestionnaireState {
    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        navigator: &NavigatorState,
    ) -> Option<QuestionnaireEvent> {
        if matches!(event, TuiEvent::Escape) {
            self.reset_highlight();
            return Some(QuestionnaireEvent::Leave);
        }

        let emitted = match navigator {
            NavigatorState::NotStarted => match event {
                TuiEvent::Submit => Some(QuestionnaireEvent::Start),
                _ => None,
            },
            NavigatorState::AtQuestion(question) => self.handle_question_key(event, question),
            NavigatorState::AtRemedy(_) => match event {
                TuiEvent::Backspace | TuiEvent::InputChar('b') => Some(QuestionnaireEvent::Back),
                TuiEvent::InputChar('r') => Some(QuestionnaireEvent::Restart),
                TuiEvent::InputChar('h') => Some(QuestionnaireEvent::RecordRemedy),
                _ => None,
            },
        };

        if matches!(
            emitted,
            Some(
                QuestionnaireEvent::Start
                    | QuestionnaireEvent::Select(_)
                    | QuestionnaireEvent::Back
                    | QuestionnaireEvent::Restart
            )
        ) {
            self.reset_highlight();
        }
        emitted
    }

    fn handle_question_key(
        &mut self,
        event: &TuiEvent,
        question: &Question,
    ) -> Option<QuestionnaireEvent> {
        let count = question.choices.len();
        match event {
            TuiEvent::CursorUp => {
                self.highlighted = self.highlighted.saturating_sub(1);
                self.list_state.select(Some(self.highlighted));
                None
            }
            TuiEvent::CursorDown => {
                if count > 0 {
                    self.highlighted = (self.highlighted + 1).min(count - 1);
                    self.list_state.select(Some(self.highlighted));
                }
                None
            }
            TuiEvent::Submit => Some(QuestionnaireEvent::Select(self.highlighted)),
            TuiEvent::Backspace | TuiEvent::InputChar('b') => Some(QuestionnaireEvent::Back),
            TuiEvent::InputChar('r') => Some(QuestionnaireEvent::Restart),
            TuiEvent::InputChar(c) => {
                let number = c.to_digit(10)? as usize;
                (1..=count)
                    .contains(&number)
                    .then_some(QuestionnaireEvent::Select(number - 1))
            }
            _ => None,
        }
    }

    fn reset_highlight(&mut self) {
        self.highlighted = 0;
        self.list_state.select(Some(0));
    }
}

/// Transient render wrapper for the questionnaire.
pub struct QuestionnaireView<'a> {
    category: CategoryKey,
    navigator: &'a NavigatorState,
    has_questionnaire: bool,
    depth: usize,
    state: &'a mut QuestionnaireState,
}

impl<'a> QuestionnaireView<'a> {
    pub fn new(
        category: CategoryKey,
        navigator: &'a NavigatorState,
        has_questionnaire: bool,
        depth: usize,
        state: &'a mut QuestionnaireState,
    ) -> Self {
        Self {
            category,
            navigator,
            has_questionnaire,
            depth,
            state,
        }
    }

    fn render_start(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::raw(format!("{} ", self.category.icon())),
            Span::styled(
                self.category.display_name(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);

        let lines = if self.has_questionnaire {
            vec![
                title,
                Line::default(),
                Line::from(START_PROMPT),
                Line::styled("Press Enter to start", Style::default().fg(Color::DarkGray)),
            ]
        } else {
            vec![
                title,
                Line::default(),
                Line::from(format!("No questionnaire for {} yet", self.category)),
                Line::styled("Press Esc to go back", Style::default().fg(Color::DarkGray)),
            ]
        };

        let height = lines.len() as u16;
        let [centered] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, centered);
    }

    fn render_question(&mut self, frame: &mut Frame, area: Rect, question: &Question) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(
                " {} · question {} ",
                self.category.display_name(),
                self.depth + 1
            ))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let prompt = Paragraph::new(Line::styled(
            question.prompt.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .wrap(Wrap { trim: true });
        // Word wrapping can spill one line past the estimate; the gap absorbs it.
        let prompt_height = (question.prompt.chars().count() as u16)
            .div_ceil(inner.width.max(1))
            .max(1)
            + 1;

        let [prompt_area, choices_area] =
            Layout::vertical([Constraint::Length(prompt_height), Constraint::Min(0)]).areas(inner);
        frame.render_widget(prompt, prompt_area);

        if question.choices.is_empty() {
            let empty = Paragraph::new("No answers available. Press b to go back.")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, choices_area);
            return;
        }

        let items: Vec<ListItem> = question
            .choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::raw(choice.label.as_str()),
                ]))
            })
            .collect();

        let highlighted = self
            .state
            .highlighted
            .min(question.choices.len().saturating_sub(1));
        self.state.list_state.select(Some(highlighted));

        let list = List::new(items).highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
        frame.render_stateful_widget(list, choices_area, &mut self.state.list_state);
    }
}

impl Component for QuestionnaireView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        match self.navigator {
            NavigatorState::NotStarted => self.render_start(frame, area),
            NavigatorState::AtQuestion(question) => {
                let question = question.clone();
                self.render_question(frame, area, &question);
            }
            NavigatorState::AtRemedy(remedy) => RemedyCard::new(remedy).render(frame, area),
        }
    }
}
