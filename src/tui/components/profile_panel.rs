//! # Profile Panel Component
//!
//! Subscription status, the children list and the remedy history of the
//! highlighted child. `a` opens a one-line form (`Name, YYYY-MM-DD`); while it
//! is open every key edits the form.

use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::core::profile::{Child, UserProfile};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Events emitted by the profile panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEvent {
    ToggleSubscription,
    AddChild { name: String, date_of_birth: NaiveDate },
    /// The form could not be parsed; the message says why.
    InvalidForm(String),
    Remove(usize),
}

#[derive(Default)]
pub struct ProfilePanelState {
    pub selected: usize,
    pub list_state: ListState,
    /// Text of the add-child form, `None` while it is closed.
    pub form: Option<String>,
    pub confirm_delete: bool,
    /// Synced from `App::profile` before events are routed here.
    pub child_count: usize,
}

impl ProfilePanelState {
    pub fn form_open(&self) -> bool {
        self.form.is_some()
    }

    fn handle_form_event(&mut self, event: &TuiEvent) -> Option<ProfileEvent> {
        let form = self.form.as_mut()?;
        match event {
            TuiEvent::InputChar(c) => form.push(*c),
            TuiEvent::Paste(text) => form.extend(text.chars().filter(|c| !c.is_control())),
            TuiEvent::Backspace => {
                form.pop();
            }
            TuiEvent::Escape => self.form = None,
            TuiEvent::Submit => {
                return match parse_child_form(form) {
                    Ok((name, date_of_birth)) => {
                        self.form = None;
                        Some(ProfileEvent::AddChild {
                            name,
                            date_of_birth,
                        })
                    }
                    Err(message) => Some(ProfileEvent::InvalidForm(message)),
                };
            }
            _ => {}
        }
        None
    }
}

impl EventHandler for ProfilePanelState {
    type Event = ProfileEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ProfileEvent> {
        if self.form_open() {
            return self.handle_form_event(event);
        }

        // Reset delete confirmation on any non-delete key
        let is_delete_key = matches!(event, TuiEvent::InputChar('d'));
        if !is_delete_key {
            self.confirm_delete = false;
        }

        match event {
            TuiEvent::InputChar('s') => Some(ProfileEvent::ToggleSubscription),
            TuiEvent::InputChar('a') => {
                self.form = Some(String::new());
                None
            }
            TuiEvent::InputChar('d') => {
                if self.child_count == 0 {
                    return None;
                }
                if self.confirm_delete {
                    self.confirm_delete = false;
                    Some(ProfileEvent::Remove(self.selected))
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                if self.child_count > 0 {
                    self.selected = (self.selected + 1).min(self.child_count - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            _ => None,
        }
    }
}

/// Parse `Name, YYYY-MM-DD`.
pub fn parse_child_form(input: &str) -> Result<(String, NaiveDate), String> {
    let (name, date) = input
        .split_once(',')
        .ok_or_else(|| "Use the form: Name, YYYY-MM-DD".to_string())?;
    let date_of_birth = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| format!("\"{}\" is not a YYYY-MM-DD date", date.trim()))?;
    Ok((name.trim().to_string(), date_of_birth))
}

pub struct ProfilePanel<'a> {
    state: &'a mut ProfilePanelState,
    profile: &'a UserProfile,
}

impl<'a> ProfilePanel<'a> {
    pub fn new(state: &'a mut ProfilePanelState, profile: &'a UserProfile) -> Self {
        Self { state, profile }
    }

    fn plan_line(&self) -> Line<'static> {
        let plan = if self.profile.is_subscribed {
            Span::styled("Premium", Style::default().fg(Color::Green))
        } else {
            Span::styled("Free", Style::default().fg(Color::Gray))
        };
        Line::from(vec![
            Span::styled("Plan ", Style::default().fg(Color::DarkGray)),
            plan,
            Span::styled(
                format!(
                    "   Children {}/{}",
                    self.profile.children.len(),
                    self.profile.child_limit()
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    }

    fn render_children(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.state.confirm_delete {
            " Press d again to remove "
        } else {
            " Children "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title);

        if self.profile.children.is_empty() {
            let empty = Paragraph::new("No children yet. Press a to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .profile
            .children
            .iter()
            .map(|child| {
                ListItem::new(Line::from(vec![
                    Span::raw(child.name.as_str()),
                    Span::styled(
                        format!("  {}", child.date_of_birth.format("%Y-%m-%d")),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let selected = self.state.selected.min(self.profile.children.len() - 1);
        self.state.list_state.select(Some(selected));

        let highlight = if self.state.confirm_delete {
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        };
        let list = List::new(items).block(block).highlight_style(highlight);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }

    fn render_history(&self, frame: &mut Frame, area: Rect, child: Option<&Child>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Remedy history ")
            .padding(Padding::horizontal(1));

        let lines: Vec<Line> = match child {
            None => Vec::new(),
            Some(child) if child.remedy_history.is_empty() => vec![Line::styled(
                format!("Nothing recorded for {} yet", child.name),
                Style::default().fg(Color::DarkGray),
            )],
            Some(child) => child
                .remedy_history
                .iter()
                .rev()
                .flat_map(|entry| {
                    let mut lines = vec![Line::from(vec![
                        Span::styled(
                            entry.date_administered.format("%Y-%m-%d %H:%M").to_string(),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::raw("  "),
                        Span::styled(
                            entry.remedy_name.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ])];
                    if !entry.symptoms.is_empty() {
                        lines.push(Line::from(format!("  {}", entry.symptoms.join(" → "))));
                    }
                    if let Some(notes) = &entry.notes {
                        lines.push(Line::styled(
                            format!("  {notes}"),
                            Style::default().fg(Color::Cyan),
                        ));
                    }
                    lines
                })
                .collect(),
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

impl Component for ProfilePanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let form_height = if self.state.form_open() { 3 } else { 0 };
        let [plan_area, body_area, form_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(form_height),
        ])
        .areas(area);

        frame.render_widget(self.plan_line(), plan_area);

        let [children_area, history_area] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .areas(body_area);
        self.render_children(frame, children_area);

        let child = self
            .profile
            .children
            .get(self.state.selected.min(self.profile.children.len().saturating_sub(1)));
        self.render_history(frame, history_area, child);

        if let Some(form) = &self.state.form {
            let input = Paragraph::new(Line::from(vec![
                Span::styled("› ", Style::default().fg(Color::Cyan)),
                Span::raw(form.as_str()),
            ]))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" Add child: Name, YYYY-MM-DD ")
                    .padding(Padding::horizontal(1)),
            );
            frame.render_widget(input, form_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::RemedyHistory;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_text(state: &mut ProfilePanelState, text: &str) {
        for c in text.chars() {
            state.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_parse_child_form() {
        let (name, dob) = parse_child_form("  Mia , 2020-01-05").unwrap();
        assert_eq!(name, "Mia");
        assert_eq!(dob, NaiveDate::from_ymd_opt(2020, 1, 5).unwrap());

        assert!(parse_child_form("Mia").is_err());
        assert!(parse_child_form("Mia, 05/01/2020").is_err());
    }

    #[test]
    fn test_form_submits_add_child() {
        let mut state = ProfilePanelState::default();
        state.handle_event(&TuiEvent::InputChar('a'));
        assert!(state.form_open());

        // 's' goes into the form, not the subscription toggle
        type_text(&mut state, "Leo, 2019-03-02");
        let event = state.handle_event(&TuiEvent::Submit);
        assert_eq!(
            event,
            Some(ProfileEvent::AddChild {
                name: "Leo".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(2019, 3, 2).unwrap(),
            })
        );
        assert!(!state.form_open());
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let mut state = ProfilePanelState::default();
        state.handle_event(&TuiEvent::InputChar('a'));
        type_text(&mut state, "Leo");
        let event = state.handle_event(&TuiEvent::Submit);
        assert!(matches!(event, Some(ProfileEvent::InvalidForm(_))));
        assert!(state.form_open());

        state.handle_event(&TuiEvent::Escape);
        assert!(!state.form_open());
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut state = ProfilePanelState {
            child_count: 2,
            ..Default::default()
        };
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d')), None);
        assert!(state.confirm_delete);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('d')),
            Some(ProfileEvent::Remove(1))
        );

        state.handle_event(&TuiEvent::InputChar('d'));
        state.handle_event(&TuiEvent::CursorUp);
        assert!(!state.confirm_delete);
    }

    #[test]
    fn test_delete_ignored_without_children() {
        let mut state = ProfilePanelState::default();
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d')), None);
        assert!(!state.confirm_delete);
    }

    #[test]
    fn test_renders_children_and_history() {
        let mut profile = UserProfile::default();
        let id = profile
            .add_child("Mia", NaiveDate::from_ymd_opt(2020, 1, 5).unwrap())
            .unwrap();
        profile
            .record_remedy(
                id,
                RemedyHistory::new(
                    "Arnica Montana",
                    vec!["Bump or bruise".to_string()],
                    Some("Fell off bike".to_string()),
                ),
            )
            .unwrap();
        let mut state = ProfilePanelState {
            child_count: 1,
            ..Default::default()
        };

        let backend = TestBackend::new(100, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| ProfilePanel::new(&mut state, &profile).render(f, f.area()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Free"));
        assert!(text.contains("Children 1/1"));
        assert!(text.contains("Mia"));
        assert!(text.contains("Arnica Montana"));
        assert!(text.contains("Fell off bike"));
    }
}
