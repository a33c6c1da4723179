//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! ```text
//! crossterm Event ─▶ TuiEvent ─▶ focused component ─▶ component event ─▶ Action ─▶ update()
//! ```
//!
//! Ctrl+C, Tab and Shift+Tab are handled here before routing. `q` quits
//! unless the focused component is taking text (search query, add-child form).
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 250ms waiting for input and
//! only redraws after an event (resize included).

mod component;
mod components;
pub mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CategoryListState, ProfileEvent, ProfilePanelState, QuestionnaireEvent, QuestionnaireState,
    SearchEvent, SearchPanelState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Top-level screens, in tab-bar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Search,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Home, Tab::Search, Tab::Profile];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Search => "Search",
            Tab::Profile => "Profile",
        }
    }

    pub fn next(self) -> Tab {
        match self {
            Tab::Home => Tab::Search,
            Tab::Search => Tab::Profile,
            Tab::Profile => Tab::Home,
        }
    }

    pub fn prev(self) -> Tab {
        match self {
            Tab::Home => Tab::Profile,
            Tab::Search => Tab::Home,
            Tab::Profile => Tab::Search,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub tab: Tab,
    pub categories: CategoryListState,
    pub questionnaire: QuestionnaireState,
    pub search: SearchPanelState,
    pub profile: ProfilePanelState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            tab: Tab::Home,
            categories: CategoryListState::new(),
            questionnaire: QuestionnaireState::default(),
            search: SearchPanelState::default(),
            profile: ProfilePanelState::default(),
        }
    }

    /// True while the focused component consumes printable keys as text.
    fn is_typing(&self) -> bool {
        match self.tab {
            Tab::Search => true,
            Tab::Profile => self.profile.form_open(),
            Tab::Home => false,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste, Hide)?;
        info!("Terminal modes enabled (bracketed paste, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Show);
    }
}

pub fn run(mut app: App) -> std::io::Result<()> {
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    'main: loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(std::time::Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain everything pending before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, &event) == Effect::Quit {
                break 'main;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Route one event to whatever has focus and apply the resulting action.
pub fn handle_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    match event {
        TuiEvent::ForceQuit => return update(app, Action::Quit),
        TuiEvent::Resize => return Effect::None,
        TuiEvent::NextTab | TuiEvent::PrevTab if !tui.profile.form_open() => {
            tui.tab = if matches!(event, TuiEvent::NextTab) {
                tui.tab.next()
            } else {
                tui.tab.prev()
            };
            debug!("Switched to tab {:?}", tui.tab);
            return Effect::None;
        }
        TuiEvent::InputChar('q') if !tui.is_typing() => return update(app, Action::Quit),
        _ => {}
    }

    match tui.tab {
        Tab::Home => handle_home_event(app, tui, event),
        Tab::Search => {
            tui.search.result_count = app.search_results.len();
            match tui.search.handle_event(event) {
                Some(SearchEvent::QueryChanged(query)) => update(app, Action::Search(query)),
                None => Effect::None,
            }
        }
        Tab::Profile => handle_profile_event(app, tui, event),
    }
}

fn handle_home_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    if app.active_category.is_none() {
        return match tui.categories.handle_event(event) {
            Some(key) => update(app, Action::OpenCategory(key)),
            None => Effect::None,
        };
    }

    let Some(questionnaire_event) = tui.questionnaire.handle_event(event, app.navigator.state())
    else {
        return Effect::None;
    };

    let action = match questionnaire_event {
        QuestionnaireEvent::Start => Action::StartQuestionnaire,
        QuestionnaireEvent::Select(index) => Action::SelectChoice(index),
        QuestionnaireEvent::Back => Action::Back,
        QuestionnaireEvent::Restart => Action::Restart,
        QuestionnaireEvent::Leave => Action::LeaveCategory,
        QuestionnaireEvent::RecordRemedy => {
            let selected = tui.profile.selected;
            match app.profile.children.get(selected) {
                Some(child) => Action::RecordRemedy {
                    child: child.id,
                    notes: None,
                },
                None => {
                    app.status_message = "Add a child on the Profile tab first".to_string();
                    return Effect::None;
                }
            }
        }
    };
    update(app, action)
}

fn handle_profile_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    tui.profile.child_count = app.profile.children.len();
    let Some(profile_event) = tui.profile.handle_event(event) else {
        return Effect::None;
    };

    let effect = match profile_event {
        ProfileEvent::ToggleSubscription => {
            let subscribed = !app.profile.is_subscribed;
            update(app, Action::SetSubscribed(subscribed))
        }
        ProfileEvent::AddChild {
            name,
            date_of_birth,
        } => update(
            app,
            Action::AddChild {
                name,
                date_of_birth,
            },
        ),
        ProfileEvent::InvalidForm(message) => {
            app.status_message = message;
            Effect::None
        }
        ProfileEvent::Remove(index) => match app.profile.children.get(index) {
            Some(child) => {
                let id = child.id;
                update(app, Action::RemoveChild(id))
            }
            None => Effect::None,
        },
    };

    // Keep the highlight on a child that still exists
    let count = app.profile.children.len();
    tui.profile.child_count = count;
    tui.profile.selected = tui.profile.selected.min(count.saturating_sub(1));
    effect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::category::CategoryKey;
    use crate::core::navigator::NavigatorState;
    use crate::test_support::test_app;

    fn press(app: &mut App, tui: &mut TuiState, events: &[TuiEvent]) -> Effect {
        let mut effect = Effect::None;
        for event in events {
            effect = handle_event(app, tui, event);
        }
        effect
    }

    fn chars(text: &str) -> Vec<TuiEvent> {
        text.chars().map(TuiEvent::InputChar).collect()
    }

    #[test]
    fn test_tab_cycles() {
        assert_eq!(Tab::Home.next().next().next(), Tab::Home);
        assert_eq!(Tab::Home.prev(), Tab::Profile);
    }

    #[test]
    fn test_q_quits_from_home() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(
            press(&mut app, &mut tui, &[TuiEvent::InputChar('q')]),
            Effect::Quit
        );
    }

    #[test]
    fn test_ctrl_c_quits_while_typing() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        tui.tab = Tab::Search;
        assert_eq!(
            press(&mut app, &mut tui, &[TuiEvent::ForceQuit]),
            Effect::Quit
        );
    }

    #[test]
    fn test_keyboard_walk_to_remedy() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        // Cough is second in the roster
        press(
            &mut app,
            &mut tui,
            &[TuiEvent::CursorDown, TuiEvent::Submit, TuiEvent::Submit],
        );
        assert_eq!(app.active_category, Some(CategoryKey::Cough));
        assert!(app.navigator.state().question().is_some());

        press(&mut app, &mut tui, &[TuiEvent::InputChar('1')]);
        assert_eq!(app.navigator.state().remedy().unwrap().name, "Drosera");

        press(&mut app, &mut tui, &[TuiEvent::InputChar('r')]);
        assert_eq!(app.navigator.state(), &NavigatorState::NotStarted);

        press(&mut app, &mut tui, &[TuiEvent::Escape]);
        assert!(app.active_category.is_none());
    }

    #[test]
    fn test_search_tab_takes_q_as_text() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        press(&mut app, &mut tui, &[TuiEvent::NextTab]);
        assert_eq!(tui.tab, Tab::Search);

        let effect = press(&mut app, &mut tui, &chars("arniq"));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.search_query, "arniq");

        press(&mut app, &mut tui, &[TuiEvent::Backspace, TuiEvent::InputChar('c'), TuiEvent::InputChar('a')]);
        assert_eq!(app.search_query, "arnica");
        assert_eq!(app.search_results.len(), 1);
    }

    #[test]
    fn test_profile_add_child_and_record() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        press(&mut app, &mut tui, &[TuiEvent::PrevTab]);
        assert_eq!(tui.tab, Tab::Profile);

        press(&mut app, &mut tui, &[TuiEvent::InputChar('a')]);
        // Tab is swallowed while the form is open
        press(&mut app, &mut tui, &[TuiEvent::NextTab]);
        assert_eq!(tui.tab, Tab::Profile);
        press(&mut app, &mut tui, &chars("Mia, 2020-01-05"));
        press(&mut app, &mut tui, &[TuiEvent::Submit]);
        assert_eq!(app.profile.children.len(), 1);
        assert_eq!(app.status_message, "Added Mia");

        // Back to Home, finish First Aid → Arnica, record it
        press(&mut app, &mut tui, &[TuiEvent::NextTab]);
        assert_eq!(tui.tab, Tab::Home);
        press(&mut app, &mut tui, &[TuiEvent::InputChar('6'), TuiEvent::Submit]);
        press(&mut app, &mut tui, &[TuiEvent::InputChar('1')]);
        assert!(app.navigator.state().remedy().is_some());
        press(&mut app, &mut tui, &[TuiEvent::InputChar('h')]);
        assert_eq!(app.profile.children[0].remedy_history.len(), 1);
    }

    #[test]
    fn test_record_without_child_sets_status() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        press(
            &mut app,
            &mut tui,
            &[
                TuiEvent::InputChar('6'),
                TuiEvent::Submit,
                TuiEvent::InputChar('1'),
                TuiEvent::InputChar('h'),
            ],
        );
        assert_eq!(app.status_message, "Add a child on the Profile tab first");
    }

    #[test]
    fn test_invalid_form_reports_in_status() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        tui.tab = Tab::Profile;
        press(&mut app, &mut tui, &[TuiEvent::InputChar('a')]);
        press(&mut app, &mut tui, &chars("Mia"));
        press(&mut app, &mut tui, &[TuiEvent::Submit]);
        assert!(app.profile.children.is_empty());
        assert!(app.status_message.contains("Name, YYYY-MM-DD"));
    }

    #[test]
    fn test_remove_child_twice_d() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        tui.tab = Tab::Profile;
        press(&mut app, &mut tui, &[TuiEvent::InputChar('s')]);
        assert!(app.profile.is_subscribed);
        for form in ["Mia, 2020-01-05", "Leo, 2019-03-02"] {
            press(&mut app, &mut tui, &[TuiEvent::InputChar('a')]);
            press(&mut app, &mut tui, &chars(form));
            press(&mut app, &mut tui, &[TuiEvent::Submit]);
        }
        assert_eq!(app.profile.children.len(), 2);

        press(
            &mut app,
            &mut tui,
            &[
                TuiEvent::CursorDown,
                TuiEvent::InputChar('d'),
                TuiEvent::InputChar('d'),
            ],
        );
        assert_eq!(app.profile.children.len(), 1);
        assert_eq!(app.profile.children[0].name, "Mia");
        assert_eq!(tui.profile.selected, 0);
    }
}
