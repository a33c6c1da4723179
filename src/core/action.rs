//! # Actions
//!
//! Everything that can happen in the guide becomes an `Action`.
//! User picks "Cough"? That's `Action::OpenCategory(CategoryKey::Cough)`.
//! User answers the second option? That's `Action::SelectChoice(1)`.
//!
//! The `update()` function takes the current state and an action,
//! then mutates the state in place. No I/O here; the TUI decides what
//! to do with the returned `Effect`.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```

use chrono::NaiveDate;
use log::{debug, warn};
use uuid::Uuid;

use crate::core::category::CategoryKey;
use crate::core::navigator::NavigatorState;
use crate::core::profile::RemedyHistory;
use crate::core::search::search;
use crate::core::state::{App, WELCOME_MESSAGE};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Show a category's start prompt. Abandons any running questionnaire.
    OpenCategory(CategoryKey),
    StartQuestionnaire,
    /// Answer the current question with the choice at this index.
    SelectChoice(usize),
    Back,
    /// Back to the active category's start prompt.
    Restart,
    /// Close the active category and return to the roster.
    LeaveCategory,
    Search(String),
    SetSubscribed(bool),
    AddChild {
        name: String,
        date_of_birth: NaiveDate,
    },
    RemoveChild(Uuid),
    /// Add the current remedy to a child's history.
    RecordRemedy {
        child: Uuid,
        notes: Option<String>,
    },
    Quit,
}

/// What the adapter should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::OpenCategory(key) => {
            app.navigator.reset();
            app.active_category = Some(key);
            app.status_message = if app.catalog.lookup(key).is_empty() {
                format!("No questionnaire for {} yet", key)
            } else {
                key.display_name().to_string()
            };
        }
        Action::StartQuestionnaire => {
            let Some(key) = app.active_category else {
                app.status_message = WELCOME_MESSAGE.to_string();
                return Effect::None;
            };
            let catalog = app.catalog.clone();
            let state = app.navigator.start(catalog.lookup(key));
            app.status_message = match state {
                NavigatorState::NotStarted => format!("No questionnaire for {} yet", key),
                _ => key.display_name().to_string(),
            };
        }
        Action::SelectChoice(index) => {
            let before = app.navigator.state().clone();
            let result = app.navigator.select_index(index).cloned();
            match result {
                Ok(NavigatorState::AtRemedy(remedy)) => {
                    app.status_message = format!("Suggested remedy: {}", remedy.name);
                }
                Ok(after) if after == before => {
                    app.status_message = "That answer has no follow-up; try another".to_string();
                }
                Ok(_) => {
                    app.status_message = active_name(app);
                }
                Err(e) => {
                    warn!("Ignoring selection {}: {}", index, e);
                    app.status_message = "Nothing to select here".to_string();
                }
            }
        }
        Action::Back => {
            let at_start = matches!(app.navigator.back(), NavigatorState::NotStarted);
            app.status_message = if at_start {
                active_name(app)
            } else {
                "Back to the previous question".to_string()
            };
        }
        Action::Restart => {
            app.navigator.reset();
            app.status_message = active_name(app);
        }
        Action::LeaveCategory => {
            app.navigator.reset();
            app.active_category = None;
            app.status_message = WELCOME_MESSAGE.to_string();
        }
        Action::Search(query) => {
            app.search_results = search(&app.catalog, &query);
            app.status_message = if query.trim().is_empty() {
                "Search remedies or symptoms".to_string()
            } else {
                match app.search_results.len() {
                    1 => "1 remedy matches".to_string(),
                    n => format!("{} remedies match", n),
                }
            };
            app.search_query = query;
        }
        Action::SetSubscribed(subscribed) => {
            app.profile.is_subscribed = subscribed;
            app.status_message = if subscribed {
                "Premium subscription on".to_string()
            } else {
                "Premium subscription off".to_string()
            };
        }
        Action::AddChild {
            name,
            date_of_birth,
        } => {
            app.status_message = match app.profile.add_child(&name, date_of_birth) {
                Ok(_) => format!("Added {}", name.trim()),
                Err(e) => format!("Could not add child: {}", e),
            };
        }
        Action::RemoveChild(id) => {
            app.status_message = match app.profile.remove_child(id) {
                Ok(child) => format!("Removed {}", child.name),
                Err(e) => format!("Could not remove child: {}", e),
            };
        }
        Action::RecordRemedy { child, notes } => {
            let Some(remedy) = app.navigator.state().remedy() else {
                app.status_message = "Finish a questionnaire first".to_string();
                return Effect::None;
            };
            let entry = RemedyHistory::new(
                remedy.name.clone(),
                app.navigator.trail().to_vec(),
                notes,
            );
            let remedy_name = entry.remedy_name.clone();
            app.status_message = match app.profile.record_remedy(child, entry) {
                Ok(()) => {
                    let name = app
                        .profile
                        .child(child)
                        .map(|c| c.name.as_str())
                        .unwrap_or("child");
                    format!("Recorded {} for {}", remedy_name, name)
                }
                Err(e) => format!("Could not record remedy: {}", e),
            };
        }
        Action::Quit => return Effect::Quit,
    }
    Effect::None
}

fn active_name(app: &App) -> String {
    app.active_category
        .map(|key| key.display_name().to_string())
        .unwrap_or_else(|| WELCOME_MESSAGE.to_string())
}
