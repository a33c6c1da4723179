use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::navigator::NavigatorState;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{
    CategoryList, ProfilePanel, QuestionnaireView, SearchPanel, TitleBar,
};
use crate::tui::{Tab, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, footer_area] = layout.areas(frame.area());

    TitleBar::new(tui.tab, app.status_message.clone()).render(frame, title_area);

    match tui.tab {
        Tab::Home => match app.active_category {
            None => CategoryList::new(&app.roster, &mut tui.categories).render(frame, main_area),
            Some(key) => QuestionnaireView::new(
                key,
                app.navigator.state(),
                app.has_questionnaire(),
                app.navigator.depth(),
                &mut tui.questionnaire,
            )
            .render(frame, main_area),
        },
        Tab::Search => {
            SearchPanel::new(&mut tui.search, &app.search_results).render(frame, main_area)
        }
        Tab::Profile => {
            ProfilePanel::new(&mut tui.profile, &app.profile).render(frame, main_area)
        }
    }

    let hints = Line::styled(key_hints(app, tui), Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, footer_area);
}

/// Footer text for whatever currently has focus.
pub fn key_hints(app: &App, tui: &TuiState) -> &'static str {
    match tui.tab {
        Tab::Home => match (app.active_category, app.navigator.state()) {
            (None, _) => " ↑↓ Move  Enter Open  1-6 Pick  Tab Switch  q Quit ",
            (Some(_), NavigatorState::NotStarted) => " Enter Start  Esc Categories  q Quit ",
            (Some(_), NavigatorState::AtQuestion(_)) => {
                " ↑↓ Move  Enter/1-9 Answer  b Back  r Restart  Esc Categories "
            }
            (Some(_), NavigatorState::AtRemedy(_)) => {
                " h Record for child  b Back  r Restart  Esc Categories "
            }
        },
        Tab::Search => " Type to search  ↑↓ Move  Esc Clear  Tab Switch ",
        Tab::Profile if tui.profile.form_open() => " Enter Save  Esc Cancel ",
        Tab::Profile => " s Subscription  a Add child  d Remove  ↑↓ Move  Tab Switch ",
    }
}
