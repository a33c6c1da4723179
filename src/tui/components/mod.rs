//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `TitleBar`: tab strip and status message
//! - `RemedyCard`: full detail of one remedy
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent `...State` structs live in `TuiState` and turn `TuiEvent`s into
//! component events; a transient wrapper borrows that state each frame to
//! render it:
//! - `CategoryList`: the home screen roster
//! - `QuestionnaireView`: start prompt, question, suggested remedy
//! - `SearchPanel`: query line, results, remedy card
//! - `ProfilePanel`: subscription, children, remedy history, add-child form
//!
//! Components receive external data as props instead of reaching into
//! `App`, so each one can be rendered against a `TestBackend` on its own.
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs
//! ├── category_list.rs
//! ├── questionnaire.rs
//! ├── remedy_card.rs
//! ├── search_panel.rs
//! └── profile_panel.rs
//! ```

pub mod category_list;
pub mod profile_panel;
pub mod questionnaire;
mod remedy_card;
pub mod search_panel;
mod title_bar;

pub use category_list::{CategoryList, CategoryListState};
pub use profile_panel::{ProfileEvent, ProfilePanel, ProfilePanelState};
pub use questionnaire::{QuestionnaireEvent, QuestionnaireState, QuestionnaireView};
pub use remedy_card::RemedyCard;
pub use search_panel::{SearchEvent, SearchPanel, SearchPanelState};
pub use title_bar::TitleBar;
