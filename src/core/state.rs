//! # Application State
//!
//! Core business state for the guide. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── catalog: Arc<Catalog>               // read-only question trees
//! ├── roster: Vec<Category>               // home screen categories
//! ├── active_category: Option<CategoryKey>
//! ├── navigator: Navigator                // questionnaire position
//! ├── profile: UserProfile                // children + remedy history
//! ├── search_query: String
//! ├── search_results: Vec<SearchHit>
//! └── status_message: String              // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::catalog::Catalog;
use crate::core::category::{Category, CategoryKey, roster};
use crate::core::config::ResolvedConfig;
use crate::core::navigator::Navigator;
use crate::core::profile::UserProfile;
use crate::core::search::SearchHit;

pub const WELCOME_MESSAGE: &str = "Pick a category to begin";

pub struct App {
    pub catalog: Arc<Catalog>,
    pub roster: Vec<Category>,
    pub active_category: Option<CategoryKey>,
    pub navigator: Navigator,
    pub profile: UserProfile,
    pub search_query: String,
    pub search_results: Vec<SearchHit>,
    pub status_message: String,
}

impl App {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            roster: roster(),
            active_category: None,
            navigator: Navigator::default(),
            profile: UserProfile::default(),
            search_query: String::new(),
            search_results: Vec::new(),
            status_message: WELCOME_MESSAGE.to_string(),
        }
    }

    pub fn from_config(catalog: Arc<Catalog>, config: &ResolvedConfig) -> Self {
        Self {
            navigator: Navigator::new(config.back_navigation, config.root_sequencing),
            profile: UserProfile::new(config.subscribed),
            ..Self::new(catalog)
        }
    }

    /// True when the active category has at least one root question.
    pub fn has_questionnaire(&self) -> bool {
        self.active_category
            .is_some_and(|key| !self.catalog.lookup(key).is_empty())
    }
}
