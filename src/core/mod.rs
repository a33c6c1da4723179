//! # Core Application Logic
//!
//! This module contains the guide's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Catalog (trees)      │
//!                    │  • Navigator (position) │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No UI. Pure.           │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`model`]: `Question`, `Choice`, `Remedy`, the nodes and edges of a tree
//! - [`category`]: the fixed category roster and its catalog keys
//! - [`catalog`]: loading and querying the question trees
//! - [`navigator`]: the traversal state machine for one questionnaire
//! - [`search`]: remedy lookup by name, description or indication
//! - [`profile`]: in-memory children and remedy history
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`config`]: layered configuration

pub mod action;
pub mod catalog;
pub mod category;
pub mod config;
pub mod model;
pub mod navigator;
pub mod profile;
pub mod search;
pub mod state;
