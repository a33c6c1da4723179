//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::core::catalog::Catalog;
use crate::core::model::{Choice, Question, QuestionId, Remedy, RemedyId};
use crate::core::state::App;

/// A remedy with placeholder text fields.
pub fn remedy(id: &str) -> Arc<Remedy> {
    Arc::new(Remedy {
        id: RemedyId(id.to_string()),
        name: format!("Remedy {id}"),
        potency: "30C".to_string(),
        dosage: "3 pellets".to_string(),
        description: format!("Description of {id}"),
        key_indications: vec!["Indication".to_string()],
        warnings: vec!["Warning".to_string()],
    })
}

pub fn question(id: &str, choices: Vec<Choice>) -> Arc<Question> {
    Arc::new(Question {
        id: QuestionId(id.to_string()),
        prompt: format!("Prompt {id}"),
        choices,
    })
}

/// Hand-built tree covering every kind of edge.
///
/// ```text
/// root ── "Sudden"        → remedy
///      ── "Gradual"       → follow_up ── "Yes" → other_remedy
///      ── "None of these" → (dead end)
/// second_root ── "Thirsty" → remedy
///             ── "Unsure"  → (dead end)
/// ```
pub struct SampleTree {
    pub root: Arc<Question>,
    pub follow_up: Arc<Question>,
    pub second_root: Arc<Question>,
    pub remedy: Arc<Remedy>,
    pub other_remedy: Arc<Remedy>,
}

pub fn sample_tree() -> SampleTree {
    let leaf = remedy("aconite");
    let other = remedy("gelsemium");
    let follow_up = question("follow-up", vec![Choice::remedy("Yes", other.clone())]);
    let root = question(
        "root",
        vec![
            Choice::remedy("Sudden", leaf.clone()),
            Choice::follow_up("Gradual", follow_up.clone()),
            Choice::dead_end("None of these"),
        ],
    );
    let second_root = question(
        "second-root",
        vec![
            Choice::remedy("Thirsty", leaf.clone()),
            Choice::dead_end("Unsure"),
        ],
    );
    SampleTree {
        root,
        follow_up,
        second_root,
        remedy: leaf,
        other_remedy: other,
    }
}

/// Creates a test App over the bundled catalog with default modes.
pub fn test_app() -> App {
    App::new(Arc::new(
        Catalog::bundled().expect("bundled catalog must load"),
    ))
}

/// Every cell symbol of a `TestBackend` buffer, row after row.
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}
