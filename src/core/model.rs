//! # Decision Tree Model
//!
//! The nodes and edges of a questionnaire.
//!
//! ```text
//! Question ──Choice──▶ Outcome::FollowUp(Question) ──Choice──▶ ...
//!          ──Choice──▶ Outcome::Remedy(Remedy)          (leaf)
//!          ──Choice──▶ (no outcome)                    (dead end)
//! ```
//!
//! Nodes are shared through `Arc`, so a question or remedy referenced from
//! several places in the catalog exists once in memory and a `Navigator`
//! can hold its position without borrowing from the catalog.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Stable identifier of a question within a catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

/// Stable identifier of a remedy within a catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RemedyId(pub String);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RemedyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A terminal recommendation. Has no outgoing edges.
#[derive(Debug, PartialEq, Eq)]
pub struct Remedy {
    pub id: RemedyId,
    pub name: String,
    pub potency: String,
    pub dosage: String,
    pub description: String,
    pub key_indications: Vec<String>,
    pub warnings: Vec<String>,
}

/// Where a choice leads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    FollowUp(Arc<Question>),
    Remedy(Arc<Remedy>),
}

/// A selectable answer to a question.
///
/// `outcome == None` is a dead end: authored data that leads nowhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub outcome: Option<Outcome>,
}

impl Choice {
    pub fn follow_up(label: impl Into<String>, question: Arc<Question>) -> Self {
        Self {
            label: label.into(),
            outcome: Some(Outcome::FollowUp(question)),
        }
    }

    pub fn remedy(label: impl Into<String>, remedy: Arc<Remedy>) -> Self {
        Self {
            label: label.into(),
            outcome: Some(Outcome::Remedy(remedy)),
        }
    }

    pub fn dead_end(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            outcome: None,
        }
    }

    pub fn is_dead_end(&self) -> bool {
        self.outcome.is_none()
    }
}

/// A node in the tree: a prompt and its ordered choices.
#[derive(Debug, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub choices: Vec<Choice>,
}

impl Question {
    /// Direct follow-up questions, in choice order.
    pub fn follow_ups(&self) -> impl Iterator<Item = &Arc<Question>> {
        self.choices.iter().filter_map(|choice| match &choice.outcome {
            Some(Outcome::FollowUp(next)) => Some(next),
            _ => None,
        })
    }

    /// Remedies this question resolves to directly, in choice order.
    pub fn remedies(&self) -> impl Iterator<Item = &Arc<Remedy>> {
        self.choices.iter().filter_map(|choice| match &choice.outcome {
            Some(Outcome::Remedy(remedy)) => Some(remedy),
            _ => None,
        })
    }
}
