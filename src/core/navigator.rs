//! # Questionnaire Navigator
//!
//! Drives one traversal of a category's question tree.
//!
//! ```text
//!               start(roots)            select(choice)
//! NotStarted ───────────────▶ AtQuestion ──────────────▶ AtRemedy
//!     ▲        (roots empty:       │  ▲                      │
//!     │         stays put)         │  └── follow-up / dead end
//!     └──────── reset() / back() ──┴─────────────────────────┘
//! ```
//!
//! `select` is only valid at a question. Calling it anywhere else is a bug
//! in the caller and returns [`NavigationError::InvalidStateTransition`]
//! without touching the state.
//!
//! Two modes cover behaviour the authored data leaves open:
//!
//! - [`BackNavigation`]: `Restart` sends `back()` to the start prompt;
//!   `History` walks back one answered question at a time.
//! - [`RootSequencing`]: `FirstOnly` only ever asks a category's first root
//!   question; `Sequential` moves on to the next root when the user picks an
//!   answer that leads nowhere.

use std::sync::Arc;

use clap::ValueEnum;
use log::{debug, error};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::model::{Choice, Outcome, Question, Remedy};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigatorState {
    NotStarted,
    AtQuestion(Arc<Question>),
    AtRemedy(Arc<Remedy>),
}

impl NavigatorState {
    pub fn name(&self) -> &'static str {
        match self {
            NavigatorState::NotStarted => "NotStarted",
            NavigatorState::AtQuestion(_) => "AtQuestion",
            NavigatorState::AtRemedy(_) => "AtRemedy",
        }
    }

    pub fn question(&self) -> Option<&Arc<Question>> {
        match self {
            NavigatorState::AtQuestion(q) => Some(q),
            _ => None,
        }
    }

    pub fn remedy(&self) -> Option<&Arc<Remedy>> {
        match self {
            NavigatorState::AtRemedy(r) => Some(r),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("cannot select an answer while {state}")]
    InvalidStateTransition { state: &'static str },

    #[error("answer {index} is out of range ({available} available)")]
    ChoiceOutOfRange { index: usize, available: usize },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BackNavigation {
    /// `back()` returns to the start prompt.
    #[default]
    Restart,
    /// `back()` returns to the previously answered question.
    History,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RootSequencing {
    /// Only the first root question is ever asked.
    #[default]
    FirstOnly,
    /// A dead-end answer moves on to the next root question.
    Sequential,
}

/// A question the user has answered, kept for `BackNavigation::History`.
#[derive(Debug, Clone)]
struct Frame {
    question: Arc<Question>,
    root_index: usize,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    state: NavigatorState,
    roots: Vec<Arc<Question>>,
    root_index: usize,
    history: Vec<Frame>,
    trail: Vec<String>,
    back_navigation: BackNavigation,
    root_sequencing: RootSequencing,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(BackNavigation::default(), RootSequencing::default())
    }
}

impl Navigator {
    pub fn new(back_navigation: BackNavigation, root_sequencing: RootSequencing) -> Self {
        Self {
            state: NavigatorState::NotStarted,
            roots: Vec::new(),
            root_index: 0,
            history: Vec::new(),
            trail: Vec::new(),
            back_navigation,
            root_sequencing,
        }
    }

    pub fn state(&self) -> &NavigatorState {
        &self.state
    }

    pub fn back_navigation(&self) -> BackNavigation {
        self.back_navigation
    }

    pub fn root_sequencing(&self) -> RootSequencing {
        self.root_sequencing
    }

    /// Labels of the answers that led to the current position.
    pub fn trail(&self) -> &[String] {
        &self.trail
    }

    /// Begin at `roots[0]`. An empty list leaves the navigator `NotStarted`.
    pub fn start(&mut self, roots: &[Arc<Question>]) -> &NavigatorState {
        self.clear();
        self.roots = roots.to_vec();
        if let Some(first) = self.roots.first() {
            debug!("Navigator starting at `{}`", first.id);
            self.state = NavigatorState::AtQuestion(first.clone());
        } else {
            debug!("Navigator start with no questions; staying NotStarted");
        }
        &self.state
    }

    /// Apply an answer. Remedy wins over follow-up; an answer with neither
    /// keeps the current question (or, in `Sequential` mode, moves to the
    /// next root question when there is one).
    pub fn select(&mut self, choice: &Choice) -> Result<&NavigatorState, NavigationError> {
        let current = match &self.state {
            NavigatorState::AtQuestion(q) => q.clone(),
            other => {
                let err = NavigationError::InvalidStateTransition { state: other.name() };
                error!("Navigator contract violation: {}", err);
                return Err(err);
            }
        };

        let next = match &choice.outcome {
            Some(Outcome::Remedy(remedy)) => {
                debug!("`{}` → remedy `{}`", current.id, remedy.id);
                NavigatorState::AtRemedy(remedy.clone())
            }
            Some(Outcome::FollowUp(question)) => {
                debug!("`{}` → question `{}`", current.id, question.id);
                NavigatorState::AtQuestion(question.clone())
            }
            None => match self.next_root() {
                Some((index, question)) => {
                    debug!("`{}` dead end → next root `{}`", current.id, question.id);
                    self.push_frame(current, &choice.label);
                    self.root_index = index;
                    self.state = NavigatorState::AtQuestion(question);
                    return Ok(&self.state);
                }
                None => {
                    debug!("`{}` dead end \"{}\"; staying put", current.id, choice.label);
                    return Ok(&self.state);
                }
            },
        };

        self.push_frame(current, &choice.label);
        self.state = next;
        Ok(&self.state)
    }

    /// Select the `index`-th answer of the current question.
    pub fn select_index(&mut self, index: usize) -> Result<&NavigatorState, NavigationError> {
        let question = match &self.state {
            NavigatorState::AtQuestion(q) => q.clone(),
            other => {
                let err = NavigationError::InvalidStateTransition { state: other.name() };
                error!("Navigator contract violation: {}", err);
                return Err(err);
            }
        };
        let choice = question
            .choices
            .get(index)
            .ok_or(NavigationError::ChoiceOutOfRange {
                index,
                available: question.choices.len(),
            })?;
        self.select(choice)
    }

    /// Back to `NotStarted` from anywhere. Idempotent.
    pub fn reset(&mut self) -> &NavigatorState {
        self.clear();
        self.roots.clear();
        &self.state
    }

    /// Step back according to the configured [`BackNavigation`].
    ///
    /// `Restart`: any started state returns to `NotStarted`. The roots stay
    /// loaded so the questionnaire can be started again.
    /// `History`: pop one answered question; popping past the first returns
    /// to `NotStarted`. `NotStarted` itself is left alone in both modes.
    pub fn back(&mut self) -> &NavigatorState {
        if self.state == NavigatorState::NotStarted {
            return &self.state;
        }
        match self.back_navigation {
            BackNavigation::Restart => {
                debug!("Navigator back: restart");
                self.clear();
            }
            BackNavigation::History => match self.history.pop() {
                Some(frame) => {
                    debug!("Navigator back to `{}`", frame.question.id);
                    self.trail.pop();
                    self.root_index = frame.root_index;
                    self.state = NavigatorState::AtQuestion(frame.question);
                }
                None => {
                    debug!("Navigator back past the first question");
                    self.clear();
                }
            },
        }
        &self.state
    }

    /// How many answers were taken to reach the current position.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Root question list the navigator was started with.
    pub fn roots(&self) -> &[Arc<Question>] {
        &self.roots
    }

    fn next_root(&self) -> Option<(usize, Arc<Question>)> {
        if self.root_sequencing != RootSequencing::Sequential {
            return None;
        }
        let index = self.root_index + 1;
        self.roots.get(index).map(|q| (index, q.clone()))
    }

    fn push_frame(&mut self, question: Arc<Question>, label: &str) {
        self.history.push(Frame {
            question,
            root_index: self.root_index,
        });
        self.trail.push(label.to_string());
    }

    fn clear(&mut self) {
        self.state = NavigatorState::NotStarted;
        self.root_index = 0;
        self.history.clear();
        self.trail.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{question, remedy, sample_tree};

    #[test]
    fn test_new_navigator_is_not_started() {
        let nav = Navigator::default();
        assert_eq!(nav.state(), &NavigatorState::NotStarted);
        assert!(nav.trail().is_empty());
    }

    #[test]
    fn test_start_empty_stays_not_started() {
        let mut nav = Navigator::default();
        assert_eq!(nav.start(&[]), &NavigatorState::NotStarted);
    }

    #[test]
    fn test_start_enters_first_root_only() {
        let tree = sample_tree();
        let mut nav = Navigator::default();
        nav.start(&[tree.root.clone(), tree.second_root.clone()]);
        assert_eq!(nav.state(), &NavigatorState::AtQuestion(tree.root.clone()));
    }

    #[test]
    fn test_select_remedy() {
        let tree = sample_tree();
        let mut nav = Navigator::default();
        nav.start(&[tree.root.clone()]);
        let state = nav.select(&tree.root.choices[0]).unwrap();
        assert_eq!(state, &NavigatorState::AtRemedy(tree.remedy.clone()));
        assert_eq!(nav.trail(), ["Sudden"]);
    }

    #[test]
    fn test_select_follow_up() {
        let tree = sample_tree();
        let mut nav = Navigator::default();
        nav.start(&[tree.root.clone()]);
        let state = nav.select(&tree.root.choices[1]).unwrap();
        assert_eq!(state, &NavigatorState::AtQuestion(tree.follow_up.clone()));
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_dead_end_keeps_question() {
        let tree = sample_tree();
        let mut nav = Navigator::default();
        nav.start(&[tree.root.clone(), tree.second_root.clone()]);
        let state = nav.select(&tree.root.choices[2]).unwrap();
        assert_eq!(state, &NavigatorState::AtQuestion(tree.root.clone()));
        assert!(nav.trail().is_empty());
    }

    #[test]
    fn test_select_outside_question_is_rejected() {
        let tree = sample_tree();
        let mut nav = Navigator::default();
        let err = nav.select(&tree.root.choices[0]).unwrap_err();
        assert_eq!(
            err,
            NavigationError::InvalidStateTransition { state: "NotStarted" }
        );
        assert_eq!(nav.state(), &NavigatorState::NotStarted);

        nav.start(&[tree.root.clone()]);
        nav.select(&tree.root.choices[0]).unwrap();
        let err = nav.select(&tree.root.choices[1]).unwrap_err();
        assert_eq!(err, NavigationError::InvalidStateTransition { state: "AtRemedy" });
        assert_eq!(nav.state(), &NavigatorState::AtRemedy(tree.remedy.clone()));
    }

    #[test]
    fn test_select_index_out_of_range() {
        let tree = sample_tree();
        let mut nav = Navigator::default();
        nav.start(&[tree.root.clone()]);
        let err = nav.select_index(9).unwrap_err();
        assert_eq!(err, NavigationError::ChoiceOutOfRange { index: 9, available: 3 });
        assert_eq!(nav.state(), &NavigatorState::AtQuestion(tree.root.clone()));
    }

    #[test]
    fn test_question_without_choices() {
        let empty = question("empty", vec![]);
        let mut nav = Navigator::default();
        nav.start(&[empty.clone()]);
        assert!(matches!(
            nav.select_index(0),
            Err(NavigationError::ChoiceOutOfRange { index: 0, available: 0 })
        ));
        assert_eq!(nav.state(), &NavigatorState::AtQuestion(empty));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let tree = sample_tree();
        let mut nav = Navigator::default();
        nav.start(&[tree.root.clone()]);
        nav.select(&tree.root.choices[0]).unwrap();
        assert_eq!(nav.reset(), &NavigatorState::NotStarted);
        assert_eq!(nav.reset(), &NavigatorState::NotStarted);
        assert!(nav.roots().is_empty());
        assert!(nav.trail().is_empty());
    }

    #[test]
    fn test_back_restart_from_remedy() {
        let tree = sample_tree();
        let mut nav = Navigator::default();
        nav.start(&[tree.root.clone()]);
        nav.select(&tree.root.choices[1]).unwrap();
        nav.select(&tree.follow_up.choices[0]).unwrap();
        assert_eq!(nav.back(), &NavigatorState::NotStarted);
        // Roots survive so the questionnaire can start again
        assert_eq!(nav.roots().len(), 1);
    }

    #[test]
    fn test_back_from_not_started_is_noop() {
        let mut nav = Navigator::new(BackNavigation::History, RootSequencing::FirstOnly);
        assert_eq!(nav.back(), &NavigatorState::NotStarted);
    }

    #[test]
    fn test_back_history_walks_answers() {
        let tree = sample_tree();
        let mut nav = Navigator::new(BackNavigation::History, RootSequencing::FirstOnly);
        nav.start(&[tree.root.clone()]);
        nav.select(&tree.root.choices[1]).unwrap();
        let state = nav.select(&tree.follow_up.choices[0]).unwrap();
        assert_eq!(state, &NavigatorState::AtRemedy(tree.other_remedy.clone()));
        assert_eq!(nav.trail().len(), 2);

        assert_eq!(nav.back(), &NavigatorState::AtQuestion(tree.follow_up.clone()));
        assert_eq!(nav.trail().len(), 1);
        assert_eq!(nav.back(), &NavigatorState::AtQuestion(tree.root.clone()));
        assert!(nav.trail().is_empty());
        assert_eq!(nav.back(), &NavigatorState::NotStarted);
    }

    #[test]
    fn test_sequential_dead_end_moves_to_next_root() {
        let tree = sample_tree();
        let mut nav = Navigator::new(BackNavigation::History, RootSequencing::Sequential);
        nav.start(&[tree.root.clone(), tree.second_root.clone()]);
        let state = nav.select(&tree.root.choices[2]).unwrap();
        assert_eq!(state, &NavigatorState::AtQuestion(tree.second_root.clone()));

        // Dead end on the last root stays put
        let dead = tree.second_root.choices[1].clone();
        assert!(dead.is_dead_end());
        assert_eq!(
            nav.select(&dead).unwrap(),
            &NavigatorState::AtQuestion(tree.second_root.clone())
        );

        // History remembers the root we came from
        assert_eq!(nav.back(), &NavigatorState::AtQuestion(tree.root.clone()));
        assert_eq!(
            nav.select(&tree.root.choices[2]).unwrap(),
            &NavigatorState::AtQuestion(tree.second_root.clone())
        );
    }

    #[test]
    fn test_restart_after_back() {
        let tree = sample_tree();
        let mut nav = Navigator::default();
        nav.start(&[tree.root.clone()]);
        nav.select(&tree.root.choices[0]).unwrap();
        nav.back();
        let roots = nav.roots().to_vec();
        assert_eq!(nav.start(&roots), &NavigatorState::AtQuestion(tree.root.clone()));
    }

    #[test]
    fn test_state_accessors() {
        let leaf = remedy("arnica");
        let state = NavigatorState::AtRemedy(leaf.clone());
        assert_eq!(state.remedy(), Some(&leaf));
        assert!(state.question().is_none());
        assert_eq!(state.name(), "AtRemedy");
    }
}
