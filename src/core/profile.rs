//! # Family Profile
//!
//! Children the user is tracking and the remedies given to them. Lives in
//! memory for the length of the run; nothing here touches disk.
//!
//! ```text
//! UserProfile
//! ├── is_subscribed: bool
//! └── children: Vec<Child>
//!     └── remedy_history: Vec<RemedyHistory>
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use thiserror::Error;
use uuid::Uuid;

/// Children allowed without a subscription.
pub const FREE_CHILD_LIMIT: usize = 1;
/// Children allowed with a subscription.
pub const SUBSCRIBED_CHILD_LIMIT: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("child limit reached ({limit})")]
    ChildLimitReached { limit: usize },
    #[error("child name cannot be empty")]
    EmptyName,
    #[error("date of birth {0} is in the future")]
    BirthDateInFuture(NaiveDate),
    #[error("no child with id {0}")]
    UnknownChild(Uuid),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemedyHistory {
    pub id: Uuid,
    pub remedy_name: String,
    pub date_administered: DateTime<Utc>,
    pub symptoms: Vec<String>,
    pub notes: Option<String>,
}

impl RemedyHistory {
    pub fn new(remedy_name: impl Into<String>, symptoms: Vec<String>, notes: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            remedy_name: remedy_name.into(),
            date_administered: Utc::now(),
            symptoms,
            notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Child {
    pub id: Uuid,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub remedy_history: Vec<RemedyHistory>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub is_subscribed: bool,
    pub children: Vec<Child>,
}

impl UserProfile {
    pub fn new(is_subscribed: bool) -> Self {
        Self {
            is_subscribed,
            children: Vec::new(),
        }
    }

    pub fn child_limit(&self) -> usize {
        if self.is_subscribed {
            SUBSCRIBED_CHILD_LIMIT
        } else {
            FREE_CHILD_LIMIT
        }
    }

    pub fn can_add_more_children(&self) -> bool {
        self.children.len() < self.child_limit()
    }

    pub fn add_child(
        &mut self,
        name: &str,
        date_of_birth: NaiveDate,
    ) -> Result<Uuid, ProfileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if date_of_birth > Utc::now().date_naive() {
            return Err(ProfileError::BirthDateInFuture(date_of_birth));
        }
        if !self.can_add_more_children() {
            return Err(ProfileError::ChildLimitReached {
                limit: self.child_limit(),
            });
        }

        let child = Child {
            id: Uuid::new_v4(),
            name: name.to_string(),
            date_of_birth,
            remedy_history: Vec::new(),
        };
        let id = child.id;
        info!("Added child profile {}", id);
        self.children.push(child);
        Ok(id)
    }

    pub fn remove_child(&mut self, id: Uuid) -> Result<Child, ProfileError> {
        let index = self
            .children
            .iter()
            .position(|c| c.id == id)
            .ok_or(ProfileError::UnknownChild(id))?;
        info!("Removed child profile {}", id);
        Ok(self.children.remove(index))
    }

    pub fn child(&self, id: Uuid) -> Option<&Child> {
        self.children.iter().find(|c| c.id == id)
    }

    /// Append to a child's history, newest last.
    pub fn record_remedy(&mut self, child: Uuid, entry: RemedyHistory) -> Result<(), ProfileError> {
        let child = self
            .children
            .iter_mut()
            .find(|c| c.id == child)
            .ok_or(ProfileError::UnknownChild(child))?;
        info!("Recorded {} for child {}", entry.remedy_name, child.id);
        child.remedy_history.push(entry);
        Ok(())
    }
}
