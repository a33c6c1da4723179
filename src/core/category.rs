//! # Category Roster
//!
//! The fixed set of complaint groupings a user can start from. Every
//! mapping here is an exhaustive `match`, so adding a category is a compile
//! error until its name, icon and catalog key are all spelled out.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Catalog key of a category. Serialized in kebab-case (`common-cold`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryKey {
    CommonCold,
    Cough,
    Allergies,
    Fever,
    Digestive,
    FirstAid,
}

impl CategoryKey {
    /// Every roster key, in display order.
    pub const ALL: [CategoryKey; 6] = [
        CategoryKey::CommonCold,
        CategoryKey::Cough,
        CategoryKey::Allergies,
        CategoryKey::Fever,
        CategoryKey::Digestive,
        CategoryKey::FirstAid,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            CategoryKey::CommonCold => "Common Cold",
            CategoryKey::Cough => "Cough",
            CategoryKey::Allergies => "Allergies",
            CategoryKey::Fever => "Fever",
            CategoryKey::Digestive => "Digestive",
            CategoryKey::FirstAid => "First Aid",
        }
    }

    /// Opaque icon reference; the TUI prints it as-is.
    pub fn icon(self) -> &'static str {
        match self {
            CategoryKey::CommonCold => "👃",
            CategoryKey::Cough => "🫁",
            CategoryKey::Allergies => "🌼",
            CategoryKey::Fever => "🌡",
            CategoryKey::Digestive => "💊",
            CategoryKey::FirstAid => "🩹",
        }
    }

    /// The key as written in catalog files.
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKey::CommonCold => "common-cold",
            CategoryKey::Cough => "cough",
            CategoryKey::Allergies => "allergies",
            CategoryKey::Fever => "fever",
            CategoryKey::Digestive => "digestive",
            CategoryKey::FirstAid => "first-aid",
        }
    }

    /// Parse a catalog-file key (`first-aid`).
    pub fn from_key(key: &str) -> Option<CategoryKey> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// Resolve a display name. Exact match only; unknown names give `None`.
    pub fn from_display_name(name: &str) -> Option<CategoryKey> {
        Self::ALL
            .into_iter()
            .find(|key| key.display_name() == name)
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A roster entry as shown on the home screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Category {
    pub key: CategoryKey,
    pub name: &'static str,
    pub icon: &'static str,
}

impl From<CategoryKey> for Category {
    fn from(key: CategoryKey) -> Self {
        Self {
            key,
            name: key.display_name(),
            icon: key.icon(),
        }
    }
}

/// The fixed roster, in display order.
pub fn roster() -> Vec<Category> {
    CategoryKey::ALL.into_iter().map(Category::from).collect()
}
