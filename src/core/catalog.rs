//! # Remedy Catalog
//!
//! The static mapping from category to its question tree.
//!
//! Content lives in a TOML document (see `assets/catalog.toml`, embedded at
//! compile time). Loading happens once, eagerly, in two steps:
//!
//! ```text
//! TOML text ──toml──▶ CatalogDocument ──resolve refs──▶ Catalog
//!                     (flat records,                    (Arc-linked trees,
//!                      string ids)                       read-only)
//! ```
//!
//! Resolution checks every reference, rejects duplicate ids and cycles, and
//! verifies that each roster category has a questionnaire. In strict mode
//! authoring slips (empty questions, options that set both `next` and
//! `remedy`, missing categories) are errors; in lenient mode they are logged
//! and fixed up.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::category::CategoryKey;
use crate::core::model::{Choice, Outcome, Question, QuestionId, Remedy, RemedyId};

const BUNDLED_CATALOG: &str = include_str!("../../assets/catalog.toml");

/// Longest question chain a catalog may contain.
pub const MAX_QUESTION_DEPTH: usize = 64;

// ============================================================================
// Document Records (the on-disk shape)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    #[serde(default)]
    pub remedies: Vec<RemedyRecord>,
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
    /// Category key (`common-cold`) → ordered root question ids.
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<QuestionId>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemedyRecord {
    pub id: RemedyId,
    pub name: String,
    pub potency: String,
    pub dosage: String,
    pub description: String,
    #[serde(default)]
    pub key_indications: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<OptionRecord>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OptionRecord {
    pub label: String,
    pub next: Option<QuestionId>,
    pub remedy: Option<RemedyId>,
}

impl CatalogDocument {
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(text)?)
    }

    /// The document embedded in the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::parse(BUNDLED_CATALOG)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown category key `{0}`")]
    UnknownCategory(String),

    #[error("category `{}` has no questionnaire", .0.as_str())]
    MissingCategory(CategoryKey),

    #[error("duplicate question id `{0}`")]
    DuplicateQuestion(QuestionId),

    #[error("duplicate remedy id `{0}`")]
    DuplicateRemedy(RemedyId),

    #[error("{referenced_by} refers to unknown question `{id}`")]
    UnknownQuestion { referenced_by: String, id: QuestionId },

    #[error("question `{question}` refers to unknown remedy `{id}`")]
    UnknownRemedy { question: QuestionId, id: RemedyId },

    #[error("question `{0}` has no options")]
    EmptyQuestion(QuestionId),

    #[error("option \"{label}\" of question `{question}` sets both `next` and `remedy`")]
    AmbiguousChoice { question: QuestionId, label: String },

    #[error("question `{0}` is part of a reference cycle")]
    Cycle(QuestionId),

    #[error("question `{id}` starts a chain deeper than {limit} questions")]
    TooDeep { id: QuestionId, limit: usize },
}

// ============================================================================
// Loading
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Reject authoring slips instead of logging and fixing them up.
    pub strict: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl LoadOptions {
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

/// Turns flat question records into shared `Arc<Question>` trees.
struct Resolver<'a> {
    records: HashMap<&'a QuestionId, &'a QuestionRecord>,
    remedies: &'a HashMap<RemedyId, Arc<Remedy>>,
    built: HashMap<QuestionId, Arc<Question>>,
    /// Longest chain below each built question, itself included.
    heights: HashMap<QuestionId, usize>,
    in_progress: HashSet<QuestionId>,
    options: LoadOptions,
}

impl<'a> Resolver<'a> {
    fn resolve(
        &mut self,
        id: &QuestionId,
        referenced_by: &str,
    ) -> Result<Arc<Question>, CatalogError> {
        if let Some(question) = self.built.get(id) {
            return Ok(question.clone());
        }
        if self.in_progress.contains(id) {
            return Err(CatalogError::Cycle(id.clone()));
        }
        if self.in_progress.len() >= MAX_QUESTION_DEPTH {
            return Err(CatalogError::TooDeep {
                id: id.clone(),
                limit: MAX_QUESTION_DEPTH,
            });
        }
        self.in_progress.insert(id.clone());

        let record = *self
            .records
            .get(id)
            .ok_or_else(|| CatalogError::UnknownQuestion {
                referenced_by: referenced_by.to_string(),
                id: id.clone(),
            })?;

        if record.options.is_empty() {
            if self.options.strict {
                return Err(CatalogError::EmptyQuestion(id.clone()));
            }
            warn!("Question `{}` has no options", id);
        }

        let referrer = format!("question `{}`", id);
        let mut choices = Vec::with_capacity(record.options.len());
        for option in &record.options {
            let outcome = match (&option.remedy, &option.next) {
                (Some(remedy), Some(_)) => {
                    if self.options.strict {
                        return Err(CatalogError::AmbiguousChoice {
                            question: id.clone(),
                            label: option.label.clone(),
                        });
                    }
                    warn!(
                        "Option \"{}\" of question `{}` sets both next and remedy; using the remedy",
                        option.label, id
                    );
                    Some(Outcome::Remedy(self.remedy(id, remedy)?))
                }
                (Some(remedy), None) => Some(Outcome::Remedy(self.remedy(id, remedy)?)),
                (None, Some(next)) => Some(Outcome::FollowUp(self.resolve(next, &referrer)?)),
                (None, None) => {
                    debug!("Option \"{}\" of question `{}` is a dead end", option.label, id);
                    None
                }
            };
            choices.push(Choice {
                label: option.label.clone(),
                outcome,
            });
        }

        let height = 1 + choices
            .iter()
            .filter_map(|choice| match &choice.outcome {
                Some(Outcome::FollowUp(next)) => self.heights.get(&next.id).copied(),
                _ => None,
            })
            .max()
            .unwrap_or(0);
        if height > MAX_QUESTION_DEPTH {
            return Err(CatalogError::TooDeep {
                id: id.clone(),
                limit: MAX_QUESTION_DEPTH,
            });
        }

        self.in_progress.remove(id);
        self.heights.insert(id.clone(), height);
        let question = Arc::new(Question {
            id: id.clone(),
            prompt: record.prompt.clone(),
            choices,
        });
        self.built.insert(id.clone(), question.clone());
        Ok(question)
    }

    fn remedy(&self, question: &QuestionId, id: &RemedyId) -> Result<Arc<Remedy>, CatalogError> {
        self.remedies
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownRemedy {
                question: question.clone(),
                id: id.clone(),
            })
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Read-only after construction. Share it as `Arc<Catalog>`.
#[derive(Debug, Default)]
pub struct Catalog {
    categories: BTreeMap<CategoryKey, Vec<Arc<Question>>>,
    remedies: Vec<Arc<Remedy>>,
}

impl Catalog {
    /// The catalog embedded in the binary, loaded strictly.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_document(CatalogDocument::bundled()?, LoadOptions::default())
    }

    pub fn from_toml(text: &str, options: LoadOptions) -> Result<Self, CatalogError> {
        Self::from_document(CatalogDocument::parse(text)?, options)
    }

    pub fn load_file(path: &Path, options: LoadOptions) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml(&text, options)?;
        info!("Loaded catalog from {}", path.display());
        Ok(catalog)
    }

    pub fn from_document(
        document: CatalogDocument,
        options: LoadOptions,
    ) -> Result<Self, CatalogError> {
        let mut remedy_index = HashMap::with_capacity(document.remedies.len());
        let mut remedies = Vec::with_capacity(document.remedies.len());
        for record in document.remedies {
            let remedy = Arc::new(Remedy {
                id: record.id,
                name: record.name,
                potency: record.potency,
                dosage: record.dosage,
                description: record.description,
                key_indications: record.key_indications,
                warnings: record.warnings,
            });
            if remedy_index.insert(remedy.id.clone(), remedy.clone()).is_some() {
                return Err(CatalogError::DuplicateRemedy(remedy.id.clone()));
            }
            remedies.push(remedy);
        }

        let mut records = HashMap::with_capacity(document.questions.len());
        for record in &document.questions {
            if records.insert(&record.id, record).is_some() {
                return Err(CatalogError::DuplicateQuestion(record.id.clone()));
            }
        }

        let mut resolver = Resolver {
            records,
            remedies: &remedy_index,
            built: HashMap::new(),
            heights: HashMap::new(),
            in_progress: HashSet::new(),
            options,
        };

        let mut categories = BTreeMap::new();
        for (raw_key, root_ids) in &document.categories {
            let key = CategoryKey::from_key(raw_key)
                .ok_or_else(|| CatalogError::UnknownCategory(raw_key.clone()))?;
            let referrer = format!("category `{}`", raw_key);
            let roots = root_ids
                .iter()
                .map(|id| resolver.resolve(id, &referrer))
                .collect::<Result<Vec<_>, _>>()?;
            categories.insert(key, roots);
        }

        for key in CategoryKey::ALL {
            let has_roots = categories.get(&key).is_some_and(|roots| !roots.is_empty());
            if !has_roots {
                if options.strict {
                    return Err(CatalogError::MissingCategory(key));
                }
                warn!("Category `{}` has no questionnaire", key.as_str());
            }
        }

        for record in &document.questions {
            if !resolver.built.contains_key(&record.id) {
                warn!("Question `{}` is not reachable from any category", record.id);
            }
        }

        let catalog = Self {
            categories,
            remedies,
        };
        info!("Catalog ready: {}", catalog.summary());
        Ok(catalog)
    }

    /// Root questions for `key`, in authored order. Empty when the category
    /// has no questionnaire.
    pub fn lookup(&self, key: CategoryKey) -> &[Arc<Question>] {
        self.categories
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Like [`Catalog::lookup`], keyed by display name ("First Aid").
    pub fn lookup_name(&self, display_name: &str) -> &[Arc<Question>] {
        match CategoryKey::from_display_name(display_name) {
            Some(key) => self.lookup(key),
            None => {
                debug!("No category named {:?}", display_name);
                &[]
            }
        }
    }

    /// All remedies, in authored order.
    pub fn remedies(&self) -> &[Arc<Remedy>] {
        &self.remedies
    }

    pub fn remedy(&self, id: &RemedyId) -> Option<&Arc<Remedy>> {
        self.remedies.iter().find(|remedy| &remedy.id == id)
    }

    /// Every question reachable from the category's roots, depth-first,
    /// each listed once.
    pub fn reachable_questions(&self, key: CategoryKey) -> Vec<Arc<Question>> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut stack: Vec<Arc<Question>> = self.lookup(key).iter().rev().cloned().collect();
        while let Some(question) = stack.pop() {
            if !seen.insert(question.id.clone()) {
                continue;
            }
            let mut follow_ups: Vec<_> = question.follow_ups().cloned().collect();
            follow_ups.reverse();
            stack.extend(follow_ups);
            out.push(question);
        }
        out
    }

    /// Longest chain of questions from any root of `key`. Zero when empty.
    pub fn max_depth(&self, key: CategoryKey) -> usize {
        fn depth(question: &Question, memo: &mut HashMap<QuestionId, usize>) -> usize {
            if let Some(&known) = memo.get(&question.id) {
                return known;
            }
            let below = question
                .follow_ups()
                .map(|next| depth(next, memo))
                .max()
                .unwrap_or(0);
            memo.insert(question.id.clone(), below + 1);
            below + 1
        }
        let mut memo = HashMap::new();
        self.lookup(key)
            .iter()
            .map(|root| depth(root, &mut memo))
            .max()
            .unwrap_or(0)
    }

    /// Categories whose questionnaire can end at the given remedy.
    pub fn categories_for(&self, remedy: &RemedyId) -> Vec<CategoryKey> {
        self.categories
            .keys()
            .copied()
            .filter(|key| {
                self.reachable_questions(*key)
                    .iter()
                    .any(|q| q.remedies().any(|r| &r.id == remedy))
            })
            .collect()
    }

    pub fn summary(&self) -> CatalogSummary {
        let mut question_ids = HashSet::new();
        let mut max_depth = 0;
        for key in self.categories.keys() {
            question_ids.extend(self.reachable_questions(*key).into_iter().map(|q| q.id.clone()));
            max_depth = max_depth.max(self.max_depth(*key));
        }
        CatalogSummary {
            categories: self.categories.values().filter(|r| !r.is_empty()).count(),
            questions: question_ids.len(),
            remedies: self.remedies.len(),
            max_depth,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSummary {
    pub categories: usize,
    pub questions: usize,
    pub remedies: usize,
    pub max_depth: usize,
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} categories, {} questions, {} remedies, max depth {}",
            self.categories, self.questions, self.remedies, self.max_depth
        )
    }
}
