//! # Remedy Search
//!
//! Case-insensitive lookup over the catalog's remedies. Every whitespace
//! separated term must appear in the remedy's name, description or one of
//! its key indications. Remedies whose name matches sort first; the rest
//! are alphabetical.

use std::sync::Arc;

use crate::core::catalog::Catalog;
use crate::core::category::CategoryKey;
use crate::core::model::Remedy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchField {
    Name,
    Description,
    Indication,
}

#[derive(Debug, Clone)]
pub struct SearchHit {
    pub remedy: Arc<Remedy>,
    /// Best field any term matched in.
    pub matched: MatchField,
    /// Categories whose questionnaire can lead to this remedy.
    pub categories: Vec<CategoryKey>,
}

pub fn search(catalog: &Catalog, query: &str) -> Vec<SearchHit> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if terms.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = catalog
        .remedies()
        .iter()
        .filter_map(|remedy| {
            let matched = match_remedy(remedy, &terms)?;
            Some(SearchHit {
                remedy: remedy.clone(),
                matched,
                categories: catalog.categories_for(&remedy.id),
            })
        })
        .collect();

    hits.sort_by(|a, b| {
        a.matched
            .cmp(&b.matched)
            .then_with(|| a.remedy.name.cmp(&b.remedy.name))
    });
    hits
}

/// `None` unless every term matches somewhere.
fn match_remedy(remedy: &Remedy, terms: &[String]) -> Option<MatchField> {
    let name = remedy.name.to_lowercase();
    let description = remedy.description.to_lowercase();
    let indications: Vec<String> = remedy
        .key_indications
        .iter()
        .map(|i| i.to_lowercase())
        .collect();

    let mut best = MatchField::Indication;
    for term in terms {
        let field = if name.contains(term.as_str()) {
            MatchField::Name
        } else if description.contains(term.as_str()) {
            MatchField::Description
        } else if indications.iter().any(|i| i.contains(term.as_str())) {
            MatchField::Indication
        } else {
            return None;
        };
        best = best.min(field);
    }
    Some(best)
}
