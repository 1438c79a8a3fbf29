//! Category-vote diagnosis selector
//!
//! Selection function: S × Symptoms × Rules → Result<Diagnosis>
//!
//! 1. Map selected ids to categories, dropping unknown ids
//! 2. Tally categories in first-seen order
//! 3. Primary = highest count; ties go to the earliest category
//! 4. Copy the primary category's rule into the diagnosis

use crate::errors::DiagnosisError;
use crate::knowledge::{Category, RuleCatalog, SymptomCatalog};

use super::selection::Selection;
use super::types::Diagnosis;

/// Category counts in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTally {
    counts: Vec<(Category, usize)>,
}

impl CategoryTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, category: Category) {
        match self.counts.iter_mut().find(|(c, _)| *c == category) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((category, 1)),
        }
    }

    /// Category with the highest count; the first one wins a tie
    pub fn primary(&self) -> Option<Category> {
        let mut best: Option<(Category, usize)> = None;
        for &(category, count) in &self.counts {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((category, count)),
            }
        }
        best.map(|(category, _)| category)
    }

    pub fn categories(&self) -> Vec<Category> {
        self.counts.iter().map(|(c, _)| *c).collect()
    }
}

impl FromIterator<Category> for CategoryTally {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut tally = CategoryTally::new();
        for category in iter {
            tally.record(category);
        }
        tally
    }
}

/// Pick the diagnosis rule for a selection of symptom ids
pub fn select_diagnosis(
    selected: &Selection,
    symptoms: &SymptomCatalog,
    rules: &RuleCatalog,
) -> Result<Diagnosis, DiagnosisError> {
    if selected.is_empty() {
        return Err(DiagnosisError::EmptySelection);
    }

    let mut labels = Vec::with_capacity(selected.len());
    let mut tally = CategoryTally::new();
    for id in selected.iter() {
        match symptoms.find(id) {
            Some(symptom) => {
                labels.push(symptom.label.clone());
                tally.record(symptom.category);
            }
            None => tracing::debug!(id, "ignoring unknown symptom id"),
        }
    }

    let primary = tally.primary().ok_or(DiagnosisError::NoCategorizableSymptoms)?;
    tracing::debug!(?tally, %primary, "category tally");

    let rule = rules
        .get(primary)
        .ok_or(DiagnosisError::UnknownCategory { category: primary })?;

    Ok(Diagnosis {
        symptoms: labels,
        primary_category: primary,
        diagnoses: rule.diagnoses.clone(),
        confidence: rule.confidence,
        recommendations: rule.recommendations.clone(),
        all_categories: tally.categories(),
    })
}
