//! Session manager for wizard history tracking
//!
//! Keeps the diagnoses completed during one REPL session. Nothing is
//! written to disk.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;

use crate::diagnosis::{CategoryTally, DiagnosisResult};
use crate::knowledge::Category;

/// Maximum number of diagnoses to keep in history
const MAX_HISTORY_SIZE: usize = 100;

/// Record of a completed diagnosis
#[derive(Debug, Clone)]
pub struct DiagnosisRecord {
    pub result: DiagnosisResult,
    pub timestamp: DateTime<Utc>,
}

impl DiagnosisRecord {
    pub fn new(result: DiagnosisResult) -> Self {
        Self {
            result,
            timestamp: Utc::now(),
        }
    }
}

/// Session manager maintaining REPL history and counters
pub struct SessionManager {
    /// Completed diagnoses (FIFO queue, max 100 entries)
    history: VecDeque<DiagnosisRecord>,

    session_start: DateTime<Utc>,

    /// Total diagnoses completed
    diagnosis_count: usize,

    /// Rejected inputs and failed analyses
    error_count: usize,
}

impl SessionManager {
    pub fn new() -> Self {
        SessionManager {
            history: VecDeque::with_capacity(MAX_HISTORY_SIZE),
            session_start: Utc::now(),
            diagnosis_count: 0,
            error_count: 0,
        }
    }

    /// Record a completed diagnosis
    pub fn record_diagnosis(&mut self, result: DiagnosisResult) {
        if self.history.len() >= MAX_HISTORY_SIZE {
            self.history.pop_front();
        }
        self.history.push_back(DiagnosisRecord::new(result));
        self.diagnosis_count += 1;
    }

    pub fn record_error(&mut self) {
        self.error_count += 1;
    }

    /// Get diagnosis history (newest first)
    pub fn get_history(&self, limit: usize) -> Vec<&DiagnosisRecord> {
        self.history.iter().rev().take(limit).collect()
    }

    /// Most frequent primary category this session; earliest wins ties
    pub fn most_common_category(&self) -> Option<Category> {
        self.history
            .iter()
            .map(|record| record.result.diagnosis.primary_category)
            .collect::<CategoryTally>()
            .primary()
    }

    pub fn diagnosis_count(&self) -> usize {
        self.diagnosis_count
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Session duration in seconds
    pub fn session_duration(&self) -> i64 {
        (Utc::now() - self.session_start).num_seconds()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::{select_diagnosis, Selection};
    use crate::knowledge::KnowledgeBase;

    fn result_for(ids: &[&str]) -> DiagnosisResult {
        let kb = KnowledgeBase::builtin();
        let selection: Selection = ids.iter().copied().collect();
        select_diagnosis(&selection, kb.symptoms(), kb.rules())
            .unwrap()
            .for_brand("Dell")
    }

    #[test]
    fn test_session_creation() {
        let session = SessionManager::new();
        assert_eq!(session.diagnosis_count(), 0);
        assert_eq!(session.history_len(), 0);
        assert!(session.most_common_category().is_none());
    }

    #[test]
    fn test_record_diagnosis() {
        let mut session = SessionManager::new();
        session.record_diagnosis(result_for(&["overheat"]));
        assert_eq!(session.diagnosis_count(), 1);
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn test_history_bounded() {
        let mut session = SessionManager::new();
        for _ in 0..MAX_HISTORY_SIZE + 10 {
            session.record_diagnosis(result_for(&["wifi"]));
        }
        assert_eq!(session.history_len(), MAX_HISTORY_SIZE);
        assert_eq!(session.diagnosis_count(), MAX_HISTORY_SIZE + 10);
    }

    #[test]
    fn test_get_history_newest_first() {
        let mut session = SessionManager::new();
        session.record_diagnosis(result_for(&["overheat"]));
        session.record_diagnosis(result_for(&["wifi"]));
        session.record_diagnosis(result_for(&["crash"]));

        let history = session.get_history(2);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].result.diagnosis.primary_category, Category::System);
        assert_eq!(history[1].result.diagnosis.primary_category, Category::Network);
    }

    #[test]
    fn test_most_common_category() {
        let mut session = SessionManager::new();
        session.record_diagnosis(result_for(&["wifi"]));
        session.record_diagnosis(result_for(&["overheat"]));
        assert_eq!(session.most_common_category(), Some(Category::Network));

        session.record_diagnosis(result_for(&["overheat"]));
        assert_eq!(session.most_common_category(), Some(Category::Thermal));
    }

    #[test]
    fn test_most_common_category_tie_keeps_earliest() {
        let mut session = SessionManager::new();
        session.record_diagnosis(result_for(&["crash"]));
        session.record_diagnosis(result_for(&["screen"]));
        session.record_diagnosis(result_for(&["screen"]));
        session.record_diagnosis(result_for(&["crash"]));
        assert_eq!(session.most_common_category(), Some(Category::System));
    }

    #[test]
    fn test_record_error() {
        let mut session = SessionManager::new();
        session.record_error();
        session.record_error();
        assert_eq!(session.error_count(), 2);
        assert_eq!(session.diagnosis_count(), 0);
    }

    #[test]
    fn test_session_duration() {
        let session = SessionManager::new();
        assert!(session.session_duration() >= 0);
    }
}
