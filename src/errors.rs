//! Error types for laptopdoc
//!
//! `DiagnosisError` covers the recoverable, user-facing outcomes of the
//! selector. `LaptopDocError` wraps it together with wizard, knowledge base
//! and configuration failures.

use thiserror::Error;

use crate::knowledge::Category;

/// Failures of the diagnosis selector
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosisError {
    /// Nothing was selected
    #[error("Please select at least one symptom")]
    EmptySelection,

    /// None of the selected ids exist in the symptom catalog
    #[error("Unable to categorize symptoms. Please try again.")]
    NoCategorizableSymptoms,

    /// The rule catalog has no entry for the primary category
    #[error("No diagnostic rules found for category '{category}'")]
    UnknownCategory { category: Category },
}

/// Main error type for laptopdoc
#[derive(Error, Debug)]
pub enum LaptopDocError {
    /// Selector errors
    #[error(transparent)]
    Diagnosis(#[from] DiagnosisError),

    /// Wizard step errors
    #[error("Invalid wizard transition from {from} on {event}: {reason}")]
    InvalidTransition {
        from: String,
        event: String,
        reason: String,
    },

    /// Brand not in the brand list
    #[error("Unknown laptop brand: {0}")]
    UnknownBrand(String),

    /// Symptom id not in the catalog
    #[error("Unknown symptom: {0}")]
    UnknownSymptom(String),

    /// Knowledge base file errors
    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for laptopdoc operations
pub type Result<T> = std::result::Result<T, LaptopDocError>;

impl LaptopDocError {
    /// True for errors the user can fix by changing their input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LaptopDocError::Diagnosis(_)
                | LaptopDocError::InvalidTransition { .. }
                | LaptopDocError::UnknownBrand(_)
                | LaptopDocError::UnknownSymptom(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnosis_error_display() {
        assert_eq!(
            DiagnosisError::EmptySelection.to_string(),
            "Please select at least one symptom"
        );
        let err = DiagnosisError::UnknownCategory {
            category: Category::Thermal,
        };
        assert!(err.to_string().contains("thermal"));
    }

    #[test]
    fn test_diagnosis_error_is_transparent() {
        let err: LaptopDocError = DiagnosisError::NoCategorizableSymptoms.into();
        assert_eq!(
            err.to_string(),
            DiagnosisError::NoCategorizableSymptoms.to_string()
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_invalid_transition_error() {
        let err = LaptopDocError::InvalidTransition {
            from: "Result".to_string(),
            event: "Analyze".to_string(),
            reason: "Diagnosis already complete".to_string(),
        };
        assert!(err.to_string().contains("Result"));
        assert!(err.to_string().contains("Analyze"));
    }

    #[test]
    fn test_io_and_serialization_conversions() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: LaptopDocError = io.into();
        assert!(matches!(err, LaptopDocError::IoError(_)));
        assert!(!err.is_recoverable());

        let json = serde_json::from_str::<u8>("not json").unwrap_err();
        let err: LaptopDocError = json.into();
        assert!(err.to_string().starts_with("Serialization error"));
    }

    #[test]
    fn test_config_error_not_recoverable() {
        let err = LaptopDocError::ConfigError("bad".to_string());
        assert!(!err.is_recoverable());
    }
}
