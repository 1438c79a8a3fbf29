//! laptopdoc - Laptop troubleshooting wizard
//!
//! Picks a diagnosis for a set of observed laptop symptoms by majority vote
//! over their fault categories.
//!
//! # Architecture
//!
//! - **knowledge**: brands, symptom catalog, rule catalog
//! - **diagnosis**: the pure selector over a symptom selection
//! - **wizard**: caller-owned Brand → Symptoms → Result state machine
//! - **repl** / **cli**: terminal front end

pub mod errors;
pub mod knowledge;
pub mod diagnosis;
pub mod wizard;

// Re-export commonly used types
pub use errors::{DiagnosisError, LaptopDocError, Result};
pub use diagnosis::{select_diagnosis, Diagnosis, DiagnosisResult, Selection};
pub use knowledge::{Category, DiagnosisRule, KnowledgeBase, RuleCatalog, Symptom, SymptomCatalog};
pub use wizard::{WizardEvent, WizardState, WizardStep};

// Terminal front end and ambient setup
pub mod cli;
pub mod config;
pub mod logging;
pub mod repl;
