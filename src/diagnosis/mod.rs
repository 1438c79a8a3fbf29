//! Diagnosis selection
//!
//! A pure function over a selection of symptom ids and the two catalogs.

pub mod selection;
pub mod selector;
pub mod types;

pub use selection::Selection;
pub use selector::{select_diagnosis, CategoryTally};
pub use types::{Diagnosis, DiagnosisResult};
