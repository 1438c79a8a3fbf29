//! Laptop troubleshooting knowledge base
//!
//! Components:
//! - Types: categories, symptoms and diagnosis rules
//! - Catalog: built-in tables and lookup helpers
//! - Base: the bundle the wizard runs against, optionally loaded from TOML

pub mod types;
pub mod catalog;
pub mod base;

pub use types::{Category, DiagnosisRule, Symptom};
pub use catalog::{builtin_rule, RuleCatalog, SymptomCatalog, BRANDS};
pub use base::KnowledgeBase;
