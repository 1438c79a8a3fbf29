//! Knowledge base: brands, symptom catalog and rule catalog
//!
//! File format (TOML):
//!
//! ```toml
//! brands = ["Dell", "Framework"]
//!
//! [[symptoms]]
//! id = "overheat"
//! label = "Overheating"
//! category = "thermal"
//!
//! [rules.thermal]
//! diagnoses = ["Fan failure"]
//! confidence = 90
//! recommendations = ["Clean cooling system"]
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::catalog::{RuleCatalog, SymptomCatalog, BRANDS};
use super::types::{Category, DiagnosisRule, Symptom};
use crate::errors::{LaptopDocError, Result};

/// Everything the wizard needs to run a diagnosis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    brands: Vec<String>,
    symptoms: SymptomCatalog,
    rules: RuleCatalog,
}

#[derive(Debug, Deserialize)]
struct KnowledgeFile {
    #[serde(default)]
    brands: Vec<String>,
    #[serde(default)]
    symptoms: Vec<Symptom>,
    #[serde(default)]
    rules: HashMap<String, DiagnosisRule>,
}

impl KnowledgeBase {
    pub fn new(brands: Vec<String>, symptoms: SymptomCatalog, rules: RuleCatalog) -> Self {
        Self {
            brands,
            symptoms,
            rules,
        }
    }

    /// Built-in brands, symptoms and rules
    pub fn builtin() -> Self {
        Self::new(
            BRANDS.iter().map(|b| b.to_string()).collect(),
            SymptomCatalog::builtin(),
            RuleCatalog::builtin(),
        )
    }

    /// Load the built-in tables, or a file when a path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Load and validate a knowledge base file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LaptopDocError::KnowledgeBase(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let kb = Self::from_toml_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            brands = kb.brands.len(),
            symptoms = kb.symptoms.len(),
            rules = kb.rules.len(),
            "loaded knowledge base"
        );
        Ok(kb)
    }

    /// Parse and validate a knowledge base from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: KnowledgeFile = toml::from_str(contents)
            .map_err(|e| LaptopDocError::KnowledgeBase(format!("Failed to parse: {}", e)))?;

        let mut rules = HashMap::with_capacity(file.rules.len());
        for (key, rule) in file.rules {
            let category = key
                .parse::<Category>()
                .map_err(LaptopDocError::KnowledgeBase)?;
            if rules.insert(category, rule).is_some() {
                return Err(LaptopDocError::KnowledgeBase(format!(
                    "duplicate rule for category '{}'",
                    category
                )));
            }
        }

        let kb = Self::new(
            file.brands,
            SymptomCatalog::new(file.symptoms),
            RuleCatalog::new(rules),
        );
        kb.validate()?;
        Ok(kb)
    }

    /// Check structural constraints of the tables
    pub fn validate(&self) -> Result<()> {
        if self.brands.is_empty() {
            return Err(LaptopDocError::KnowledgeBase(
                "at least one brand is required".to_string(),
            ));
        }

        for (i, brand) in self.brands.iter().enumerate() {
            if brand.trim().is_empty() {
                return Err(LaptopDocError::KnowledgeBase(
                    "brand name must not be empty".to_string(),
                ));
            }
            if self.brands[..i].iter().any(|b| b.eq_ignore_ascii_case(brand)) {
                return Err(LaptopDocError::KnowledgeBase(format!(
                    "duplicate brand '{}'",
                    brand
                )));
            }
        }

        if self.symptoms.is_empty() {
            return Err(LaptopDocError::KnowledgeBase(
                "at least one symptom is required".to_string(),
            ));
        }

        let mut seen: Vec<&str> = Vec::with_capacity(self.symptoms.len());
        for symptom in self.symptoms.iter() {
            if symptom.id.trim().is_empty() {
                return Err(LaptopDocError::KnowledgeBase(
                    "symptom id must not be empty".to_string(),
                ));
            }
            if seen.contains(&symptom.id.as_str()) {
                return Err(LaptopDocError::KnowledgeBase(format!(
                    "duplicate symptom id '{}'",
                    symptom.id
                )));
            }
            seen.push(&symptom.id);
        }

        for (category, rule) in self.rules.iter() {
            if rule.confidence > 100 {
                return Err(LaptopDocError::KnowledgeBase(format!(
                    "confidence for '{}' must be between 0 and 100, got {}",
                    category, rule.confidence
                )));
            }
            if rule.diagnoses.is_empty() {
                return Err(LaptopDocError::KnowledgeBase(format!(
                    "rule '{}' has no diagnoses",
                    category
                )));
            }
        }

        for category in self.uncovered_categories() {
            tracing::warn!(%category, "no diagnosis rule for symptom category");
        }

        Ok(())
    }

    /// Categories used by symptoms that have no rule
    pub fn uncovered_categories(&self) -> Vec<Category> {
        self.symptoms
            .categories()
            .into_iter()
            .filter(|c| !self.rules.contains(*c))
            .collect()
    }

    /// Case-insensitive brand match, returning the canonical name
    pub fn resolve_brand(&self, name: &str) -> Result<&str> {
        let needle = name.trim();
        self.brands
            .iter()
            .find(|b| b.eq_ignore_ascii_case(needle))
            .map(|b| b.as_str())
            .ok_or_else(|| LaptopDocError::UnknownBrand(needle.to_string()))
    }

    pub fn brands(&self) -> &[String] {
        &self.brands
    }

    pub fn symptoms(&self) -> &SymptomCatalog {
        &self.symptoms
    }

    pub fn rules(&self) -> &RuleCatalog {
        &self.rules
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_KB: &str = r#"
brands = ["Framework", "Dell"]

[[symptoms]]
id = "overheat"
label = "Overheating"
category = "thermal"

[[symptoms]]
id = "wifi"
label = "No WiFi"
category = "network"

[rules.thermal]
diagnoses = ["Fan failure"]
confidence = 90
recommendations = ["Clean cooling system"]
"#;

    #[test]
    fn test_builtin_is_valid() {
        let kb = KnowledgeBase::builtin();
        assert!(kb.validate().is_ok());
        assert_eq!(kb.brands().len(), 8);
        assert!(kb.uncovered_categories().is_empty());
    }

    #[test]
    fn test_resolve_brand_case_insensitive() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.resolve_brand("lenovo").unwrap(), "Lenovo");
        assert_eq!(kb.resolve_brand(" msi ").unwrap(), "MSI");
        assert!(matches!(
            kb.resolve_brand("Toshiba"),
            Err(LaptopDocError::UnknownBrand(_))
        ));
    }

    #[test]
    fn test_parse_small_kb() {
        let kb = KnowledgeBase::from_toml_str(SMALL_KB).unwrap();
        assert_eq!(kb.brands(), &["Framework".to_string(), "Dell".to_string()]);
        assert_eq!(kb.symptoms().len(), 2);
        assert_eq!(kb.rules().get(Category::Thermal).unwrap().confidence, 90);
        assert_eq!(kb.uncovered_categories(), vec![Category::Network]);
    }

    #[test]
    fn test_rejects_unknown_rule_category() {
        let text = SMALL_KB.replace("[rules.thermal]", "[rules.cosmic]");
        assert!(matches!(
            KnowledgeBase::from_toml_str(&text),
            Err(LaptopDocError::KnowledgeBase(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_symptom_ids() {
        let text = SMALL_KB.replace("id = \"wifi\"", "id = \"overheat\"");
        let err = KnowledgeBase::from_toml_str(&text).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_rejects_rule_keys_differing_only_by_case() {
        let text = format!(
            "{}\n[rules.Thermal]\ndiagnoses = [\"Dust\"]\nconfidence = 10\nrecommendations = []\n",
            SMALL_KB
        );
        for _ in 0..16 {
            let err = KnowledgeBase::from_toml_str(&text).unwrap_err();
            assert!(err.to_string().contains("duplicate rule for category 'thermal'"));
        }
    }

    #[test]
    fn test_rejects_duplicate_brands_ignoring_case() {
        let text = SMALL_KB.replace("\"Dell\"]", "\"Dell\", \"dell\"]");
        let err = KnowledgeBase::from_toml_str(&text).unwrap_err();
        assert!(err.to_string().contains("duplicate brand 'dell'"));
    }

    #[test]
    fn test_rejects_confidence_over_100() {
        let text = SMALL_KB.replace("confidence = 90", "confidence = 150");
        assert!(KnowledgeBase::from_toml_str(&text).is_err());
    }

    #[test]
    fn test_rejects_empty_brands() {
        let text = SMALL_KB.replace("brands = [\"Framework\", \"Dell\"]", "brands = []");
        assert!(KnowledgeBase::from_toml_str(&text).is_err());
    }

    #[test]
    fn test_load_without_path_is_builtin() {
        assert_eq!(KnowledgeBase::load(None).unwrap(), KnowledgeBase::builtin());
    }
}
