//! Symptom and rule catalogs
//!
//! The built-in tables are compiled in. `builtin_rule` is an exhaustive
//! match over `Category`, so every category always has a rule in the
//! built-in catalog.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::types::{Category, DiagnosisRule, Symptom};

/// Built-in laptop brands offered in the first wizard step
pub const BRANDS: [&str; 8] = ["Dell", "HP", "Lenovo", "Asus", "Acer", "Apple", "MSI", "Razer"];

/// Built-in symptoms as (id, label, category)
const SYMPTOMS: [(&str, &str, Category); 10] = [
    ("power", "Won't turn on / No power", Category::Power),
    ("screen", "Black/blank screen", Category::Display),
    ("slow", "Running very slow", Category::Performance),
    ("overheat", "Overheating", Category::Thermal),
    ("noise", "Strange noises", Category::Hardware),
    ("battery", "Battery not charging", Category::Power),
    ("keyboard", "Keyboard issues", Category::Hardware),
    ("wifi", "WiFi connectivity problems", Category::Network),
    ("crash", "Frequent crashes/freezes", Category::System),
    ("physical", "Physical damage visible", Category::Hardware),
];

/// Built-in rule for a category
pub fn builtin_rule(category: Category) -> DiagnosisRule {
    match category {
        Category::Power => DiagnosisRule::new(
            &[
                "Power adapter failure",
                "Battery malfunction",
                "Motherboard issue",
                "Power button defect",
            ],
            85,
            &[
                "Test with different power adapter",
                "Remove battery and test with AC only",
                "Check power LED indicators",
            ],
        ),
        Category::Display => DiagnosisRule::new(
            &[
                "LCD panel failure",
                "Graphics card issue",
                "Display cable problem",
                "RAM failure",
            ],
            80,
            &[
                "Connect to external monitor",
                "Reseat RAM modules",
                "Check brightness settings",
            ],
        ),
        Category::Performance => DiagnosisRule::new(
            &[
                "Insufficient RAM",
                "Hard drive failure",
                "Malware infection",
                "Too many startup programs",
            ],
            90,
            &[
                "Upgrade RAM",
                "Replace with SSD",
                "Run malware scan",
                "Disable unnecessary startup items",
            ],
        ),
        Category::Thermal => DiagnosisRule::new(
            &[
                "Blocked cooling vents",
                "Thermal paste degradation",
                "Fan failure",
                "Dust accumulation",
            ],
            95,
            &[
                "Clean cooling system",
                "Replace thermal paste",
                "Test/replace cooling fan",
            ],
        ),
        Category::Hardware => DiagnosisRule::new(
            &[
                "Failing hard drive",
                "Fan obstruction",
                "Loose components",
                "Optical drive issue",
            ],
            75,
            &[
                "Backup data immediately",
                "Inspect and clean fans",
                "Check for loose screws",
            ],
        ),
        Category::Network => DiagnosisRule::new(
            &[
                "WiFi adapter driver issue",
                "Hardware switch disabled",
                "Antenna problem",
                "Router compatibility",
            ],
            85,
            &[
                "Update WiFi drivers",
                "Check hardware switches",
                "Reset network settings",
            ],
        ),
        Category::System => DiagnosisRule::new(
            &[
                "RAM failure",
                "Overheating",
                "Corrupted OS",
                "Hard drive errors",
            ],
            80,
            &[
                "Run memory diagnostics",
                "Check temperatures",
                "Scan disk for errors",
                "Clean install OS",
            ],
        ),
    }
}

/// Ordered, immutable list of known symptoms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomCatalog {
    symptoms: Vec<Symptom>,
}

impl SymptomCatalog {
    pub fn new(symptoms: Vec<Symptom>) -> Self {
        Self { symptoms }
    }

    /// The ten built-in symptoms
    pub fn builtin() -> Self {
        Self::new(
            SYMPTOMS
                .iter()
                .map(|(id, label, category)| Symptom::new(id, label, *category))
                .collect(),
        )
    }

    /// Look up a symptom by id
    pub fn find(&self, id: &str) -> Option<&Symptom> {
        self.symptoms.iter().find(|s| s.id == id)
    }

    /// Look up by id, or by 1-based position in the catalog
    pub fn resolve(&self, token: &str) -> Option<&Symptom> {
        let token = token.trim();
        if let Some(symptom) = self.find(token) {
            return Some(symptom);
        }
        let lowered = token.to_lowercase();
        if let Some(symptom) = self.find(&lowered) {
            return Some(symptom);
        }
        token
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.symptoms.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symptom> {
        self.symptoms.iter()
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    /// Distinct categories used by the catalog, in first-seen order
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for symptom in &self.symptoms {
            if !seen.contains(&symptom.category) {
                seen.push(symptom.category);
            }
        }
        seen
    }
}

/// Rules keyed by category
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleCatalog {
    rules: HashMap<Category, DiagnosisRule>,
}

impl RuleCatalog {
    pub fn new(rules: HashMap<Category, DiagnosisRule>) -> Self {
        Self { rules }
    }

    /// One rule for every category
    pub fn builtin() -> Self {
        Self::new(
            Category::ALL
                .iter()
                .map(|c| (*c, builtin_rule(*c)))
                .collect(),
        )
    }

    pub fn get(&self, category: Category) -> Option<&DiagnosisRule> {
        self.rules.get(&category)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.rules.contains_key(&category)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, &DiagnosisRule)> {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_symptom_catalog() {
        let catalog = SymptomCatalog::builtin();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.find("overheat").unwrap().category, Category::Thermal);
        assert_eq!(catalog.find("battery").unwrap().category, Category::Power);
        assert!(catalog.find("bluescreen").is_none());
    }

    #[test]
    fn test_builtin_ids_unique() {
        let catalog = SymptomCatalog::builtin();
        let mut ids: Vec<&str> = catalog.iter().map(|s| s.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_resolve_by_position() {
        let catalog = SymptomCatalog::builtin();
        assert_eq!(catalog.resolve("1").unwrap().id, "power");
        assert_eq!(catalog.resolve("10").unwrap().id, "physical");
        assert!(catalog.resolve("0").is_none());
        assert!(catalog.resolve("11").is_none());
    }

    #[test]
    fn test_resolve_by_id_ignores_case() {
        let catalog = SymptomCatalog::builtin();
        assert_eq!(catalog.resolve(" WiFi ").unwrap().id, "wifi");
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = SymptomCatalog::builtin();
        assert_eq!(
            catalog.categories(),
            vec![
                Category::Power,
                Category::Display,
                Category::Performance,
                Category::Thermal,
                Category::Hardware,
                Category::Network,
                Category::System,
            ]
        );
    }

    #[test]
    fn test_builtin_rules_cover_symptom_categories() {
        let symptoms = SymptomCatalog::builtin();
        let rules = RuleCatalog::builtin();
        for category in symptoms.categories() {
            assert!(rules.contains(category), "missing rule for {}", category);
        }
    }

    #[test]
    fn test_builtin_confidence_in_range() {
        for (_, rule) in RuleCatalog::builtin().iter() {
            assert!(rule.confidence <= 100);
            assert!(!rule.diagnoses.is_empty());
            assert!(!rule.recommendations.is_empty());
        }
    }
}
