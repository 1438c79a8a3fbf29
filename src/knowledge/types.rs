//! Core data types for the laptop knowledge base

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse fault domain a symptom belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Power,
    Display,
    Performance,
    Thermal,
    Hardware,
    Network,
    System,
}

impl Category {
    /// Every category, in catalog order
    pub const ALL: [Category; 7] = [
        Category::Power,
        Category::Display,
        Category::Performance,
        Category::Thermal,
        Category::Hardware,
        Category::Network,
        Category::System,
    ];

    /// Lowercase identifier used in files and output
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Power => "power",
            Category::Display => "display",
            Category::Performance => "performance",
            Category::Thermal => "thermal",
            Category::Hardware => "hardware",
            Category::Network => "network",
            Category::System => "system",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// A user-observable laptop problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: String,
    pub label: String,
    pub category: Category,
}

impl Symptom {
    pub fn new(id: &str, label: &str, category: Category) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            category,
        }
    }
}

/// Candidate causes, confidence and remediation for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisRule {
    pub diagnoses: Vec<String>,
    /// Percentage, 0-100
    pub confidence: u8,
    pub recommendations: Vec<String>,
}

impl DiagnosisRule {
    pub fn new(diagnoses: &[&str], confidence: u8, recommendations: &[&str]) -> Self {
        Self {
            diagnoses: diagnoses.iter().map(|s| s.to_string()).collect(),
            confidence,
            recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(" Thermal ".parse::<Category>().unwrap(), Category::Thermal);
        assert!("battery".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Network).unwrap();
        assert_eq!(json, "\"network\"");
    }
}
