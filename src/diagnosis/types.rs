//! Diagnosis output types

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::knowledge::Category;

/// Outcome of the selector for one selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    /// Labels of the recognised symptoms, in selection order
    pub symptoms: Vec<String>,
    pub primary_category: Category,
    pub diagnoses: Vec<String>,
    pub confidence: u8,
    pub recommendations: Vec<String>,
    /// Distinct categories touched, in first-seen order
    pub all_categories: Vec<Category>,
}

impl Diagnosis {
    /// Attach the brand chosen in the first wizard step
    pub fn for_brand(self, brand: impl Into<String>) -> DiagnosisResult {
        DiagnosisResult {
            brand: brand.into(),
            diagnosis: self,
        }
    }
}

/// Diagnosis plus the brand it was run for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub brand: String,
    #[serde(flatten)]
    pub diagnosis: Diagnosis,
}

impl DiagnosisResult {
    /// Pretty-printed JSON for `--json` output
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One-line summary used in session history
    pub fn summary(&self) -> String {
        format!(
            "{}: {} ({}% confidence, {} symptom(s))",
            self.brand,
            self.diagnosis.primary_category,
            self.diagnosis.confidence,
            self.diagnosis.symptoms.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Diagnosis {
        Diagnosis {
            symptoms: vec!["Overheating".to_string()],
            primary_category: Category::Thermal,
            diagnoses: vec!["Fan failure".to_string()],
            confidence: 95,
            recommendations: vec!["Clean cooling system".to_string()],
            all_categories: vec![Category::Thermal],
        }
    }

    #[test]
    fn test_result_json_is_flat() {
        let result = sample().for_brand("Dell");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["brand"], "Dell");
        assert_eq!(value["primaryCategory"], "thermal");
        assert_eq!(value["allCategories"], serde_json::json!(["thermal"]));
        assert_eq!(value["confidence"], 95);
        assert!(value.get("diagnosis").is_none());
        assert!(value.get("primary_category").is_none());
    }

    #[test]
    fn test_to_json_round_trips() {
        let result = sample().for_brand("Lenovo");
        let json = result.to_json().unwrap();
        assert!(json.contains("\"primaryCategory\": \"thermal\""));
        let back: DiagnosisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_summary() {
        let result = sample().for_brand("Asus");
        assert_eq!(result.summary(), "Asus: thermal (95% confidence, 1 symptom(s))");
    }
}
