pub mod http;

pub use http::HttpApiClient;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// One patient record as submitted for a generation cycle. Field names match
/// the backend wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientInput {
    pub disease: String,
    pub age: u32,
    pub weight: f64,
    #[serde(default)]
    pub existing_medications: String,
    #[serde(default)]
    pub contraindications: String,
    #[serde(default)]
    pub comorbidities: String,
    #[serde(default)]
    pub lifestyle: String,
    #[serde(default = "default_interaction_check")]
    pub enable_interaction_check: bool,
}

fn default_interaction_check() -> bool {
    true
}

impl PatientInput {
    /// Checked at the form boundary; an input that fails here never starts a
    /// cycle.
    pub fn validate(&self) -> AppResult<()> {
        if self.disease.trim().is_empty() {
            return Err(AppError::Validation(
                "disease or condition is required".into(),
            ));
        }
        if self.age > 120 {
            return Err(AppError::Validation("age must be between 0 and 120".into()));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(AppError::Validation(
                "weight must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

/// One proposed multi-drug therapy regimen with its clinical rationale.
///
/// `mechanisms` is aligned to `drugs` by index and may be shorter; the
/// renderer substitutes a generic label for unmatched entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combination {
    pub name: String,
    pub drugs: Vec<String>,
    #[serde(default)]
    pub mechanisms: Vec<String>,
    pub synergy: String,
    #[serde(default = "default_interactions_note")]
    pub interactions: String,
    pub dosage: String,
    #[serde(default)]
    pub side_effects: Vec<String>,
    pub probability_score: u8,
}

fn default_interactions_note() -> String {
    "No significant interactions noted.".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombinationSet {
    pub combinations: Vec<Combination>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionSeverity {
    None,
    Moderate,
    Major,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionCell {
    pub value: String,
    pub severity: InteractionSeverity,
}

/// Square pairwise-interaction table; `drugs` defines both row and column
/// order. Symmetric by backend convention, not enforced here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionMatrix {
    pub drugs: Vec<String>,
    pub matrix: Vec<Vec<InteractionCell>>,
}

impl InteractionMatrix {
    pub fn is_square(&self) -> bool {
        self.matrix.len() == self.drugs.len()
            && self.matrix.iter().all(|row| row.len() == self.drugs.len())
    }
}

/// One pairwise interaction from the list-form endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugInteraction {
    pub drug1: String,
    pub drug2: String,
    pub severity: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionList {
    pub interactions: Vec<DrugInteraction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// Transport seam for the MediCombine backend, one method per endpoint.
/// Constructed once in main and injected, so tests can substitute a fake.
#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    async fn generate(&self, patient: &PatientInput) -> AppResult<CombinationSet>;
    async fn interaction_matrix(&self, drugs: &[String]) -> AppResult<InteractionMatrix>;
    async fn check_interactions(&self, drugs: &[String]) -> AppResult<InteractionList>;
    async fn export(&self, format: ExportFormat, combinations: &CombinationSet) -> AppResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient_json(extra: &str) -> String {
        format!(r#"{{"disease": "Hypertension", "age": 55, "weight": 82.5{extra}}}"#)
    }

    #[test]
    fn test_patient_input_defaults() {
        let patient: PatientInput = serde_json::from_str(&patient_json("")).unwrap();
        assert_eq!(patient.existing_medications, "");
        assert_eq!(patient.contraindications, "");
        assert_eq!(patient.comorbidities, "");
        assert_eq!(patient.lifestyle, "");
        assert!(patient.enable_interaction_check);
    }

    #[test]
    fn test_patient_input_explicit_flag() {
        let patient: PatientInput =
            serde_json::from_str(&patient_json(r#", "enable_interaction_check": false"#)).unwrap();
        assert!(!patient.enable_interaction_check);
    }

    #[test]
    fn test_validate_accepts_complete_input() {
        let patient: PatientInput = serde_json::from_str(&patient_json("")).unwrap();
        assert!(patient.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_disease() {
        let mut patient: PatientInput = serde_json::from_str(&patient_json("")).unwrap();
        patient.disease = "   ".to_string();
        let err = patient.validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_age_out_of_range() {
        let mut patient: PatientInput = serde_json::from_str(&patient_json("")).unwrap();
        patient.age = 121;
        assert!(patient.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        let mut patient: PatientInput = serde_json::from_str(&patient_json("")).unwrap();
        patient.weight = -1.0;
        assert!(patient.validate().is_err());
    }

    #[test]
    fn test_combination_interactions_sentinel() {
        let combination: Combination = serde_json::from_str(
            r#"{
                "name": "ACE Inhibitor + Diuretic",
                "drugs": ["Lisinopril", "Hydrochlorothiazide"],
                "mechanisms": ["ACE inhibition"],
                "synergy": "Complementary blood pressure reduction",
                "dosage": "Lisinopril 10mg daily",
                "side_effects": ["Dizziness"],
                "probability_score": 85
            }"#,
        )
        .unwrap();
        assert_eq!(combination.interactions, "No significant interactions noted.");
    }

    #[test]
    fn test_severity_wire_names() {
        assert_eq!(
            serde_json::to_string(&InteractionSeverity::Major).unwrap(),
            r#""major""#
        );
        let severity: InteractionSeverity = serde_json::from_str(r#""moderate""#).unwrap();
        assert_eq!(severity, InteractionSeverity::Moderate);
    }

    #[test]
    fn test_interaction_matrix_is_square() {
        let cell = |severity| InteractionCell {
            value: "None".to_string(),
            severity,
        };
        let matrix = InteractionMatrix {
            drugs: vec!["Aspirin".to_string(), "Warfarin".to_string()],
            matrix: vec![
                vec![cell(InteractionSeverity::None), cell(InteractionSeverity::Major)],
                vec![cell(InteractionSeverity::Major), cell(InteractionSeverity::None)],
            ],
        };
        assert!(matrix.is_square());

        let ragged = InteractionMatrix {
            drugs: vec!["Aspirin".to_string(), "Warfarin".to_string()],
            matrix: vec![vec![cell(InteractionSeverity::None)]],
        };
        assert!(!ragged.is_square());
    }
}
