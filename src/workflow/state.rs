use crate::api::{CombinationSet, InteractionMatrix, PatientInput};

/// Presentation state of the current cycle. `Success` and `Error` are
/// terminal per cycle; the next submission loops both back into `Loading`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl ViewState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ViewState::Success | ViewState::Error(_))
    }
}

/// The single aggregate mutated by the orchestrator: one submission's input,
/// results, and view state, tagged with the cycle's sequence number.
#[derive(Debug, Clone, Default)]
pub struct ResultCycle {
    pub seq: u64,
    pub patient: Option<PatientInput>,
    pub combinations: Option<CombinationSet>,
    pub interaction_matrix: Option<InteractionMatrix>,
    pub view: ViewState,
}

impl ResultCycle {
    /// Begin a new cycle. Prior results are dropped before any request is
    /// issued so stale data can never render alongside new input.
    pub fn begin(&mut self, seq: u64, patient: PatientInput) {
        *self = ResultCycle {
            seq,
            patient: Some(patient),
            combinations: None,
            interaction_matrix: None,
            view: ViewState::Loading,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(disease: &str) -> PatientInput {
        PatientInput {
            disease: disease.to_string(),
            age: 55,
            weight: 82.5,
            existing_medications: String::new(),
            contraindications: String::new(),
            comorbidities: String::new(),
            lifestyle: String::new(),
            enable_interaction_check: true,
        }
    }

    #[test]
    fn test_initial_state_is_idle() {
        let cycle = ResultCycle::default();
        assert_eq!(cycle.seq, 0);
        assert_eq!(cycle.view, ViewState::Idle);
        assert!(cycle.patient.is_none());
        assert!(!cycle.view.is_terminal());
    }

    #[test]
    fn test_begin_clears_prior_results() {
        let mut cycle = ResultCycle {
            seq: 1,
            patient: Some(patient("Hypertension")),
            combinations: Some(CombinationSet::default()),
            interaction_matrix: Some(InteractionMatrix {
                drugs: vec![],
                matrix: vec![],
            }),
            view: ViewState::Success,
        };

        cycle.begin(2, patient("Diabetes"));

        assert_eq!(cycle.seq, 2);
        assert_eq!(cycle.view, ViewState::Loading);
        assert!(cycle.combinations.is_none());
        assert!(cycle.interaction_matrix.is_none());
        assert_eq!(cycle.patient.unwrap().disease, "Diabetes");
    }

    #[test]
    fn test_terminal_states() {
        assert!(ViewState::Success.is_terminal());
        assert!(ViewState::Error("boom".to_string()).is_terminal());
        assert!(!ViewState::Loading.is_terminal());
        assert!(!ViewState::Idle.is_terminal());
    }
}
