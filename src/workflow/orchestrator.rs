use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::{ApiClient, PatientInput};

use super::drugs;
use super::state::{ResultCycle, ViewState};

/// Sequences one submission's dependent requests (generate, then
/// conditionally the interaction matrix) and folds the outcome into a
/// single [`ResultCycle`].
pub struct Orchestrator {
    client: Arc<dyn ApiClient>,
    cycle: Mutex<ResultCycle>,
    seq: AtomicU64,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self {
            client,
            cycle: Mutex::new(ResultCycle::default()),
            seq: AtomicU64::new(0),
        }
    }

    /// Clone of the live cycle for presentation.
    pub fn snapshot(&self) -> ResultCycle {
        self.lock().clone()
    }

    /// Run one full submission cycle; returns its sequence number.
    ///
    /// The generate call is awaited exclusively before the interaction
    /// lookup, which reads its output; the two never run concurrently.
    /// A submission superseded while a request is in flight leaves the newer
    /// cycle untouched: every response is applied only if its sequence
    /// number still matches the live cycle.
    #[tracing::instrument(name = "cycle submit", skip(self, input), fields(cycle.seq))]
    pub async fn submit(&self, input: PatientInput) -> u64 {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::Span::current().record("cycle.seq", seq);

        let existing_medications = input.existing_medications.clone();
        let enable_interaction_check = input.enable_interaction_check;
        self.lock().begin(seq, input.clone());

        let combinations = match self.client.generate(&input).await {
            Ok(set) => set,
            Err(err) => {
                tracing::warn!(error = %err, "generate request failed");
                self.apply(seq, |cycle| cycle.view = ViewState::Error(err.to_string()));
                return seq;
            }
        };

        tracing::info!(
            combinations = combinations.combinations.len(),
            "combinations generated"
        );

        if !self.apply(seq, |cycle| {
            cycle.combinations = Some(combinations.clone());
        }) {
            return seq;
        }

        if enable_interaction_check && !combinations.combinations.is_empty() {
            let drug_set = drugs::aggregate(&existing_medications, &combinations.combinations);

            // A matrix over fewer than two drugs is meaningless.
            if drug_set.len() >= 2 {
                let drug_list: Vec<String> = drug_set.into_iter().collect();
                tracing::info!(drugs = drug_list.len(), "requesting interaction matrix");

                match self.client.interaction_matrix(&drug_list).await {
                    Ok(matrix) => {
                        if !self.apply(seq, |cycle| cycle.interaction_matrix = Some(matrix)) {
                            return seq;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "interaction matrix request failed");
                        // All-or-nothing: a matrix failure fails the whole
                        // cycle, and the already-generated combinations are
                        // dropped rather than shown partially.
                        self.apply(seq, |cycle| {
                            cycle.combinations = None;
                            cycle.view = ViewState::Error(err.to_string());
                        });
                        return seq;
                    }
                }
            }
        }

        self.apply(seq, |cycle| cycle.view = ViewState::Success);
        seq
    }

    /// Apply `f` to the cycle only if `seq` is still live; returns whether
    /// it ran. Stale responses from superseded cycles are discarded here.
    fn apply(&self, seq: u64, f: impl FnOnce(&mut ResultCycle)) -> bool {
        let mut cycle = self.lock();
        if cycle.seq != seq {
            tracing::debug!(stale = seq, current = cycle.seq, "discarding stale response");
            return false;
        }
        f(&mut cycle);
        true
    }

    fn lock(&self) -> MutexGuard<'_, ResultCycle> {
        // Never held across an await point.
        self.cycle.lock().expect("result cycle lock poisoned")
    }
}
