use std::collections::BTreeSet;

use crate::api::Combination;

/// Collect the distinct drug names relevant to an interaction lookup from
/// the free-text medication list and the generated combinations.
///
/// Matching is case-sensitive; tokens are trimmed and empty ones discarded.
/// A sorted set keeps downstream request bodies deterministic (the backend
/// accepts any order).
pub fn aggregate(existing_medications: &str, combinations: &[Combination]) -> BTreeSet<String> {
    let mut drugs = BTreeSet::new();

    for token in existing_medications.split(',') {
        let trimmed = token.trim();
        if !trimmed.is_empty() {
            drugs.insert(trimmed.to_string());
        }
    }

    for combination in combinations {
        for drug in &combination.drugs {
            let trimmed = drug.trim();
            if !trimmed.is_empty() {
                drugs.insert(trimmed.to_string());
            }
        }
    }

    drugs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combination(drugs: &[&str]) -> Combination {
        Combination {
            name: "Test Combination".to_string(),
            drugs: drugs.iter().map(|d| d.to_string()).collect(),
            mechanisms: vec![],
            synergy: String::new(),
            interactions: String::new(),
            dosage: String::new(),
            side_effects: vec![],
            probability_score: 50,
        }
    }

    #[test]
    fn test_merges_both_sources() {
        let combinations = vec![
            combination(&["Amlodipine", "Hydrochlorothiazide"]),
            combination(&["Losartan"]),
        ];
        let set = aggregate("Lisinopril, Metoprolol", &combinations);
        assert_eq!(set.len(), 5);
        for drug in [
            "Amlodipine",
            "Hydrochlorothiazide",
            "Lisinopril",
            "Losartan",
            "Metoprolol",
        ] {
            assert!(set.contains(drug), "missing {drug}");
        }
    }

    #[test]
    fn test_trims_and_discards_empty_tokens() {
        let set = aggregate("  Aspirin ,, ,  , Warfarin  ", &[]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("Aspirin"));
        assert!(set.contains("Warfarin"));
        assert!(set.iter().all(|d| !d.trim().is_empty() && d.trim() == d));
    }

    #[test]
    fn test_deduplicates_across_sources() {
        let combinations = vec![combination(&["Aspirin", "Aspirin"])];
        let set = aggregate("Aspirin", &combinations);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_case_sensitive() {
        let set = aggregate("aspirin, Aspirin", &[]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_empty_inputs_yield_empty_set() {
        assert!(aggregate("", &[]).is_empty());
        assert!(aggregate("   ", &[]).is_empty());
    }

    #[test]
    fn test_size_matches_distinct_token_count() {
        let combinations = vec![combination(&["B", "C"]), combination(&["C", "D"])];
        let set = aggregate("A, B, A", &combinations);
        // Distinct non-empty trimmed tokens: A, B, C, D.
        assert_eq!(set.len(), 4);
    }
}
