//! Terminal rendering of a completed result cycle.
//!
//! Everything here is presentation: it reads the cycle, never mutates it.

use std::fmt::Write;

use crate::api::{Combination, DrugInteraction, InteractionMatrix, InteractionSeverity};
use crate::workflow::ResultCycle;

/// Presentation band for a combination's probability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 80 => ScoreTier::High,
            s if s >= 60 => ScoreTier::Medium,
            _ => ScoreTier::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::High => "high",
            ScoreTier::Medium => "medium",
            ScoreTier::Low => "low",
        }
    }
}

fn severity_label(severity: InteractionSeverity) -> &'static str {
    match severity {
        InteractionSeverity::Major => "Major Interaction",
        InteractionSeverity::Moderate => "Moderate Interaction",
        InteractionSeverity::None => "No Known Interaction",
    }
}

/// Pair each mechanism with its drug by index. Mechanisms past the end of
/// the drugs list keep a generic label rather than being dropped.
pub fn mechanism_entries(combination: &Combination) -> Vec<(&str, &str)> {
    combination
        .mechanisms
        .iter()
        .enumerate()
        .map(|(i, mechanism)| {
            let drug = combination
                .drugs
                .get(i)
                .map(String::as_str)
                .unwrap_or("Drug");
            (drug, mechanism.as_str())
        })
        .collect()
}

pub fn render_combination(rank: usize, combination: &Combination) -> String {
    let mut out = String::new();
    let tier = ScoreTier::from_score(combination.probability_score);

    let _ = writeln!(
        out,
        "{rank}. {} ({}%, {})",
        combination.name,
        combination.probability_score,
        tier.label()
    );
    let _ = writeln!(out, "   Drugs: {}", combination.drugs.join(", "));

    if !combination.mechanisms.is_empty() {
        let _ = writeln!(out, "   Mechanisms of action:");
        for (drug, mechanism) in mechanism_entries(combination) {
            let _ = writeln!(out, "     {drug}: {mechanism}");
        }
    }

    let _ = writeln!(out, "   Synergy: {}", combination.synergy);
    let _ = writeln!(out, "   Interactions: {}", combination.interactions);
    let _ = writeln!(out, "   Dosage: {}", combination.dosage);

    if !combination.side_effects.is_empty() {
        let _ = writeln!(out, "   Side effects: {}", combination.side_effects.join(", "));
    }

    out
}

pub fn render_matrix(matrix: &InteractionMatrix) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Drug interaction matrix");

    let width = matrix
        .drugs
        .iter()
        .map(|d| d.len())
        .max()
        .unwrap_or(0)
        .max(8);

    let _ = write!(out, "{:width$}", "");
    for drug in &matrix.drugs {
        let _ = write!(out, "  {drug:width$}");
    }
    let _ = writeln!(out);

    for (row_drug, row) in matrix.drugs.iter().zip(&matrix.matrix) {
        let _ = write!(out, "{row_drug:width$}");
        for cell in row {
            let _ = write!(out, "  {:width$}", cell.value);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "Legend: Major = {}, Moderate = {}, None = {}",
        severity_label(InteractionSeverity::Major),
        severity_label(InteractionSeverity::Moderate),
        severity_label(InteractionSeverity::None)
    );

    out
}

/// Render a successful cycle: patient summary, ranked combinations, and the
/// interaction matrix when one was produced. A cycle with zero combinations
/// renders an explicit empty notice.
pub fn render_results(cycle: &ResultCycle) -> String {
    let mut out = String::new();

    let combinations = match &cycle.combinations {
        Some(set) if !set.combinations.is_empty() => &set.combinations,
        _ => return "No combinations found\n".to_string(),
    };

    if let Some(patient) = &cycle.patient {
        let _ = writeln!(out, "Treatment combinations for {}", patient.disease);
        let _ = write!(out, "Patient: {} years, {} kg", patient.age, patient.weight);
        if !patient.comorbidities.is_empty() {
            let _ = write!(out, " | Comorbidities: {}", patient.comorbidities);
        }
        let _ = writeln!(out);
        let _ = writeln!(out);
    }

    for (index, combination) in combinations.iter().enumerate() {
        let _ = writeln!(out, "{}", render_combination(index + 1, combination));
    }

    if let Some(matrix) = &cycle.interaction_matrix {
        let _ = writeln!(out, "{}", render_matrix(matrix));
    }

    out
}

pub fn render_interactions(interactions: &[DrugInteraction]) -> String {
    if interactions.is_empty() {
        return "No interactions found\n".to_string();
    }

    let mut out = String::new();
    for interaction in interactions {
        let _ = writeln!(
            out,
            "{} + {} [{}]: {}",
            interaction.drug1, interaction.drug2, interaction.severity, interaction.description
        );
    }
    out
}
