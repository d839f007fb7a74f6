// ============================================================
// Layer 5 — Trained Model and Assembly
// ============================================================
// The terminal artifact of training: the smoothed prior over
// labels plus one binary conditional distribution per
// (label, selected feature) pair.
//
// The conditional table is nested label → feature → BinaryDist
// rather than keyed by a (label, feature) tuple so the model
// serialises to plain JSON maps.
//
// Assembly does no computation — it only bundles the two
// distributions and asserts they describe the same label set.
// A mismatch there means the aggregation produced distributions
// for a label the prior never saw (or vice versa): an internal
// bug that must fail loudly, never be repaired silently or
// persisted.
//
// Reference: Rust Book §5 (Structs), §9 (Error Handling)

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::error::TrainError;
use crate::ml::estimator::{BinaryDist, LabelPrior};

/// Per-label conditional table: label → feature → distribution
pub type ConditionalTable = BTreeMap<String, BTreeMap<String, BinaryDist>>;

/// The trained Naive Bayes classifier, immutable once built.
/// PartialEq supports the store's content-equality checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    /// P(label) — smoothed prior over the label set
    pub label_probs: LabelPrior,

    /// P(feature present/absent | label) for every selected
    /// feature under every label
    pub feature_probs: ConditionalTable,
}

/// Bundle the prior and conditional table into the final model.
///
/// Fails with InconsistentModel if the two disagree on the
/// label set — a consistency assertion, not a repair.
pub fn assemble(
    prior: LabelPrior,
    conditionals: ConditionalTable,
) -> Result<NaiveBayesModel, TrainError> {
    let prior_labels: BTreeSet<&String> = prior.keys().collect();
    let cond_labels: BTreeSet<&String> = conditionals.keys().collect();

    if prior_labels != cond_labels {
        return Err(TrainError::InconsistentModel(format!(
            "prior labels {prior_labels:?} != conditional labels {cond_labels:?}"
        )));
    }

    Ok(NaiveBayesModel {
        label_probs:   prior,
        feature_probs: conditionals,
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn prior(labels: &[(&str, f64)]) -> LabelPrior {
        labels.iter().map(|(l, p)| (l.to_string(), *p)).collect()
    }

    fn conditionals(labels: &[&str]) -> ConditionalTable {
        labels
            .iter()
            .map(|label| {
                let mut features = BTreeMap::new();
                features.insert(
                    "a".to_string(),
                    BinaryDist { present: 0.5, absent: 0.5 },
                );
                (label.to_string(), features)
            })
            .collect()
    }

    #[test]
    fn test_assemble_with_matching_labels() {
        let model = assemble(
            prior(&[("neg", 0.5), ("pos", 0.5)]),
            conditionals(&["neg", "pos"]),
        )
        .unwrap();

        assert_eq!(model.label_probs.len(), 2);
        assert!(model.feature_probs["pos"].contains_key("a"));
    }

    #[test]
    fn test_assemble_rejects_label_mismatch() {
        // Conditional table knows "neu", the prior does not
        let err = assemble(
            prior(&[("neg", 0.5), ("pos", 0.5)]),
            conditionals(&["neg", "pos", "neu"]),
        )
        .unwrap_err();

        assert!(matches!(err, TrainError::InconsistentModel(_)));
    }

    #[test]
    fn test_assemble_rejects_missing_conditional_label() {
        let err = assemble(
            prior(&[("neg", 0.5), ("pos", 0.5)]),
            conditionals(&["pos"]),
        )
        .unwrap_err();

        assert!(matches!(err, TrainError::InconsistentModel(_)));
    }

    #[test]
    fn test_model_roundtrips_through_json() {
        let model = assemble(
            prior(&[("neg", 0.25), ("pos", 0.75)]),
            conditionals(&["neg", "pos"]),
        )
        .unwrap();

        let json = serde_json::to_value(&model).unwrap();
        let back: NaiveBayesModel = serde_json::from_value(json).unwrap();
        assert_eq!(back, model);
    }
}
