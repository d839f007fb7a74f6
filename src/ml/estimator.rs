// ============================================================
// Layer 5 — Expected-Likelihood Probability Estimator
// ============================================================
// Converts frozen frequency counts into smoothed probability
// distributions. For B possible outcomes with observed counts
// c₁…c_B and total N, each outcome is estimated as
//
//   p(i) = (cᵢ + λ) / (N + λ·B)
//
// λ = 0.5 is the conventional "expected likelihood estimate".
// The additive λ is what keeps unseen (label, feature)
// combinations away from probability zero — a single zero
// would collapse the classifier's product of probabilities at
// inference time regardless of all other evidence.
//
// λ is configurable rather than hard-coded: changing the
// smoothing constant materially changes the estimated
// probabilities, so it belongs in TrainConfig.
//
// Applied twice in the pipeline:
//   - prior over labels           (B = number of labels)
//   - conditional per (label, f)  (B = 2: present / absent)
//
// Division by zero is impossible: λ > 0 is enforced at
// construction, so N + λ·B > 0 whenever B ≥ 1.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::error::TrainError;
use crate::domain::frequency::FreqDist;

/// The conventional ELE smoothing constant
pub const DEFAULT_LAMBDA: f64 = 0.5;

/// Smoothed prior over labels: label → probability, sums to 1
pub type LabelPrior = BTreeMap<String, f64>;

/// Smoothed binary distribution over {present, absent} for one
/// (label, feature) pair. present + absent = 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinaryDist {
    /// P(feature present | label)
    pub present: f64,

    /// P(feature absent | label)
    pub absent: f64,
}

/// Additive-smoothing estimator with a fixed λ.
#[derive(Debug, Clone, Copy)]
pub struct Estimator {
    lambda: f64,
}

impl Estimator {
    /// Create an estimator with smoothing constant `lambda`.
    /// λ must be strictly positive — that is what guarantees
    /// no estimate is ever exactly 0 or 1.
    pub fn new(lambda: f64) -> Result<Self, TrainError> {
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(TrainError::InvalidConfig(format!(
                "lambda must be a positive number, got {lambda}"
            )));
        }
        Ok(Self { lambda })
    }

    /// Smooth a count vector over B = counts.len() outcomes.
    /// Core formula shared by `prior` and `binary`.
    fn smooth(&self, counts: &[u64]) -> Vec<f64> {
        let n: u64 = counts.iter().sum();
        let bins = counts.len() as f64;
        let denom = n as f64 + self.lambda * bins;

        counts
            .iter()
            .map(|&c| (c as f64 + self.lambda) / denom)
            .collect()
    }

    /// Estimate the prior P(label) from per-label sample totals.
    /// B = number of labels observed.
    pub fn prior(&self, label_totals: &FreqDist) -> Result<LabelPrior, TrainError> {
        if label_totals.is_empty() {
            return Err(TrainError::InvalidConfig(
                "cannot estimate a prior over zero labels".to_string(),
            ));
        }

        let counts: Vec<u64> = label_totals.iter().map(|(_, c)| c).collect();
        let probs = self.smooth(&counts);

        Ok(label_totals
            .iter()
            .map(|(label, _)| label.to_string())
            .zip(probs)
            .collect())
    }

    /// Estimate P(present | label) / P(absent | label) for one
    /// (label, feature) pair: `trues` samples of the label
    /// contained the feature, out of `total` samples. B = 2.
    pub fn binary(&self, trues: u64, total: u64) -> Result<BinaryDist, TrainError> {
        // More occurrences than samples means the count tables
        // disagree — an aggregation bug, never repair silently.
        if trues > total {
            return Err(TrainError::InconsistentModel(format!(
                "feature occurred {trues} times in only {total} samples"
            )));
        }

        let probs = self.smooth(&[trues, total - trues]);
        Ok(BinaryDist {
            present: probs[0],
            absent:  probs[1],
        })
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self { lambda: DEFAULT_LAMBDA }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_scenario_conditional_estimate() {
        // λ=0.5, B=2: P(a present | pos) = (2+0.5)/(2+1) = 0.8333…
        let est = Estimator::new(0.5).unwrap();
        let dist = est.binary(2, 2).unwrap();
        assert!((dist.present - 2.5 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_binary_normalizes() {
        let est = Estimator::default();
        for (trues, total) in [(0, 4), (1, 4), (4, 4), (0, 0)] {
            let d = est.binary(trues, total).unwrap();
            assert!((d.present + d.absent - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_no_zero_or_one_probabilities() {
        // Even a never-seen feature (trues = 0) and an
        // always-seen feature (trues = total) stay strictly
        // inside (0, 1)
        let est = Estimator::default();

        let unseen = est.binary(0, 100).unwrap();
        assert!(unseen.present > 0.0 && unseen.present < 1.0);

        let ubiquitous = est.binary(100, 100).unwrap();
        assert!(ubiquitous.present > 0.0 && ubiquitous.present < 1.0);
        assert!(ubiquitous.absent > 0.0);
    }

    #[test]
    fn test_prior_normalizes_and_orders_by_count() {
        let mut totals = FreqDist::new();
        totals.inc_by("neg", 1);
        totals.inc_by("pos", 3);

        let prior = Estimator::default().prior(&totals).unwrap();
        let sum: f64 = prior.values().sum();
        assert!((sum - 1.0).abs() < EPS);
        assert!(prior["pos"] > prior["neg"]);

        // (3 + 0.5) / (4 + 0.5·2) = 0.7
        assert!((prior["pos"] - 0.7).abs() < EPS);
    }

    #[test]
    fn test_occurrences_exceeding_total_is_inconsistent() {
        let err = Estimator::default().binary(5, 2).unwrap_err();
        assert!(matches!(err, TrainError::InconsistentModel(_)));
    }

    #[test]
    fn test_lambda_must_be_positive() {
        assert!(matches!(
            Estimator::new(0.0).unwrap_err(),
            TrainError::InvalidConfig(_)
        ));
        assert!(matches!(
            Estimator::new(-1.0).unwrap_err(),
            TrainError::InvalidConfig(_)
        ));
        assert!(matches!(
            Estimator::new(f64::NAN).unwrap_err(),
            TrainError::InvalidConfig(_)
        ));
    }

    #[test]
    fn test_empty_prior_is_rejected() {
        let err = Estimator::default().prior(&FreqDist::new()).unwrap_err();
        assert!(matches!(err, TrainError::InvalidConfig(_)));
    }
}
