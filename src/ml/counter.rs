// ============================================================
// Layer 5 — Parallel Feature Counter
// ============================================================
// The fork-join stage of the pipeline and the only one that
// parallelizes. The sample sequence is split into `processes`
// roughly equal contiguous chunks; each chunk is counted into
// its own private FeatureCounts on a rayon worker; the partial
// results are merged by a single-threaded summation after all
// workers finish.
//
// Why is this safe without locks?
//   - each worker owns its partial count map exclusively
//   - the merge only starts once every chunk has completed
//     (rayon's collect() is the join barrier)
//   - merging is summation: commutative and associative, so
//     partition boundaries and completion order never change
//     the result
//
// Failure policy: if any chunk errors, the whole stage aborts.
// Merging a subset of partitions would silently bias every
// probability estimated downstream.
//
// Per sample:
//   - the label's total goes up by 1 (once per sample)
//   - each feature in the sample's set bumps (label, feature)
//     by 1
// A sample with no features still counts toward its label
// total — that is valid input here, not an error.
//
// Reference: rayon crate documentation (par_chunks)
//            Rust Book §16 (Fearless Concurrency)

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::error::TrainError;
use crate::domain::frequency::{ConditionalFreqDist, FreqDist};
use crate::domain::sample::Sample;

// ─── FeatureCounts ────────────────────────────────────────────────────────────
/// The aggregated output of counting: per-label sample totals
/// plus the sparse (label, feature) occurrence table.
///
/// Frozen once counting completes — every later stage reads it,
/// none mutates it. Serializable so it can be staged in the
/// model store and reloaded to resume a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCounts {
    /// label → number of samples observed with that label
    pub label_totals: FreqDist,

    /// label → feature → number of that label's samples
    /// containing the feature
    pub feature_counts: ConditionalFreqDist,
}

impl FeatureCounts {
    /// Total samples observed for `label`
    pub fn label_count(&self, label: &str) -> u64 {
        self.label_totals.count(label)
    }

    /// Samples of `label` that contained `feature` (0 if unseen)
    pub fn feature_count(&self, label: &str, feature: &str) -> u64 {
        self.feature_counts.count(label, feature)
    }

    /// All labels observed, sorted
    pub fn labels(&self) -> Vec<&str> {
        self.label_totals.iter().map(|(label, _)| label).collect()
    }

    /// Every feature observed under any label, sorted.
    /// This is the candidate vocabulary handed to the scorer.
    pub fn features(&self) -> BTreeSet<&str> {
        self.feature_counts.outcomes()
    }

    /// Total samples across all labels
    pub fn total_samples(&self) -> u64 {
        self.label_totals.total()
    }

    /// Absorb another set of counts by summation
    fn merge(&mut self, other: FeatureCounts) {
        self.label_totals.merge(other.label_totals);
        self.feature_counts.merge(other.feature_counts);
    }

    /// Check the internal consistency of the count tables:
    /// every conditioned label must exist in the label totals,
    /// and no feature can occur in more samples of a label than
    /// the label has.
    ///
    /// Counting always produces consistent tables, but counts
    /// loaded from staged JSON are untrusted input — a corrupt
    /// or hand-edited table would otherwise underflow the
    /// scorer's absent-branch subtraction.
    pub fn validate(&self) -> Result<(), TrainError> {
        for (label, features) in self.feature_counts.iter() {
            let label_total = self.label_totals.count(label);

            if label_total == 0 {
                return Err(TrainError::InconsistentModel(format!(
                    "feature counts for label '{label}' with no sample total"
                )));
            }

            for (feature, occurrences) in features.iter() {
                if occurrences > label_total {
                    return Err(TrainError::InconsistentModel(format!(
                        "feature '{feature}' occurred {occurrences} times in \
                         only {label_total} '{label}' samples"
                    )));
                }
            }
        }
        Ok(())
    }
}

// ─── count_features ───────────────────────────────────────────────────────────
/// Count feature occurrences per label across all samples,
/// using up to `processes` parallel partitions.
///
/// `processes` must be ≥ 1; asking for more partitions than
/// samples degrades gracefully to one sample per partition.
pub fn count_features(
    samples: &[Sample],
    processes: usize,
) -> Result<FeatureCounts, TrainError> {
    if processes == 0 {
        return Err(TrainError::InvalidConfig(
            "processes must be at least 1".to_string(),
        ));
    }

    // Nothing to count — valid, just empty tables
    if samples.is_empty() {
        return Ok(FeatureCounts::default());
    }

    // P > sample count degrades to P = sample count
    let partitions = processes.min(samples.len());
    let chunk_size = samples.len().div_ceil(partitions);

    tracing::debug!(
        "Counting {} samples in {} partition(s) of up to {} samples",
        samples.len(),
        partitions,
        chunk_size,
    );

    // Fork: each chunk is counted into a private FeatureCounts.
    // collect() on Result short-circuits — any failed partition
    // aborts the whole stage before the merge.
    let partials: Result<Vec<FeatureCounts>, TrainError> = samples
        .par_chunks(chunk_size)
        .map(count_partition)
        .collect();

    // Join: single-threaded commutative merge of all partials
    let mut totals = FeatureCounts::default();
    for partial in partials? {
        totals.merge(partial);
    }

    tracing::info!(
        "Counted {} samples: {} labels, {} distinct features",
        totals.total_samples(),
        totals.labels().len(),
        totals.features().len(),
    );
    Ok(totals)
}

/// Count one contiguous partition of samples.
/// Runs on a rayon worker; owns its output exclusively.
fn count_partition(chunk: &[Sample]) -> Result<FeatureCounts, TrainError> {
    let mut counts = FeatureCounts::default();

    for sample in chunk {
        // The corpus reader validates labels, but other
        // SampleSource impls might not — a blank label here
        // must abort the stage, not vanish into a "" bucket.
        if sample.label.trim().is_empty() {
            return Err(TrainError::Worker(
                "sample with empty label in counting partition".to_string(),
            ));
        }

        // Label total: once per sample, not per feature
        counts.label_totals.inc(&sample.label);

        for feature in &sample.features {
            counts.feature_counts.inc(&sample.label, feature);
        }
    }

    Ok(counts)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// The four-sample scenario used throughout the test suite:
    /// (pos,{a,b}), (pos,{a}), (neg,{b}), (neg,{c})
    fn scenario() -> Vec<Sample> {
        vec![
            Sample::new("pos", ["a", "b"]),
            Sample::new("pos", ["a"]),
            Sample::new("neg", ["b"]),
            Sample::new("neg", ["c"]),
        ]
    }

    #[test]
    fn test_scenario_counts() {
        let counts = count_features(&scenario(), 2).unwrap();

        assert_eq!(counts.label_count("pos"), 2);
        assert_eq!(counts.label_count("neg"), 2);
        assert_eq!(counts.feature_count("pos", "a"), 2);
        assert_eq!(counts.feature_count("pos", "b"), 1);
        assert_eq!(counts.feature_count("neg", "b"), 1);
        assert_eq!(counts.feature_count("neg", "c"), 1);
        // Never observed — sparse zero, not an error
        assert_eq!(counts.feature_count("neg", "a"), 0);
        assert_eq!(counts.total_samples(), 4);
    }

    #[test]
    fn test_count_conservation_across_all_partitionings() {
        // Merged counts must equal single-threaded counts for
        // every partition degree from 1 to the sample count
        let samples = scenario();
        let reference = count_features(&samples, 1).unwrap();

        for p in 1..=samples.len() {
            let counted = count_features(&samples, p).unwrap();
            assert_eq!(counted, reference, "partition degree {p} diverged");
        }
    }

    #[test]
    fn test_more_partitions_than_samples_degrades() {
        let samples = scenario();
        let counted = count_features(&samples, 64).unwrap();
        assert_eq!(counted, count_features(&samples, 1).unwrap());
    }

    #[test]
    fn test_zero_processes_is_invalid() {
        let err = count_features(&scenario(), 0).unwrap_err();
        assert!(matches!(err, TrainError::InvalidConfig(_)));
    }

    #[test]
    fn test_featureless_sample_counts_toward_label_total() {
        let samples = vec![
            Sample::new("pos", ["a"]),
            Sample::new("pos", Vec::<String>::new()),
        ];
        let counts = count_features(&samples, 1).unwrap();
        assert_eq!(counts.label_count("pos"), 2);
        assert_eq!(counts.feature_count("pos", "a"), 1);
    }

    #[test]
    fn test_empty_label_aborts_the_stage() {
        let samples = vec![Sample::new("pos", ["a"]), Sample::new("", ["b"])];
        let err = count_features(&samples, 2).unwrap_err();
        assert!(matches!(err, TrainError::Worker(_)));
    }

    #[test]
    fn test_no_samples_yields_empty_counts() {
        let counts = count_features(&[], 4).unwrap();
        assert_eq!(counts.total_samples(), 0);
        assert!(counts.labels().is_empty());
    }

    #[test]
    fn test_counted_tables_validate() {
        let counts = count_features(&scenario(), 2).unwrap();
        counts.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_count_above_label_total() {
        // A table no counting run can produce: "a" in 3 samples
        // of a label that only has 1
        let mut counts = count_features(&[Sample::new("pos", ["a"])], 1).unwrap();
        counts.feature_counts.inc("pos", "a");
        counts.feature_counts.inc("pos", "a");

        let err = counts.validate().unwrap_err();
        assert!(matches!(err, TrainError::InconsistentModel(_)));
    }

    #[test]
    fn test_validate_rejects_unknown_label() {
        let mut counts = FeatureCounts::default();
        counts.feature_counts.inc("pos", "a");

        let err = counts.validate().unwrap_err();
        assert!(matches!(err, TrainError::InconsistentModel(_)));
    }

    #[test]
    fn test_feature_count_never_exceeds_label_total() {
        let counts = count_features(&scenario(), 3).unwrap();
        for label in counts.labels() {
            let total = counts.label_count(label);
            for feature in counts.features() {
                assert!(counts.feature_count(label, feature) <= total);
            }
        }
    }
}
