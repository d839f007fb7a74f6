// ============================================================
// Layer 5 — Information-Gain Feature Scorer
// ============================================================
// Scores every observed feature by how much knowing its
// presence/absence reduces uncertainty about the label.
//
// For a feature f, treated as a binary split variable:
//
//   gain(f) = H(labels)
//           − P(f present) · H(labels | f present)
//           − P(f absent)  · H(labels | f absent)
//
// where H is Shannon entropy in bits over the label
// distribution, with the convention 0·log2(0) = 0.
//
// Intuition:
//   - a feature occurring under only one label makes the
//     "present" branch certain → high gain
//   - a feature spread evenly across labels in proportion to
//     the label totals tells us nothing → gain near 0
//
// The scorer reads only the frozen FeatureCounts — it never
// touches samples or the store. Output is an unordered score
// table; ranking is the selector's job.
//
// Reference: Rust Book §13 (Iterators)

use std::collections::BTreeMap;

use crate::ml::counter::FeatureCounts;

/// Compute the information gain of every observed feature.
///
/// Returns feature → score. An empty count table scores an
/// empty map — nothing observed, nothing to rank.
pub fn information_gain(counts: &FeatureCounts) -> BTreeMap<String, f64> {
    let labels = counts.labels();
    let total = counts.total_samples();

    let mut scores = BTreeMap::new();
    if total == 0 {
        return scores;
    }

    // Entropy of the unconditioned label distribution
    let label_totals: Vec<u64> = labels
        .iter()
        .map(|label| counts.label_count(label))
        .collect();
    let prior_entropy = entropy(&label_totals);

    for feature in counts.features() {
        // Per-label counts for the two branches of the split:
        // "present" = samples of the label containing f,
        // "absent"  = the label's remaining samples
        let present: Vec<u64> = labels
            .iter()
            .map(|label| counts.feature_count(label, feature))
            .collect();
        let absent: Vec<u64> = labels
            .iter()
            .zip(&present)
            .map(|(label, &with)| counts.label_count(label) - with)
            .collect();

        let n_present: u64 = present.iter().sum();
        let n_absent = total - n_present;

        // Branch entropies weighted by branch probability
        let conditioned = (n_present as f64 / total as f64) * entropy(&present)
            + (n_absent as f64 / total as f64) * entropy(&absent);

        scores.insert(feature.to_string(), prior_entropy - conditioned);
    }

    scores
}

/// Shannon entropy in bits of a count vector.
/// Zero counts contribute nothing (0·log2(0) = 0 convention);
/// an all-zero vector has entropy 0.
fn entropy(counts: &[u64]) -> f64 {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }

    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}
