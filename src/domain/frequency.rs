// ============================================================
// Layer 3 — Frequency Distributions
// ============================================================
// Raw occurrence counts, the input to every later stage:
//
//   FreqDist            — outcome → count
//                         (e.g. label → number of samples)
//   ConditionalFreqDist — condition → FreqDist
//                         (e.g. label → feature → count)
//
// Both are sparse: an absent entry means a count of zero.
// Both merge by summation, which is commutative and
// associative — that is what lets the feature counter
// process sample partitions in any order and still produce
// identical totals.
//
// BTreeMap keeps keys sorted, so iteration order and the
// serialized JSON form are deterministic across runs.
//
// Reference: Rust Book §8 (HashMaps and BTreeMaps)

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ─── FreqDist ─────────────────────────────────────────────────────────────────
/// A frequency distribution: how many times each outcome was observed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreqDist {
    counts: BTreeMap<String, u64>,
}

impl FreqDist {
    /// Create an empty distribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count for `outcome` by 1
    pub fn inc(&mut self, outcome: &str) {
        self.inc_by(outcome, 1);
    }

    /// Increment the count for `outcome` by `n`
    pub fn inc_by(&mut self, outcome: &str, n: u64) {
        *self.counts.entry(outcome.to_string()).or_insert(0) += n;
    }

    /// The observed count for `outcome` (0 if never seen — sparse)
    pub fn count(&self, outcome: &str) -> u64 {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// Total observations across all outcomes (N)
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes observed (B)
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if nothing has been observed yet
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate (outcome, count) pairs in sorted outcome order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Absorb another distribution by summing counts.
    /// Commutative and associative — partition merge order never matters.
    pub fn merge(&mut self, other: FreqDist) {
        for (outcome, n) in other.counts {
            *self.counts.entry(outcome).or_insert(0) += n;
        }
    }
}

// ─── ConditionalFreqDist ──────────────────────────────────────────────────────
/// A family of frequency distributions, one per condition.
/// Used as (label, feature) → count: the condition is the label,
/// the inner distribution counts feature occurrences under it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalFreqDist {
    dists: BTreeMap<String, FreqDist>,
}

impl ConditionalFreqDist {
    /// Create an empty conditional distribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count of `outcome` under `condition` by 1
    pub fn inc(&mut self, condition: &str, outcome: &str) {
        self.dists
            .entry(condition.to_string())
            .or_default()
            .inc(outcome);
    }

    /// The count of `outcome` under `condition` (0 if either is unseen)
    pub fn count(&self, condition: &str, outcome: &str) -> u64 {
        self.dists
            .get(condition)
            .map(|fd| fd.count(outcome))
            .unwrap_or(0)
    }

    /// All conditions that have at least one observation, sorted
    pub fn conditions(&self) -> Vec<&str> {
        self.dists.keys().map(String::as_str).collect()
    }

    /// The union of outcomes observed under any condition, sorted.
    /// This is the candidate feature vocabulary for scoring.
    pub fn outcomes(&self) -> BTreeSet<&str> {
        self.dists
            .values()
            .flat_map(|fd| fd.iter().map(|(outcome, _)| outcome))
            .collect()
    }

    /// Iterate (condition, inner distribution) pairs in sorted
    /// condition order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FreqDist)> {
        self.dists.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Absorb another conditional distribution by summing counts
    pub fn merge(&mut self, other: ConditionalFreqDist) {
        for (condition, fd) in other.dists {
            self.dists.entry(condition).or_default().merge(fd);
        }
    }
}
