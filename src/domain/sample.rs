// ============================================================
// Layer 3 — Sample Domain Type
// ============================================================
// Represents a single labelled training sample: the label it
// belongs to and the set of features (tokens) present in it.
//
// Features form a SET, not a list — Naive Bayes with binary
// features only cares whether a token occurs in a sample,
// not how many times. Using BTreeSet (rather than HashSet)
// gives deterministic iteration order, which keeps staged
// artifacts byte-identical across runs.
//
// A Sample is immutable once read: the corpus reader creates
// it, the feature counter consumes it, and it is discarded.
//
// Reference: Rust Book §5 (Structs and Methods)
//            Rust Book §8 (Collections)

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One labelled sample from the training corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// The class this sample belongs to, e.g. "positive"
    pub label: String,

    /// The set of feature identifiers present in this sample.
    /// Binary evidence: presence matters, multiplicity does not.
    pub features: BTreeSet<String>,
}

impl Sample {
    /// Create a new Sample from a label and any iterable of features.
    /// Uses impl Into<String> so callers can pass &str or String.
    pub fn new(
        label: impl Into<String>,
        features: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            label:    label.into(),
            features: features.into_iter().map(Into::into).collect(),
        }
    }
}
