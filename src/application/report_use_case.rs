// ============================================================
// Layer 2 — FeaturesReportUseCase
// ============================================================
// Read-only report over a previous training run: loads the
// staged score table from the model store and returns the
// top-N features in the selector's deterministic order.
//
// Useful for eyeballing what the classifier will actually
// condition on before (or after) committing to a model —
// a surprising top feature usually means a corpus problem.
//
// Requires a prior `train` run to have staged the scores;
// fails with a pointer to `train` otherwise.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::collections::BTreeMap;

use crate::application::train_use_case::KEY_FEATURE_SCORES;
use crate::domain::traits::ModelStore;
use crate::infra::store::JsonFileStore;
use crate::ml::selector::select_best;

/// Loads staged feature scores and ranks them.
pub struct FeaturesReportUseCase {
    store_dir: String,
}

impl FeaturesReportUseCase {
    /// Create a report use case over the given store directory
    pub fn new(store_dir: impl Into<String>) -> Self {
        Self { store_dir: store_dir.into() }
    }

    /// Return the top `count` features as (feature, score)
    /// pairs, descending by score with the selector's
    /// lexicographic tie-break. `count == 0` returns all.
    pub fn top_features(&self, count: usize) -> Result<Vec<(String, f64)>> {
        let store = JsonFileStore::new(&self.store_dir)?;

        let scores: BTreeMap<String, f64> =
            serde_json::from_value(store.get(KEY_FEATURE_SCORES).context(
                "no staged feature scores found — run 'train' first",
            )?)?;

        let ranked = select_best(&scores, count);
        Ok(ranked
            .into_iter()
            .map(|feature| {
                let score = scores[&feature];
                (feature, score)
            })
            .collect())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reports_staged_scores_in_rank_order() {
        let dir = tempfile::tempdir().unwrap();
        let store_dir = dir.path().to_string_lossy().into_owned();

        let store = JsonFileStore::new(&store_dir).unwrap();
        store
            .set(KEY_FEATURE_SCORES, &json!({"a": 0.2, "b": 0.9, "c": 0.5}))
            .unwrap();

        let report = FeaturesReportUseCase::new(&store_dir);
        let top = report.top_features(2).unwrap();

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, "b");
        assert_eq!(top[1].0, "c");
        assert!((top[0].1 - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_missing_scores_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let report = FeaturesReportUseCase::new(dir.path().to_string_lossy());
        assert!(report.top_features(5).is_err());
    }
}
