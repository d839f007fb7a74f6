// ============================================================
// Layer 5 — Top-K Feature Selector
// ============================================================
// Truncates the scored feature vocabulary to the K most
// informative features. Everything not selected is dropped
// from all later stages — unselected features are never
// estimated, which is where the memory saving comes from.
//
// Ordering contract:
//   - descending by score
//   - ties broken by lexicographic feature order
//
// The tie-break matters: float scores collide in practice
// (two features with identical count patterns score exactly
// equal), and without a total order the selected set would
// differ between runs. Reproducible training requires the
// same K features every time.
//
// K = 0 means "keep everything" — selection becomes a
// pass-through, not an error.
//
// Reference: Rust Book §8 (Vectors), §13 (Closures)

use std::collections::BTreeMap;

/// Select the `k` highest-scoring features, sorted descending
/// by score with lexicographic tie-break. `k == 0` returns the
/// full vocabulary in the same deterministic order.
pub fn select_best(scores: &BTreeMap<String, f64>, k: usize) -> Vec<String> {
    let mut ranked: Vec<(&str, f64)> = scores
        .iter()
        .map(|(feature, &score)| (feature.as_str(), score))
        .collect();

    // Descending score; equal scores fall back to ascending
    // feature name. total_cmp gives a total order over f64,
    // so NaN can never panic the sort.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    if k > 0 {
        ranked.truncate(k);
    }

    tracing::debug!(
        "Selected {} of {} scored features",
        ranked.len(),
        scores.len()
    );

    ranked.into_iter().map(|(feature, _)| feature.to_string()).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(f, s)| (f.to_string(), *s)).collect()
    }

    #[test]
    fn test_orders_by_descending_score() {
        let table = scores(&[("a", 0.1), ("b", 0.9), ("c", 0.5)]);
        assert_eq!(select_best(&table, 0), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_tie_broken_lexicographically() {
        // a and b tie at 0.9 — "a" wins the tie, K=1 keeps only it
        let table = scores(&[("a", 0.9), ("b", 0.9), ("c", 0.1)]);
        assert_eq!(select_best(&table, 1), vec!["a"]);
    }

    #[test]
    fn test_tie_break_is_reproducible() {
        let table = scores(&[("b", 0.5), ("a", 0.5), ("d", 0.5), ("c", 0.5)]);
        let first = select_best(&table, 2);
        for _ in 0..10 {
            assert_eq!(select_best(&table, 2), first);
        }
        assert_eq!(first, vec!["a", "b"]);
    }

    #[test]
    fn test_k_zero_keeps_everything() {
        let table = scores(&[("a", 0.2), ("b", 0.8)]);
        assert_eq!(select_best(&table, 0).len(), 2);
    }

    #[test]
    fn test_k_larger_than_vocabulary() {
        let table = scores(&[("a", 0.2), ("b", 0.8)]);
        assert_eq!(select_best(&table, 100), vec!["b", "a"]);
    }

    #[test]
    fn test_empty_score_table() {
        assert!(select_best(&BTreeMap::new(), 5).is_empty());
    }
}
