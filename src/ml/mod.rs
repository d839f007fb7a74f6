// ============================================================
// Layer 5 — Statistical Core
// ============================================================
// The actual training mathematics. Everything in this layer
// is a pure transformation: counts in, new frozen value out.
// No stage reaches back into an earlier stage's storage.
//
// Pipeline order (each module is one stage):
//
//   counter.rs   — parallel per-label feature counting
//                  (the only stage that parallelizes)
//       │
//       ▼
//   scorer.rs    — information gain per feature
//       │
//       ▼
//   selector.rs  — keep the top-K features, deterministic
//       │
//       ▼
//   estimator.rs — expected-likelihood smoothing:
//                  counts → probabilities, never zero
//       │
//       ▼
//   model.rs     — bundle prior + conditionals into the
//                  final NaiveBayesModel
//
// Reference: Rust Book §13 (Iterators and Closures)
//            rayon crate documentation

/// Parallel feature counting and the aggregated count tables
pub mod counter;

/// Information-gain scoring of candidate features
pub mod scorer;

/// Top-K feature selection with deterministic tie-break
pub mod selector;

/// Additive-smoothing probability estimation
pub mod estimator;

/// The trained model value and its consistency-checked assembly
pub mod model;
