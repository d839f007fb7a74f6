// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence that no business layer owns:
//
//   store.rs — the file-backed key-value model store.
//              One JSON file per key in a managed directory.
//              Holds staged intermediate artifacts (count
//              tables, score table, selected features) and
//              the final trained classifier.
//
// Why is this a separate layer?
//   The training pipeline only knows the ModelStore trait
//   from the domain layer. Keeping the file implementation
//   here means it can be swapped for Redis or S3 without
//   touching a single pipeline stage.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// File-backed implementation of the ModelStore trait
pub mod store;
