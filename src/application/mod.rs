// ============================================================
// Layer 2 — Application Layer (Use Cases)
// ============================================================
// One module per user-facing operation:
//
//   train_use_case.rs  — the full training pipeline, from
//                        corpus to persisted classifier
//   report_use_case.rs — read-only report over staged
//                        artifacts (top informative features)
//
// This layer orchestrates; it owns no algorithms and no
// persistence details. It wires Layer 4 (data), Layer 5 (ml)
// and Layer 6 (infra) together through the Layer 3 traits.
//
// Reference: Rust Book §7 (Modules)

/// The end-to-end training pipeline
pub mod train_use_case;

/// Top-features report over a previous run's staged artifacts
pub mod report_use_case;
