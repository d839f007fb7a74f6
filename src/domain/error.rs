// ============================================================
// Layer 3 — Training Error Kinds
// ============================================================
// The typed failure modes of the training pipeline.
//
// Policy per kind:
//   Corpus            — fail fast, never train on a partial or
//                       corrupt corpus
//   Worker            — a counting partition failed; abort the
//                       whole stage rather than merge a subset,
//                       which would bias the model
//   InconsistentModel — an internal consistency check failed;
//                       fatal, never persist a malformed model
//   InvalidConfig     — a parameter outside its valid range
//                       (e.g. zero workers, non-positive lambda)
//
// Note: "classifier already trained" is deliberately NOT an
// error kind. The idempotence guard treats it as a successful
// no-op, handled in the application layer.
//
// thiserror derives std::error::Error, so these convert into
// anyhow::Error with `?` at the application boundary.
//
// Reference: Rust Book §9 (Error Handling)

use thiserror::Error;

/// Everything that can go fatally wrong while training.
#[derive(Debug, Error)]
pub enum TrainError {
    /// The corpus ran out early or yielded a malformed sample
    #[error("corpus error: {0}")]
    Corpus(String),

    /// A parallel counting partition failed
    #[error("counting worker failed: {0}")]
    Worker(String),

    /// Prior and conditional tables disagree — an aggregation bug
    #[error("inconsistent model: {0}")]
    InconsistentModel(String),

    /// A configuration parameter is outside its valid range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
