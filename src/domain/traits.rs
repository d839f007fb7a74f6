// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - JsonlCorpus implements SampleSource
//   - A future SqliteCorpus could also implement SampleSource
//   - The application layer only sees SampleSource
//     and works with both without any changes
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;
use serde_json::Value;

use crate::domain::error::TrainError;
use crate::domain::sample::Sample;

// ─── SampleSource ─────────────────────────────────────────────────────────────
/// Any component that can yield labelled training samples.
///
/// Implementations:
///   - JsonlCorpus → reads a JSON-lines file from disk
///   - (future) SqliteCorpus → reads from a sample database
pub trait SampleSource {
    /// Return exactly `count` samples from this source.
    ///
    /// Must be deterministic for a given source and count so
    /// training runs are reproducible. Fails with
    /// TrainError::Corpus if fewer than `count` samples exist
    /// or any sample is malformed — training on a partial or
    /// corrupt corpus is never allowed.
    fn samples(&self, count: usize) -> Result<Vec<Sample>, TrainError>;
}

// ─── ModelStore ───────────────────────────────────────────────────────────────
/// A key-value store for staged artifacts and the final model.
///
/// Values are opaque JSON blobs: the store never interprets
/// what it holds. Used to stage intermediate count tables under
/// well-known keys (so a long run can resume without
/// recomputation) and to persist the trained classifier under
/// its name key.
///
/// Implementations:
///   - JsonFileStore → one JSON file per key in a directory
///   - (future) RedisStore → keys in a Redis instance
pub trait ModelStore {
    /// Persist `value` under `key`, overwriting any previous value
    fn set(&self, key: &str, value: &Value) -> Result<()>;

    /// Retrieve the value stored under `key`.
    /// Returns an error if the key does not exist.
    fn get(&self, key: &str) -> Result<Value>;

    /// True if `key` currently holds a value
    fn exists(&self, key: &str) -> bool;

    /// Delete `key` if present. Deleting a missing key is a no-op.
    fn remove(&self, key: &str) -> Result<()>;
}
