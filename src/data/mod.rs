// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw corpus files and domain Samples.
//
// The flow is short here — the statistical core (Layer 5)
// does the heavy lifting, this layer just feeds it:
//
//   samples.jsonl
//       │
//       ▼
//   JsonlCorpus   → reads one JSON record per line,
//       │           validates label and text
//       ▼
//   tokenize()    → lowercases and splits text into the
//       │           set of feature tokens
//       ▼
//   Sample        → handed to the feature counter (Layer 5)
//
// Reference: Rust Book §12 (I/O), §13 (Iterators and Closures)

/// Reads labelled samples from a JSON-lines corpus file
pub mod corpus;
