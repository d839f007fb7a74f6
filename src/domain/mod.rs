// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// This is the heart of the application — pure Rust structs
// and traits that define the core concepts of the system.
//
// Rules for this layer:
//   - NO file I/O or network calls
//   - NO threading / rayon code
//   - Only plain Rust structs, enums, and traits
//
// Why keep this layer pure?
//   - Easy to unit test (no disk or corpus needed)
//   - Easy to understand (no framework noise)
//   - Easy to swap implementations (just implement the trait)
//
// Think of this layer as the "dictionary" of the system —
// it defines what things ARE, not how they work.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A single labelled training sample
pub mod sample;

// Frequency distributions — the raw count tables
pub mod frequency;

// Typed error kinds for the training pipeline
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
