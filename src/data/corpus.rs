// ============================================================
// Layer 4 — JSON-Lines Corpus Reader
// ============================================================
// Reads labelled samples from a .jsonl file, one record per
// line:
//
//   {"label": "positive", "text": "loved every minute of it"}
//   {"label": "negative", "text": "what a waste of time"}
//
// Records are taken in file order, so the same file and the
// same count always yield the same samples — reproducible
// training depends on this.
//
// Validation is strict and fail-fast:
//   - fewer records than requested  → corpus exhausted error
//   - unparseable line              → error
//   - missing / empty label         → error
//   - text with no usable tokens    → error
//
// Why fail instead of skipping bad lines?
//   A silently skipped sample shifts every count that feeds
//   the probability estimates. Better to refuse the corpus
//   than to train a subtly biased model.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;

use crate::domain::error::TrainError;
use crate::domain::sample::Sample;
use crate::domain::traits::SampleSource;

/// One raw record as it appears in the corpus file,
/// before tokenisation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    label: String,
    #[serde(default)]
    text: String,
}

/// Reads samples from a JSON-lines file on disk.
/// Implements the SampleSource trait from Layer 3.
pub struct JsonlCorpus {
    /// Path to the .jsonl corpus file
    path: String,
}

impl JsonlCorpus {
    /// Create a new corpus reader pointed at a file
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl SampleSource for JsonlCorpus {
    fn samples(&self, count: usize) -> Result<Vec<Sample>, TrainError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            TrainError::Corpus(format!("cannot read corpus '{}': {e}", self.path))
        })?;

        let mut samples = Vec::with_capacity(count);

        // Enumerate lines so error messages point at the culprit.
        // Blank lines (e.g. a trailing newline) are not records.
        for (line_no, line) in contents.lines().enumerate() {
            if samples.len() == count {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            let record: RawRecord = serde_json::from_str(line).map_err(|e| {
                TrainError::Corpus(format!(
                    "malformed record at line {}: {e}",
                    line_no + 1
                ))
            })?;

            if record.label.trim().is_empty() {
                return Err(TrainError::Corpus(format!(
                    "missing label at line {}",
                    line_no + 1
                )));
            }

            let features = tokenize(&record.text);
            if features.is_empty() {
                return Err(TrainError::Corpus(format!(
                    "no usable tokens at line {}",
                    line_no + 1
                )));
            }

            samples.push(Sample {
                label: record.label,
                features,
            });
        }

        // Exhausted before reaching the requested count — fail fast
        // rather than train on fewer samples than asked for.
        if samples.len() < count {
            return Err(TrainError::Corpus(format!(
                "corpus exhausted: requested {count} samples, found {}",
                samples.len()
            )));
        }

        tracing::info!("Read {} samples from '{}'", samples.len(), self.path);
        Ok(samples)
    }
}

/// Turn raw text into its set of feature tokens.
///
/// Lowercase, split on any non-alphanumeric character, drop
/// empty fragments. Duplicates collapse because the result is
/// a set — binary features only record presence.
///
/// Char-level iteration keeps this Unicode-safe without
/// pulling in a regex engine for a single split.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|tok| !tok.is_empty())
        .map(str::to_string)
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Write a corpus file with the given lines into a temp dir
    fn corpus_file(dir: &tempfile::TempDir, lines: &[&str]) -> String {
        let path = dir.path().join("samples.jsonl");
        let mut f = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(f, "{line}").unwrap();
        }
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        let toks = tokenize("Loved it, LOVED it!");
        let expected: BTreeSet<String> =
            ["loved", "it"].iter().map(|s| s.to_string()).collect();
        assert_eq!(toks, expected);
    }

    #[test]
    fn test_tokenize_punctuation_only_is_empty() {
        assert!(tokenize("?! ... --").is_empty());
    }

    #[test]
    fn test_reads_requested_count_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = corpus_file(
            &dir,
            &[
                r#"{"label": "pos", "text": "good fun"}"#,
                r#"{"label": "neg", "text": "bad"}"#,
                r#"{"label": "pos", "text": "great"}"#,
            ],
        );

        let samples = JsonlCorpus::new(&path).samples(2).unwrap();
        assert_eq!(samples.len(), 2);
        // File order is preserved — determinism contract
        assert_eq!(samples[0].label, "pos");
        assert_eq!(samples[1].label, "neg");
    }

    #[test]
    fn test_exhausted_corpus_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = corpus_file(&dir, &[r#"{"label": "pos", "text": "good"}"#]);

        let err = JsonlCorpus::new(&path).samples(5).unwrap_err();
        assert!(matches!(err, TrainError::Corpus(_)));
        assert!(err.to_string().contains("exhausted"));
    }

    #[test]
    fn test_missing_label_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = corpus_file(&dir, &[r#"{"text": "good fun"}"#]);

        let err = JsonlCorpus::new(&path).samples(1).unwrap_err();
        assert!(matches!(err, TrainError::Corpus(_)));
        assert!(err.to_string().contains("label"));
    }

    #[test]
    fn test_tokenless_text_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = corpus_file(&dir, &[r#"{"label": "pos", "text": "!!!"}"#]);

        let err = JsonlCorpus::new(&path).samples(1).unwrap_err();
        assert!(matches!(err, TrainError::Corpus(_)));
    }

    #[test]
    fn test_same_file_same_count_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = corpus_file(
            &dir,
            &[
                r#"{"label": "pos", "text": "good fun"}"#,
                r#"{"label": "neg", "text": "bad day"}"#,
            ],
        );

        let corpus = JsonlCorpus::new(&path);
        let a = corpus.samples(2).unwrap();
        let b = corpus.samples(2).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.label, y.label);
            assert_eq!(x.features, y.features);
        }
    }
}
