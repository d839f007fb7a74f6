// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Open the model store          (Layer 6 - infra)
//   Step 2: Purge / idempotence guard     (Layer 6 - infra)
//   Step 3: Read samples, count features  (Layers 4+5)
//           — or resume from staged counts
//   Step 4: Score features                (Layer 5 - ml)
//   Step 5: Select the top-K              (Layer 5 - ml)
//   Step 6: Estimate distributions        (Layer 5 - ml)
//   Step 7: Assemble the model            (Layer 5 - ml)
//   Step 8: Persist under the name key    (Layer 6 - infra)
//
// The steps are strictly sequential; each stage returns a new
// frozen value consumed by the next. Intermediate artifacts
// are staged in the store under well-known keys after each
// producing step, so a long run can resume from its counts
// without re-reading the corpus. Staging is a cache — the
// only key with correctness semantics is the classifier name.
//
// Nothing is ever written under the classifier-name key until
// every stage has succeeded: a fatal error anywhere leaves a
// previously-persisted model untouched.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::data::corpus::JsonlCorpus;
use crate::domain::frequency::{ConditionalFreqDist, FreqDist};
use crate::domain::traits::{ModelStore, SampleSource};
use crate::infra::store::JsonFileStore;
use crate::ml::{
    counter::{count_features, FeatureCounts},
    estimator::{Estimator, DEFAULT_LAMBDA},
    model::{assemble, ConditionalTable, NaiveBayesModel},
    scorer::information_gain,
    selector::select_best,
};

// ─── Well-known store keys ────────────────────────────────────────────────────
// The staged artifacts of a run, matching the pipeline stages.
pub const KEY_LABEL_FREQS: &str = "label_freqs";
pub const KEY_CONDITIONAL_FREQS: &str = "conditional_freqs";
pub const KEY_FEATURE_SCORES: &str = "feature_scores";
pub const KEY_BEST_FEATURES: &str = "best_features";
pub const KEY_TRAIN_CONFIG: &str = "train_config";

/// Every staged (non-model) key, in staging order
const STAGED_KEYS: [&str; 5] = [
    KEY_LABEL_FREQS,
    KEY_CONDITIONAL_FREQS,
    KEY_FEATURE_SCORES,
    KEY_BEST_FEATURES,
    KEY_TRAIN_CONFIG,
];

// ─── Training Configuration ──────────────────────────────────────────────────
// All parameters for a training run. Serialisable so the run
// that produced a model is recorded next to it in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Path to the JSON-lines corpus file
    pub corpus_path: String,

    /// Directory backing the model store
    pub store_dir: String,

    /// Store key the trained classifier is persisted under
    pub classifier_name: String,

    /// Number of samples to train on
    pub samples: usize,

    /// How many top-scoring features to keep (0 = keep all)
    pub best_features: usize,

    /// Parallel partitions for the counting stage
    pub processes: usize,

    /// Additive-smoothing constant (0.5 = expected likelihood)
    pub lambda: f64,

    /// Re-train even if the classifier already exists,
    /// discarding all staged artifacts first
    pub purge: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            corpus_path:     "data/samples.jsonl".to_string(),
            store_dir:       "model_store".to_string(),
            classifier_name: "naivebayes".to_string(),
            samples:         200_000,
            best_features:   10_000,
            processes:       8,
            lambda:          DEFAULT_LAMBDA,
            purge:           false,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    /// Create a new TrainUseCase with the given configuration
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end.
    ///
    /// Returns Ok(()) both on a completed run and on the
    /// idempotent no-op exit (classifier already trained, no
    /// purge requested) — the latter is logged, not an error.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Open the model store ─────────────────────────────────────
        let store = JsonFileStore::new(&cfg.store_dir)?;

        // ── Step 2: Purge, then the idempotence guard ────────────────────────
        // Purge first: an explicit override discards the model
        // key and every staged artifact before re-training.
        if cfg.purge {
            tracing::info!("Purging store '{}' before re-training", cfg.store_dir);
            store.remove(&cfg.classifier_name)?;
            for key in STAGED_KEYS {
                store.remove(key)?;
            }
        }

        // Guard: never overwrite a persisted model silently.
        // A successful no-op, not an error.
        if store.exists(&cfg.classifier_name) {
            tracing::info!(
                "Classifier '{}' already exists in the store — \
                 pass --purge to re-train",
                cfg.classifier_name
            );
            return Ok(());
        }

        // Record the run's parameters next to its artifacts
        store.set(KEY_TRAIN_CONFIG, &serde_json::to_value(cfg)?)?;

        // ── Step 3: Obtain counts (fresh, or resumed from staging) ───────────
        let counts = self.obtain_counts(&store)?;

        // ── Step 4: Score every observed feature ─────────────────────────────
        tracing::info!("Scoring {} candidate features", counts.features().len());
        let scores = information_gain(&counts);
        store.set(KEY_FEATURE_SCORES, &serde_json::to_value(&scores)?)?;

        // ── Step 5: Keep the K most informative features ─────────────────────
        let best = select_best(&scores, cfg.best_features);
        tracing::info!("Selected {} features", best.len());
        store.set(KEY_BEST_FEATURES, &serde_json::to_value(&best)?)?;

        // ── Step 6: Estimate smoothed distributions ──────────────────────────
        // One prior over labels, one binary present/absent
        // distribution per (label, selected feature) pair.
        // Unselected features are never estimated.
        let estimator = Estimator::new(cfg.lambda)?;
        let prior = estimator.prior(&counts.label_totals)?;

        let mut conditionals = ConditionalTable::new();
        for label in counts.labels() {
            let label_total = counts.label_count(label);
            let mut per_label = BTreeMap::new();

            for feature in &best {
                let trues = counts.feature_count(label, feature);
                per_label.insert(feature.clone(), estimator.binary(trues, label_total)?);
            }
            conditionals.insert(label.to_string(), per_label);
        }

        // ── Step 7: Assemble the final model ─────────────────────────────────
        let model: NaiveBayesModel = assemble(prior, conditionals)?;

        // ── Step 8: Persist under the classifier-name key ────────────────────
        // The only write with correctness semantics, and the
        // last thing the pipeline does.
        store.set(&cfg.classifier_name, &serde_json::to_value(&model)?)?;
        tracing::info!(
            "Persisted classifier '{}' ({} labels, {} features)",
            cfg.classifier_name,
            model.label_probs.len(),
            best.len(),
        );

        Ok(())
    }

    /// Produce the aggregated counts, either by resuming from
    /// staged tables or by reading the corpus and counting in
    /// parallel (then staging the result).
    fn obtain_counts(&self, store: &JsonFileStore) -> Result<FeatureCounts> {
        let cfg = &self.config;

        // Resume path: both count tables staged by an earlier
        // (interrupted) run. Scoring onward is always recomputed.
        if store.exists(KEY_LABEL_FREQS) && store.exists(KEY_CONDITIONAL_FREQS) {
            tracing::info!("Resuming from staged count tables");

            let label_totals: FreqDist = serde_json::from_value(store.get(KEY_LABEL_FREQS)?)
                .context("staged label frequencies are corrupt")?;
            let feature_counts: ConditionalFreqDist =
                serde_json::from_value(store.get(KEY_CONDITIONAL_FREQS)?)
                    .context("staged conditional frequencies are corrupt")?;

            // Staged tables are untrusted input: enforce the
            // count ≤ label-total invariant before the scorer
            // relies on it.
            let counts = FeatureCounts { label_totals, feature_counts };
            counts.validate()?;
            return Ok(counts);
        }

        // Fresh path: read, count in parallel, stage.
        tracing::info!(
            "Training on {} samples from '{}' with {} worker(s)",
            cfg.samples,
            cfg.corpus_path,
            cfg.processes,
        );
        let corpus = JsonlCorpus::new(&cfg.corpus_path);
        let samples = corpus.samples(cfg.samples)?;

        let counts = count_features(&samples, cfg.processes)?;

        store.set(KEY_LABEL_FREQS, &serde_json::to_value(&counts.label_totals)?)?;
        store.set(
            KEY_CONDITIONAL_FREQS,
            &serde_json::to_value(&counts.feature_counts)?,
        )?;

        Ok(counts)
    }
}
