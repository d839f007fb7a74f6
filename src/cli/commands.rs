// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `features`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;
use crate::ml::estimator::DEFAULT_LAMBDA;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the Naive Bayes classifier from a labelled corpus
    Train(TrainArgs),

    /// Show the most informative features of the last run
    Features(FeaturesArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// JSON-lines corpus file, one {"label", "text"} per line
    #[arg(long, default_value = "data/samples.jsonl")]
    pub corpus: String,

    /// Directory backing the model store
    #[arg(long, default_value = "model_store")]
    pub store_dir: String,

    /// Store key to persist the trained classifier under
    #[arg(long, default_value = "naivebayes")]
    pub name: String,

    /// Number of samples to train on
    #[arg(long, default_value_t = 200_000)]
    pub samples: usize,

    /// How many top-scoring features to keep (0 keeps all)
    #[arg(long, default_value_t = 10_000)]
    pub best_features: usize,

    /// Parallel partitions for the feature-counting stage
    #[arg(long, default_value_t = 8)]
    pub processes: usize,

    /// Additive-smoothing constant — 0.5 is the expected
    /// likelihood estimate
    #[arg(long, default_value_t = DEFAULT_LAMBDA)]
    pub lambda: f64,

    /// Re-train even if the classifier already exists,
    /// discarding all staged artifacts first
    #[arg(long)]
    pub purge: bool,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            corpus_path:     a.corpus,
            store_dir:       a.store_dir,
            classifier_name: a.name,
            samples:         a.samples,
            best_features:   a.best_features,
            processes:       a.processes,
            lambda:          a.lambda,
            purge:           a.purge,
        }
    }
}

/// All arguments for the `features` command
#[derive(Args, Debug)]
pub struct FeaturesArgs {
    /// Directory backing the model store (same as used for train)
    #[arg(long, default_value = "model_store")]
    pub store_dir: String,

    /// How many top features to print
    #[arg(long, default_value_t = 25)]
    pub count: usize,
}
