// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`    — trains the classifier from a corpus
//   2. `features` — prints the most informative features
//                   from the last run's staged artifacts
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, FeaturesArgs, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "sentiment-trainer",
    version = "0.1.0",
    about = "Train a Naive Bayes text classifier and store the model."
)]
pub struct Cli {
    /// The subcommand to run (train or features)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    ///
    /// Destructure first: the match moves the args out of the
    /// enum, so nothing may touch `self` afterwards. The
    /// handlers are associated functions for the same reason.
    pub fn run(self) -> Result<()> {
        let Cli { command } = self;
        match command {
            Commands::Train(args)    => Self::run_train(args),
            Commands::Features(args) => Self::run_features(args),
        }
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainConfig and hands off to Layer 2.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training from corpus: {}", args.corpus);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training run complete.");
        Ok(())
    }

    /// Handles the `features` subcommand.
    /// Prints the top-scored features of the last training run.
    fn run_features(args: FeaturesArgs) -> Result<()> {
        use crate::application::report_use_case::FeaturesReportUseCase;

        let use_case = FeaturesReportUseCase::new(args.store_dir);
        let top = use_case.top_features(args.count)?;

        println!("Top {} features by information gain:", top.len());
        for (rank, (feature, score)) in top.iter().enumerate() {
            println!("{:>4}. {:<24} {:.6}", rank + 1, feature, score);
        }
        Ok(())
    }
}
