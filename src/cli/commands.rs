//! Command execution logic for the graymail CLI.

use crate::analysis::EnglishAnalyzer;
use crate::classifier::ForestParams;
use crate::cli::args::GraymailArgs;
use crate::cli::output::output_report;
use crate::dataset::CsvDatasetLoader;
use crate::error::Result;
use crate::model_selection::ForestParamGrid;
use crate::pipeline::{ExperimentConfig, run_experiment};

/// Execute the experiment described by the parsed arguments.
pub fn execute_command(args: GraymailArgs) -> Result<()> {
    let mut loader = CsvDatasetLoader::new();
    if let Some(name) = &args.text_column {
        loader = loader.with_text_column(name.clone());
    }
    if let Some(name) = &args.label_column {
        loader = loader.with_label_column(name.clone());
    }

    let records = loader.load(&args.dataset)?;
    if args.verbosity() >= 2 {
        eprintln!(
            "loaded {} rows from {}",
            records.len(),
            args.dataset.display()
        );
    }

    let grid = if args.quick {
        // One default candidate keeps the pipeline shape without the
        // 81-point search.
        ForestParamGrid::single(ForestParams::default())
    } else {
        ForestParamGrid::default()
    };

    let config = ExperimentConfig {
        test_size: args.test_size,
        seed: args.seed,
        cv_folds: args.cv_folds,
        nb_alpha: args.nb_alpha,
        grid,
    };

    let analyzer = EnglishAnalyzer::new()?;
    let report = run_experiment(records, &analyzer, &config)?;

    output_report(&report, &args)
}
