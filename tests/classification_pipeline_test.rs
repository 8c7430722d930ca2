//! End-to-end tests of the classification pipeline over a CSV dataset.

use std::io::Write;

use tempfile::NamedTempFile;

use graymail::analysis::EnglishAnalyzer;
use graymail::classifier::ForestParams;
use graymail::dataset::{CsvDatasetLoader, Label, label_distribution};
use graymail::model_selection::ForestParamGrid;
use graymail::pipeline::{ExperimentConfig, run_experiment};

const SPAM_TEXTS: &[&str] = &[
    "WIN a FREE prize now claim your cash reward",
    "Free money offer click the winning link today",
    "Claim your free cash prize before midnight",
    "Urgent winner free reward money waiting for collection",
    "You won a cash prize free claim link inside",
    "Exclusive free offer win money instantly guaranteed",
    "Final notice claim the prize cash reward now",
    "Congratulations winner free cash offer expires soon",
    "Free prize draw win big money click now",
    "Act fast free reward cash winner announcement",
];

const HAM_TEXTS: &[&str] = &[
    "Meeting agenda for Monday morning attached here",
    "Project deadline moved see the updated report",
    "Lunch tomorrow at noon with the whole team",
    "Notes from the project review meeting attached",
    "Reminder about the Monday deadline report draft",
    "Quarterly budget review scheduled for next week",
    "Travel itinerary confirmed for the conference trip",
    "Updated slides for the client presentation attached",
    "Minutes from the weekly status meeting enclosed",
    "Office maintenance scheduled for Saturday morning",
];

fn write_dataset() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id,text,label").unwrap();
    let mut id = 0;
    for text in SPAM_TEXTS {
        id += 1;
        writeln!(file, "{id},{text},1").unwrap();
    }
    for text in HAM_TEXTS {
        id += 1;
        writeln!(file, "{id},{text},0").unwrap();
    }
    file.flush().unwrap();
    file
}

fn quick_config() -> ExperimentConfig {
    ExperimentConfig {
        cv_folds: 4,
        grid: ForestParamGrid::single(ForestParams {
            n_estimators: 15,
            ..ForestParams::default()
        }),
        ..ExperimentConfig::default()
    }
}

#[test]
fn test_load_and_run_experiment() {
    let file = write_dataset();
    let records = CsvDatasetLoader::new().load(file.path()).unwrap();
    assert_eq!(records.len(), 20);

    let distribution = label_distribution(&records);
    assert_eq!(distribution.spam, 10);
    assert_eq!(distribution.ham, 10);

    let analyzer = EnglishAnalyzer::new().unwrap();
    let report = run_experiment(records, &analyzer, &quick_config()).unwrap();

    // 20 rows at test_size 0.2 split 16/4.
    assert_eq!(report.n_train, 16);
    assert_eq!(report.n_test, 4);
    assert_eq!(report.n_candidates, 1);
    assert!(report.vocabulary_size > 0);

    // The corpus is cleanly separable, both models should do well.
    assert!(report.baseline.metrics.accuracy >= 0.5);
    assert!(report.tuned.metrics.accuracy >= 0.5);
}

#[test]
fn test_experiment_repeats_are_identical() {
    let file = write_dataset();
    let loader = CsvDatasetLoader::new();
    let analyzer = EnglishAnalyzer::new().unwrap();
    let config = quick_config();

    let a = run_experiment(loader.load(file.path()).unwrap(), &analyzer, &config).unwrap();
    let b = run_experiment(loader.load(file.path()).unwrap(), &analyzer, &config).unwrap();

    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_change_the_split() {
    let file = write_dataset();
    let loader = CsvDatasetLoader::new();
    let analyzer = EnglishAnalyzer::new().unwrap();

    let a = run_experiment(
        loader.load(file.path()).unwrap(),
        &analyzer,
        &quick_config(),
    )
    .unwrap();
    let b = run_experiment(
        loader.load(file.path()).unwrap(),
        &analyzer,
        &ExperimentConfig {
            seed: 1234,
            ..quick_config()
        },
    )
    .unwrap();

    // Same sizes, but the held-out rows differ.
    assert_eq!(a.n_test, b.n_test);
    assert_ne!(a.config.seed, b.config.seed);
}

#[test]
fn test_unlabeled_rows_survive_loading_but_not_training() {
    let file = write_dataset();
    let mut records = CsvDatasetLoader::new().load(file.path()).unwrap();
    records.push(graymail::dataset::Record {
        id: "extra".to_string(),
        text: "no label here".to_string(),
        label: None,
    });

    let analyzer = EnglishAnalyzer::new().unwrap();
    let report = run_experiment(records, &analyzer, &quick_config()).unwrap();

    assert_eq!(report.distribution.unlabeled, 1);
    assert_eq!(report.n_train + report.n_test, 20);
}

#[test]
fn test_report_serializes_to_json() {
    let file = write_dataset();
    let records = CsvDatasetLoader::new().load(file.path()).unwrap();
    let analyzer = EnglishAnalyzer::new().unwrap();
    let report = run_experiment(records, &analyzer, &quick_config()).unwrap();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"baseline\""));
    assert!(json.contains("\"tuned\""));
    assert!(json.contains("\"best_params\""));

    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["n_test"], 4);
}

#[test]
fn test_cli_quick_run_over_csv() {
    use clap::Parser;
    use graymail::cli::{args::GraymailArgs, commands::execute_command};

    let file = write_dataset();
    let args = GraymailArgs::parse_from([
        "graymail",
        file.path().to_str().unwrap(),
        "--quick",
        "--cv-folds",
        "4",
        "--format",
        "json",
        "-q",
    ]);

    execute_command(args).unwrap();
}

#[test]
fn test_cli_missing_dataset_fails() {
    use clap::Parser;
    use graymail::cli::{args::GraymailArgs, commands::execute_command};

    let args = GraymailArgs::parse_from(["graymail", "/nonexistent/emails.csv"]);
    assert!(execute_command(args).is_err());
}

#[test]
fn test_label_word_dataset() {
    // Labels given as words instead of 0/1.
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "text,label").unwrap();
    for text in SPAM_TEXTS {
        writeln!(file, "{text},spam").unwrap();
    }
    for text in HAM_TEXTS {
        writeln!(file, "{text},ham").unwrap();
    }
    file.flush().unwrap();

    let records = CsvDatasetLoader::new().load(file.path()).unwrap();
    assert_eq!(records.len(), 20);
    assert_eq!(records[0].label, Some(Label::Spam));
    assert_eq!(records[10].label, Some(Label::Ham));
}
