//! Output formatting for CLI commands.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::args::{GraymailArgs, OutputFormat};
use crate::error::Result;
use crate::pipeline::ExperimentReport;

/// Maximum width of a distribution bar, in characters.
const BAR_WIDTH: usize = 30;

/// Envelope around a report with the time it was produced.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub generated_at: DateTime<Utc>,
    pub report: &'a ExperimentReport,
}

/// Output a finished experiment in the requested format.
pub fn output_report(report: &ExperimentReport, args: &GraymailArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print!("{}", render_human(report, Utc::now(), args.verbosity()));
            Ok(())
        }
        OutputFormat::Json => output_json(report, args),
    }
}

fn output_json(report: &ExperimentReport, args: &GraymailArgs) -> Result<()> {
    let summary = RunSummary {
        generated_at: Utc::now(),
        report,
    };
    let json = if args.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{json}");
    Ok(())
}

/// Render the human-readable report.
pub fn render_human(report: &ExperimentReport, now: DateTime<Utc>, verbosity: u8) -> String {
    let mut out = String::new();

    if verbosity > 0 {
        out.push_str(&format!(
            "graymail report ({})\n\n",
            now.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    let d = &report.distribution;
    out.push_str("Dataset\n");
    out.push_str(&format!(
        "  rows: {} ({} ham, {} spam, {} unlabeled)\n",
        d.total(),
        d.ham,
        d.spam,
        d.unlabeled
    ));
    out.push_str(&format!(
        "  split: {} train / {} test (test_size {:.2}, seed {})\n",
        report.n_train, report.n_test, report.config.test_size, report.config.seed
    ));
    out.push_str(&format!("  vocabulary: {} terms\n\n", report.vocabulary_size));

    out.push_str("Label distribution\n");
    let max_count = d.ham.max(d.spam).max(d.unlabeled);
    out.push_str(&format!("  ham       |{}| {}\n", bar(d.ham, max_count), d.ham));
    out.push_str(&format!("  spam      |{}| {}\n", bar(d.spam, max_count), d.spam));
    if d.unlabeled > 0 {
        out.push_str(&format!(
            "  unlabeled |{}| {}\n",
            bar(d.unlabeled, max_count),
            d.unlabeled
        ));
    }
    out.push('\n');

    out.push_str("Grid search\n");
    out.push_str(&format!("  candidates evaluated: {}\n", report.n_candidates));
    out.push_str(&format!("  best: {}\n", report.best_params));
    out.push_str(&format!(
        "  mean cv accuracy ({} folds): {:.4}\n\n",
        report.config.cv_folds, report.best_cv_score
    ));

    out.push_str("Model comparison (held-out split)\n");
    out.push_str(&format!(
        "  {:<16} {:>9} {:>10} {:>8} {:>8}\n",
        "model", "accuracy", "precision", "recall", "f1"
    ));
    for evaluation in [&report.baseline, &report.tuned] {
        let m = &evaluation.metrics;
        out.push_str(&format!(
            "  {:<16} {:>9.4} {:>10.4} {:>8.4} {:>8.4}\n",
            evaluation.model, m.accuracy, m.precision, m.recall, m.f1
        ));
    }
    out.push('\n');

    out.push_str(&format!("Verdict: {}\n", report.verdict));
    out
}

/// A fixed-width ASCII bar scaled against the largest count.
fn bar(count: usize, max_count: usize) -> String {
    let filled = if max_count == 0 {
        0
    } else {
        (count * BAR_WIDTH).div_ceil(max_count).min(BAR_WIDTH)
    };
    let mut bar = String::with_capacity(BAR_WIDTH);
    for i in 0..BAR_WIDTH {
        bar.push(if i < filled { '#' } else { ' ' });
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ForestParams;
    use crate::dataset::LabelDistribution;
    use crate::metrics::MetricsReport;
    use crate::model_selection::ForestParamGrid;
    use crate::pipeline::{ExperimentConfig, ModelEvaluation, Verdict};
    use chrono::TimeZone;

    fn sample_report() -> ExperimentReport {
        let baseline_metrics =
            MetricsReport::from_predictions(&[1, 0, 1, 0], &[1, 0, 0, 0]);
        let tuned_metrics = MetricsReport::from_predictions(&[1, 0, 0, 0], &[1, 0, 0, 0]);

        ExperimentReport {
            config: ExperimentConfig {
                grid: ForestParamGrid::single(ForestParams::default()),
                ..ExperimentConfig::default()
            },
            distribution: LabelDistribution {
                ham: 12,
                spam: 8,
                unlabeled: 0,
            },
            n_train: 16,
            n_test: 4,
            vocabulary_size: 42,
            baseline: ModelEvaluation {
                model: "multinomial_nb".to_string(),
                metrics: baseline_metrics,
            },
            tuned: ModelEvaluation {
                model: "random_forest".to_string(),
                metrics: tuned_metrics,
            },
            best_params: ForestParams::default(),
            best_cv_score: 0.9375,
            n_candidates: 1,
            verdict: Verdict::TunedImproved,
        }
    }

    #[test]
    fn test_render_human_sections() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let text = render_human(&sample_report(), now, 1);

        assert!(text.contains("graymail report (2026-01-02 03:04:05 UTC)"));
        assert!(text.contains("rows: 20 (12 ham, 8 spam, 0 unlabeled)"));
        assert!(text.contains("split: 16 train / 4 test"));
        assert!(text.contains("multinomial_nb"));
        assert!(text.contains("random_forest"));
        assert!(text.contains("Verdict: the tuned random forest outperformed the baseline"));
    }

    #[test]
    fn test_render_quiet_skips_header() {
        let now = Utc::now();
        let text = render_human(&sample_report(), now, 0);
        assert!(!text.contains("graymail report"));
        assert!(text.contains("Verdict:"));
    }

    #[test]
    fn test_render_hides_empty_unlabeled_bar() {
        let now = Utc::now();
        let text = render_human(&sample_report(), now, 1);
        assert!(!text.contains("unlabeled |"));
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0, 10).chars().filter(|&c| c == '#').count(), 0);
        assert_eq!(bar(10, 10).chars().filter(|&c| c == '#').count(), BAR_WIDTH);
        assert_eq!(bar(5, 10).chars().filter(|&c| c == '#').count(), BAR_WIDTH / 2);
        // Zero max produces an empty bar, not a division panic.
        assert_eq!(bar(0, 0).chars().filter(|&c| c == '#').count(), 0);
    }

    #[test]
    fn test_json_summary_round_trips() {
        let report = sample_report();
        let summary = RunSummary {
            generated_at: Utc::now(),
            report: &report,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"best_cv_score\":0.9375"));
        assert!(json.contains("\"verdict\":\"tuned_improved\""));
    }
}
