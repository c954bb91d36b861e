//! Results reporting: console summary, JSON documents and charts

pub mod charts;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::analysis::RunReport;
use crate::runner::{EvaluationRun, OutcomeRecord};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Chart error: {0}")]
    Chart(#[from] image::ImageError),
}

/// Chart locations recorded alongside the statistics
#[derive(Debug, Clone, Serialize)]
pub struct VisualizationPaths {
    pub accuracy_plot: PathBuf,
    pub error_plot: PathBuf,
}

/// Everything written for one run
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    pub detailed_results: PathBuf,
    pub stats: PathBuf,
    pub visualizations: VisualizationPaths,
}

/// The stats document: the report plus where its charts went
#[derive(Serialize)]
struct StatsDocument<'a> {
    #[serde(flatten)]
    report: &'a RunReport,
    visualization_paths: &'a VisualizationPaths,
}

/// Timestamp fragment used in output file names
pub fn run_stamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y%m%d_%H%M%S").to_string()
}

/// Write charts and both JSON documents under `results_dir`
pub fn write_run(results_dir: &Path, run: &EvaluationRun) -> Result<RunArtifacts, ReportError> {
    let figures_dir = results_dir.join("figures");
    std::fs::create_dir_all(&figures_dir)?;

    let visualizations = VisualizationPaths {
        accuracy_plot: figures_dir.join("accuracy_comparison.png"),
        error_plot: figures_dir.join("error_comparison.png"),
    };
    charts::render_accuracy_chart(&run.report, &visualizations.accuracy_plot)?;
    charts::render_error_chart(&run.report, &visualizations.error_plot)?;

    let stamp = run_stamp(run.report.timestamp);
    let detailed_results = results_dir.join(format!("detailed_results_{}.json", stamp));
    let stats = results_dir.join(format!("stats_{}.json", stamp));

    write_json(&detailed_results, &run.outcomes)?;
    write_json(
        &stats,
        &StatsDocument {
            report: &run.report,
            visualization_paths: &visualizations,
        },
    )?;

    tracing::info!("Results written to {}", results_dir.display());

    Ok(RunArtifacts {
        detailed_results,
        stats,
        visualizations,
    })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read back a detailed results document
pub fn read_outcomes(path: &Path) -> Result<Vec<OutcomeRecord>, ReportError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Print the per-model summary
pub fn print_console_report(report: &RunReport) {
    println!("\nEvaluation Results:");
    println!("{:-<50}", "");
    println!(
        "Puzzles: {}, Attempts: {}",
        report.total_puzzles, report.total_attempts
    );

    for (model, stats) in &report.model_performance {
        println!("\nModel: {}", model);
        match stats.accuracy {
            Some(accuracy) => println!("Accuracy: {:.2}%", accuracy * 100.0),
            None => println!("Accuracy: n/a"),
        }
        println!("Correct: {}/{}", stats.correct_answers, stats.total_attempts);
        println!("Errors: {}", stats.errors);
    }
}

/// Print where the run's files were written
pub fn print_artifacts(artifacts: &RunArtifacts) {
    println!("\nVisualizations saved to:");
    println!("accuracy_plot: {}", artifacts.visualizations.accuracy_plot.display());
    println!("error_plot: {}", artifacts.visualizations.error_plot.display());
    println!("\nResults saved to:");
    println!("detailed_results: {}", artifacts.detailed_results.display());
    println!("stats: {}", artifacts.stats.display());
}
