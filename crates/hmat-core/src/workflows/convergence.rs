use crate::core::analysis::convergence::ConvergenceAnalysis;
use crate::core::io::score_file::extract_column;
use crate::core::io::series::SeriesFile;
use crate::core::io::traits::TextFormat;
use crate::core::report::plot::{FigureFormat, ReportStyle, render_report};
use crate::engine::config::ConvergenceConfig;
use crate::engine::error::EngineError;
use crate::engine::output::OutputGuard;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct ConvergenceResult {
    pub analysis: ConvergenceAnalysis,
    pub written: Vec<PathBuf>,
}

/// Reads the scores, checks there are enough of them for the window, and
/// writes the figure followed by the RMSD (and optionally sorted) series.
///
/// Nothing is written when the sample-size check fails or any output would
/// overwrite an existing file without permission.
#[instrument(skip_all, name = "convergence_workflow")]
pub fn run(
    config: ConvergenceConfig,
    reporter: &ProgressReporter,
) -> Result<ConvergenceResult, EngineError> {
    if FigureFormat::from_path(&config.figure_output).is_none() {
        return Err(EngineError::output_write(&config.figure_output)(
            "unsupported figure format; use a .svg path".to_string(),
        ));
    }

    let guard = OutputGuard::new(config.overwrite);
    let outputs: Vec<&Path> = [
        Some(config.figure_output.as_path()),
        Some(config.rms_output.as_path()),
        config.sorted_output.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();
    guard.check_all(outputs.iter().copied())?;

    let raw = reporter.stage("Reading scores", || {
        extract_column(&config.score_file, config.score_column).map_err(|source| {
            EngineError::ScoreFile {
                path: config.score_file.clone(),
                source,
            }
        })
    })?;
    info!(
        "Read {} score(s) from column {} of {:?}.",
        raw.len(),
        config.score_column,
        config.score_file
    );

    let analysis = reporter.stage("Computing windowed RMSD", || {
        ConvergenceAnalysis::compute(raw, config.window_size)
    })?;
    info!(
        "Computed {} window(s) of {} models.",
        analysis.rms.len(),
        analysis.window_size
    );

    let style = ReportStyle {
        score_label: config.score_label.clone(),
        ..ReportStyle::default()
    };
    reporter.stage("Rendering figure", || {
        render_report(&analysis, &style, &config.figure_output)
            .map_err(|e| EngineError::output_write(&config.figure_output)(e.to_string()))
    })?;

    let format = SeriesFile::default();
    let mut written = vec![config.figure_output.clone()];
    let mut targets = vec![(&analysis.rms, &config.rms_output)];
    if let Some(sorted_path) = &config.sorted_output {
        targets.push((&analysis.sorted, sorted_path));
    }
    for (series, path) in targets {
        format
            .write_to_path(series, path)
            .map_err(|e| EngineError::output_write(path)(e.to_string()))?;
        reporter.report(Progress::Notice(format!(
            "Wrote {} value(s) to {}",
            series.len(),
            path.display()
        )));
        written.push(path.clone());
    }

    Ok(ConvergenceResult { analysis, written })
}
