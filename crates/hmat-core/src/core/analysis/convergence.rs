use super::series::ScoreSeries;
use thiserror::Error;

/// Minimum number of samples required per window position.
pub const SAMPLES_PER_WINDOW: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error(
        "Insufficient data: {actual} scored model(s), at least {required} needed for a window of {window}. \
         Increase the number of models or decrease the window size."
    )]
    InsufficientData {
        actual: usize,
        required: usize,
        window: usize,
    },

    #[error("Invalid window size {window} for a series of length {len}")]
    InvalidWindow { window: usize, len: usize },
}

/// Rejects series shorter than `SAMPLES_PER_WINDOW` windows.
pub fn validate_sample_size(series: &ScoreSeries, window_size: usize) -> Result<(), AnalysisError> {
    let required = window_size.saturating_mul(SAMPLES_PER_WINDOW);
    if series.len() < required {
        return Err(AnalysisError::InsufficientData {
            actual: series.len(),
            required,
            window: window_size,
        });
    }
    Ok(())
}

pub fn sort_descending(series: &ScoreSeries) -> ScoreSeries {
    let mut values = series.as_slice().to_vec();
    values.sort_by(|a, b| b.total_cmp(a));
    ScoreSeries::new(values)
}

/// Root-mean-square over every full window of `window_size` consecutive
/// values. No padding: the result has `len - window_size + 1` elements.
pub fn windowed_rms(series: &ScoreSeries, window_size: usize) -> Result<ScoreSeries, AnalysisError> {
    if window_size == 0 || window_size > series.len() {
        return Err(AnalysisError::InvalidWindow {
            window: window_size,
            len: series.len(),
        });
    }

    let n = window_size as f64;
    Ok(series
        .as_slice()
        .windows(window_size)
        .map(|w| (w.iter().map(|x| x * x).sum::<f64>() / n).sqrt())
        .collect())
}

/// The three derived series of a convergence run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceAnalysis {
    pub raw: ScoreSeries,
    pub sorted: ScoreSeries,
    pub rms: ScoreSeries,
    pub window_size: usize,
}

impl ConvergenceAnalysis {
    /// Validates, sorts, and windows `raw` in one go.
    pub fn compute(raw: ScoreSeries, window_size: usize) -> Result<Self, AnalysisError> {
        validate_sample_size(&raw, window_size)?;
        let sorted = sort_descending(&raw);
        let rms = windowed_rms(&sorted, window_size)?;
        Ok(Self {
            raw,
            sorted,
            rms,
            window_size,
        })
    }
}
