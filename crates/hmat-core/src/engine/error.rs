use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;
use super::external::ExternalToolError;
use crate::core::analysis::convergence::AnalysisError;
use crate::core::analysis::selection::SelectionError;
use crate::core::io::score_file::ScoreFileError;
use crate::core::io::span::SpanError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read score file '{path}': {source}", path = path.display())]
    ScoreFile {
        path: PathBuf,
        #[source]
        source: ScoreFileError,
    },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Failed to write '{path}': {reason}", path = path.display())]
    OutputWrite { path: PathBuf, reason: String },

    #[error("Output '{path}' already exists; enable overwrite to replace it", path = path.display())]
    OutputExists { path: PathBuf },

    #[error("No '{rootname}*.pdb' files found in '{dir}'", dir = dir.display())]
    NoStructuresFound { dir: PathBuf, rootname: String },

    #[error("Invalid score '{value}' on line {line} of '{path}'", path = path.display())]
    ScoreValue {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("No '{key}' entry found in alignment '{path}'", path = path.display())]
    MissingAlignmentEntry { key: &'static str, path: PathBuf },

    #[error("Invalid span file '{path}': {source}", path = path.display())]
    SpanFile {
        path: PathBuf,
        #[source]
        source: SpanError,
    },

    #[error(transparent)]
    ExternalTool(#[from] ExternalToolError),

    #[error("I/O error on '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| EngineError::Io { path, source }
    }

    pub(crate) fn output_write(path: impl Into<PathBuf>) -> impl FnOnce(String) -> Self {
        let path = path.into();
        move |reason| EngineError::OutputWrite { path, reason }
    }

    /// True when the run was refused because there are too few scores for
    /// the requested window.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            EngineError::Analysis(AnalysisError::InsufficientData { .. })
        )
    }
}
