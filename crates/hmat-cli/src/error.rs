use hmat::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// Process exit status for a run with too few scores for the window.
pub const EXIT_INSUFFICIENT_DATA: i32 = 2;
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, CliError::Engine(e) if e.is_insufficient_data())
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_insufficient_data() {
            EXIT_INSUFFICIENT_DATA
        } else {
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmat::core::analysis::convergence::AnalysisError;

    #[test]
    fn insufficient_data_maps_to_its_own_exit_code() {
        let err = CliError::from(EngineError::from(AnalysisError::InsufficientData {
            actual: 4,
            required: 1000,
            window: 200,
        }));
        assert!(err.is_insufficient_data());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn insufficient_data_message_tells_how_to_recover() {
        let message = CliError::from(EngineError::from(AnalysisError::InsufficientData {
            actual: 4,
            required: 1000,
            window: 200,
        }))
        .to_string();
        assert!(message.contains("4 scored model(s)"));
        assert!(message.contains("at least 1000"));
        assert!(message.contains("Increase the number of models or decrease the window size"));
    }

    #[test]
    fn other_errors_exit_with_failure() {
        assert_eq!(CliError::Config("missing".into()).exit_code(), 1);
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(CliError::from(io).exit_code(), 1);
    }
}
