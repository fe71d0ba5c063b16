use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpanError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("span file has no residue count on its second line")]
    MissingCount,
    #[error("residue count '{0}' is not a positive integer")]
    InvalidCount(String),
}

/// Reads the residue count from a ProQ membrane `.span` file: the second
/// whitespace field of the second line.
pub fn residue_count(reader: &mut impl BufRead) -> Result<usize, SpanError> {
    let line = reader.lines().nth(1).transpose()?.ok_or(SpanError::MissingCount)?;
    let raw = line.split_whitespace().nth(1).ok_or(SpanError::MissingCount)?;
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(SpanError::InvalidCount(raw.to_string())),
    }
}
