use crate::core::analysis::series::ScoreSeries;
use crate::core::io::traits::TextFormat;
use std::io::{self, BufRead, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// One line of a score file: a structure identifier and its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub id: String,
    pub score: f64,
}

impl ScoreRecord {
    pub fn new(id: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            score,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScoreFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: FieldError },
}

/// Why a single field could not be turned into a score.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("line has {fields} field(s) but column {column} was requested")]
    Missing { fields: usize, column: usize },
    #[error("value '{value}' in column {column} is not a number")]
    NotNumeric { column: usize, value: String },
    #[error("value '{value}' in column {column} is non-finite")]
    NonFinite { column: usize, value: String },
}

/// Splits `line` on whitespace and parses the field at `column`.
pub fn parse_score_field(line: &str, column: usize) -> Result<f64, FieldError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let raw = fields.get(column).ok_or(FieldError::Missing {
        fields: fields.len(),
        column,
    })?;
    let value = raw.parse::<f64>().map_err(|_| FieldError::NotNumeric {
        column,
        value: (*raw).to_string(),
    })?;
    if !value.is_finite() {
        return Err(FieldError::NonFinite {
            column,
            value: (*raw).to_string(),
        });
    }
    Ok(value)
}

pub(crate) fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whitespace-delimited score table: the identifier is the first field and
/// the score is read from `score_column` (zero-based).
///
/// Lines too short to hold the score column are skipped with a warning;
/// a score that is present but not numeric aborts the read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreFile {
    pub score_column: usize,
}

impl ScoreFile {
    pub const DEFAULT_SCORE_COLUMN: usize = 1;

    pub fn new(score_column: usize) -> Self {
        Self { score_column }
    }
}

impl Default for ScoreFile {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SCORE_COLUMN)
    }
}

impl TextFormat for ScoreFile {
    type Data = Vec<ScoreRecord>;
    type Error = ScoreFileError;

    fn read_from(&self, reader: &mut impl BufRead) -> Result<Self::Data, Self::Error> {
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if line.trim().is_empty() {
                continue;
            }

            match parse_score_field(&line, self.score_column) {
                Ok(score) => {
                    let id = line.split_whitespace().next().unwrap_or_default();
                    records.push(ScoreRecord::new(id, score));
                }
                Err(kind @ FieldError::Missing { .. }) => {
                    warn!("Skipping line {}: {}", line_num, kind);
                    skipped += 1;
                }
                Err(kind) => {
                    return Err(ScoreFileError::Parse {
                        line: line_num,
                        kind,
                    });
                }
            }
        }

        debug!(
            "Read {} score record(s), skipped {} short line(s).",
            records.len(),
            skipped
        );
        Ok(records)
    }

    fn write_to(&self, data: &Self::Data, writer: &mut impl Write) -> Result<(), Self::Error> {
        for record in data {
            writeln!(writer, "{} {}", record.id, record.score)?;
        }
        Ok(())
    }
}

/// Reads the score column of `path` as a series, in file order.
pub fn extract_column<P: AsRef<Path>>(
    path: P,
    column: usize,
) -> Result<ScoreSeries, ScoreFileError> {
    let records = ScoreFile::new(column).read_from_path(path)?;
    Ok(records.into_iter().map(|r| r.score).collect())
}
