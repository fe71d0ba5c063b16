use crate::core::io::score_file::ScoreRecord;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error("Percentage must be in (0, 100], got {0}")]
    InvalidPercent(f64),
    #[error("Threshold must be a finite number, got {0}")]
    InvalidThreshold(f64),
}

/// How models are picked from a score table. Lower scores are better.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionRule {
    /// Every model scoring strictly below the threshold, in file order.
    Threshold(f64),
    /// The lowest-scoring `ceil(n * p / 100)` models, best first.
    Percent(f64),
}

impl SelectionRule {
    pub fn validate(self) -> Result<Self, SelectionError> {
        match self {
            Self::Percent(p) if !(p > 0.0 && p <= 100.0) => Err(SelectionError::InvalidPercent(p)),
            Self::Threshold(t) if !t.is_finite() => Err(SelectionError::InvalidThreshold(t)),
            rule => Ok(rule),
        }
    }
}

impl fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Threshold(t) => write!(f, "score < {t}"),
            Self::Percent(p) => write!(f, "lowest {p}%"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub rule: SelectionRule,
    pub records: Vec<ScoreRecord>,
    /// Highest score among the picked models (percent rule only).
    pub cutoff: Option<f64>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Single-line summary written to the selection's `log.txt`.
    pub fn summary(&self) -> String {
        match self.rule {
            SelectionRule::Threshold(t) => {
                format!("PDB structures below {} MOLPDF score: {} mdls", t, self.len())
            }
            SelectionRule::Percent(p) => {
                let mut line = format!(
                    "{} percent of PDB structure with lowest MOLPDF score: {} mdls",
                    p,
                    self.len()
                );
                if let Some(cutoff) = self.cutoff {
                    line.push_str(&format!(", highest score is {:.4}", cutoff));
                }
                line
            }
        }
    }
}

pub fn select(records: &[ScoreRecord], rule: SelectionRule) -> Result<Selection, SelectionError> {
    let rule = rule.validate()?;
    let selection = match rule {
        SelectionRule::Threshold(t) => Selection {
            rule,
            records: records.iter().filter(|r| r.score < t).cloned().collect(),
            cutoff: None,
        },
        SelectionRule::Percent(p) => {
            let mut sorted = records.to_vec();
            sorted.sort_by(|a, b| a.score.total_cmp(&b.score));
            let keep = (sorted.len() as f64 * p / 100.0).ceil() as usize;
            sorted.truncate(keep.min(sorted.len()));
            Selection {
                rule,
                cutoff: sorted.last().map(|r| r.score),
                records: sorted,
            }
        }
    };
    Ok(selection)
}
