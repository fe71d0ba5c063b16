//! # hmat Core Library
//!
//! Post-processing of homology-modeling output: harvesting model scores from
//! PDB files, judging whether a modeling run has converged, selecting the
//! best-scored models, and driving the external ProQM scoring tools.
//!
//! ## Layout
//!
//! - **[`core`]: The Foundation.** Plain data types (`ScoreRecord`,
//!   `ScoreSeries`), pure numeric transforms (windowed RMS, selection rules),
//!   text-format helpers for score, series, PDB, PIR and span files, and the
//!   convergence figure renderer.
//!
//! - **[`engine`]: The Plumbing.** Validated configuration structures, the
//!   error taxonomy, progress reporting, and the `CommandRunner` seam used to
//!   invoke third-party binaries.
//!
//! - **[`workflows`]: The Public API.** One linear pipeline per tool
//!   (`convergence`, `harvest`, `extract`, `proqm`) tying `core` and `engine`
//!   together.

pub mod core;
pub mod engine;
pub mod workflows;
