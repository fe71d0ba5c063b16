use crate::core::analysis::selection::{Selection, select};
use crate::core::io::score_file::ScoreFile;
use crate::core::io::traits::TextFormat;
use crate::engine::config::ExtractConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, instrument};

pub const LOG_FILE_NAME: &str = "log.txt";

/// Copies the structures chosen by the configured rule into a new
/// directory and records the rule's outcome in `log.txt` there.
///
/// The output directory must not exist yet.
#[instrument(skip_all, name = "extract_workflow")]
pub fn run(config: ExtractConfig, reporter: &ProgressReporter) -> Result<Selection, EngineError> {
    if config.output_dir.exists() {
        return Err(EngineError::OutputExists {
            path: config.output_dir,
        });
    }

    let records = ScoreFile::default()
        .read_from_path(&config.score_file)
        .map_err(|source| EngineError::ScoreFile {
            path: config.score_file.clone(),
            source,
        })?;
    let selection = select(&records, config.rule)?;
    info!(
        "Rule '{}' picked {} of {} model(s).",
        selection.rule,
        selection.len(),
        records.len()
    );

    fs::create_dir(&config.output_dir).map_err(EngineError::io(&config.output_dir))?;

    reporter.report(Progress::ItemsStart {
        total: selection.len() as u64,
    });
    for record in &selection.records {
        let source = Path::new(&record.id);
        let file_name = source.file_name().ok_or_else(|| EngineError::Io {
            path: source.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "identifier is not a file path"),
        })?;
        let target = config.output_dir.join(file_name);
        fs::copy(source, &target).map_err(EngineError::io(source))?;
        debug!("Copied {:?} -> {:?}", source, target);
        reporter.report(Progress::ItemDone {
            label: record.id.clone(),
        });
    }
    reporter.report(Progress::ItemsFinish);

    let log_path = config.output_dir.join(LOG_FILE_NAME);
    fs::write(&log_path, format!("{}\n", selection.summary()))
        .map_err(|e| EngineError::output_write(&log_path)(e.to_string()))?;

    Ok(selection)
}
