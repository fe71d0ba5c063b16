use crate::core::io::pdb::{find_score_lines, list_models};
use crate::core::io::score_file::{ScoreFile, ScoreRecord, parse_finite};
use crate::core::io::traits::TextFormat;
use crate::engine::config::HarvestConfig;
use crate::engine::error::EngineError;
use crate::engine::output::OutputGuard;
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs::File;
use std::io::BufReader;
use tracing::{debug, info, instrument, warn};

/// Collects the score remark of every `<rootname>*.pdb` model in the
/// configured directory and writes them as an `<id> <score>` table sorted
/// by file path.
#[instrument(skip_all, name = "harvest_workflow")]
pub fn run(
    config: HarvestConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<ScoreRecord>, EngineError> {
    OutputGuard::new(config.overwrite).check(&config.output)?;

    let models = list_models(&config.pdb_dir, &config.rootname)
        .map_err(EngineError::io(&config.pdb_dir))?;
    if models.is_empty() {
        return Err(EngineError::NoStructuresFound {
            dir: config.pdb_dir,
            rootname: config.rootname,
        });
    }
    info!("Found {} model file(s) in {:?}.", models.len(), config.pdb_dir);

    reporter.report(Progress::ItemsStart {
        total: models.len() as u64,
    });

    let mut records = Vec::with_capacity(models.len());
    for model in &models {
        let file = File::open(model).map_err(EngineError::io(model))?;
        let found = find_score_lines(&mut BufReader::new(file), &config.pattern, config.column)
            .map_err(EngineError::io(model))?;

        if found.is_empty() {
            warn!("No '{}' line in {:?}.", config.pattern, model);
        }
        for hit in found {
            let score = parse_finite(&hit.value).ok_or_else(|| EngineError::ScoreValue {
                path: model.clone(),
                line: hit.line,
                value: hit.value.clone(),
            })?;
            debug!("{:?}: {}", model, score);
            records.push(ScoreRecord::new(model.display().to_string(), score));
        }

        reporter.report(Progress::ItemDone {
            label: model.display().to_string(),
        });
    }
    reporter.report(Progress::ItemsFinish);

    records.sort_by(|a, b| a.id.cmp(&b.id));

    ScoreFile::default()
        .write_to_path(&records, &config.output)
        .map_err(|e| EngineError::output_write(&config.output)(e.to_string()))?;
    info!(
        "Wrote {} score(s) to {:?}.",
        records.len(),
        config.output
    );

    Ok(records)
}
