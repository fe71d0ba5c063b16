use crate::core::io::pdb::{cleaned_path, list_models, strip_patched_termini};
use crate::core::io::pir::{MODEL_KEY, TEMPLATE_KEY, find_entry_name};
use crate::core::io::span::residue_count;
use crate::engine::config::{ProqmConfig, ProqmTools};
use crate::engine::error::EngineError;
use crate::engine::external::{CommandRunner, ToolInvocation};
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

pub const ROSETTA_SCORE_FILE: &str = "ProQM.sc";
const RUN_ALL_EXTERNAL: &str = "run_all_external.pl";
const COPY_FEATURES: &str = "copy_features_from_master.pl";

const SEQUENCE_IDENTITY_NOTICE: &str = "The full-length sequence and the sequence of the PDB file must be \
identical apart from missing regions. Engineered mutations in the structure must be applied to the \
full-length sequence before profiling.";

#[derive(Debug, Clone, PartialEq)]
pub struct ProqmResult {
    pub template: PathBuf,
    pub template_residues: usize,
    pub models: Vec<PathBuf>,
    pub model_residues: usize,
    pub score_file: PathBuf,
}

/// Computes ProQM scores for the alignment's template and for every model
/// in the working directory.
///
/// Profiles are built once for the template and once for the first model;
/// all models share the first model's profile. Every external command must
/// succeed for the run to continue.
#[instrument(skip_all, name = "proqm_workflow")]
pub fn run(
    config: ProqmConfig,
    runner: &impl CommandRunner,
    reporter: &ProgressReporter,
) -> Result<ProqmResult, EngineError> {
    let work_dir = config.work_dir.as_path();

    let template_name = alignment_entry(&config.alignment, TEMPLATE_KEY)?;
    let model_rootname = alignment_entry(&config.alignment, MODEL_KEY)?;
    info!(
        "Alignment template '{}', model rootname '{}'.",
        template_name, model_rootname
    );

    let template_file = format!("{template_name}.pdb");
    let template_src = config.template_dir.join(&template_file);
    let template = work_dir.join(&template_file);
    fs::copy(&template_src, &template).map_err(EngineError::io(&template_src))?;

    reporter.stage("Profiling template", || {
        build_profile(
            runner,
            &config.tools,
            work_dir,
            &template,
            config.fasta_template.as_deref(),
            reporter,
        )
    })?;

    let models = list_models(work_dir, &model_rootname).map_err(EngineError::io(work_dir))?;
    let Some(first_model) = models.first().cloned() else {
        return Err(EngineError::NoStructuresFound {
            dir: config.work_dir.clone(),
            rootname: model_rootname,
        });
    };
    info!("Found {} model(s) to score.", models.len());

    reporter.stage("Profiling models", || {
        build_profile(
            runner,
            &config.tools,
            work_dir,
            &first_model,
            config.fasta_model.as_deref(),
            reporter,
        )
    })?;

    let template_residues = span_residues(&template)?;
    reporter.stage("Scoring template", || {
        runner.run(&score_invocation(
            &config.tools,
            work_dir,
            &template,
            &template,
            template_residues,
        ))
    })?;

    let model_residues = span_residues(&first_model)?;
    reporter.report(Progress::ItemsStart {
        total: models.len() as u64,
    });
    for model in &models {
        let cleaned = write_cleaned_model(model)?;
        runner.run(&score_invocation(
            &config.tools,
            work_dir,
            &first_model,
            &cleaned,
            model_residues,
        ))?;
        reporter.report(Progress::ItemDone {
            label: model.display().to_string(),
        });
    }
    reporter.report(Progress::ItemsFinish);

    Ok(ProqmResult {
        template,
        template_residues,
        models,
        model_residues,
        score_file: work_dir.join(ROSETTA_SCORE_FILE),
    })
}

fn alignment_entry(alignment: &Path, key: &'static str) -> Result<String, EngineError> {
    let file = File::open(alignment).map_err(EngineError::io(alignment))?;
    find_entry_name(&mut BufReader::new(file), key)
        .map_err(EngineError::io(alignment))?
        .ok_or_else(|| EngineError::MissingAlignmentEntry {
            key,
            path: alignment.to_path_buf(),
        })
}

/// Runs the ProQ feature scripts for `pdb`. With an existing full-length
/// FASTA the profile is built from it and mapped onto the PDB sequence;
/// otherwise it is built from the PDB sequence alone.
fn build_profile(
    runner: &impl CommandRunner,
    tools: &ProqmTools,
    work_dir: &Path,
    pdb: &Path,
    fasta: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<(), EngineError> {
    let perl = |script: &str| {
        ToolInvocation::new(&tools.perl, work_dir).arg(tools.proq_scripts.join(script))
    };

    match fasta.map(|f| work_dir.join(f)).filter(|f| f.is_file()) {
        Some(fasta) => {
            warn!("{}", SEQUENCE_IDENTITY_NOTICE);
            reporter.report(Progress::Notice(SEQUENCE_IDENTITY_NOTICE.to_string()));
            info!("Creating a ProQM profile for {:?}. This can take some time.", fasta);
            runner.run(&perl(RUN_ALL_EXTERNAL).arg("-fasta").arg(&fasta).args(["-membrane", "1"]))?;
            info!("Copying profile features of {:?} onto {:?}.", fasta, pdb);
            runner.run(&perl(COPY_FEATURES).arg(pdb).arg(&fasta))?;
        }
        None => {
            if let Some(missing) = fasta {
                warn!(
                    "FASTA {:?} not found; profiling the sequence of {:?} instead.",
                    missing, pdb
                );
            }
            info!("Creating a ProQM profile for {:?}. This can take some time.", pdb);
            runner.run(&perl(RUN_ALL_EXTERNAL).arg("-pdb").arg(pdb).args(["-membrane", "1"]))?;
        }
    }
    Ok(())
}

pub fn span_path(pdb: &Path) -> PathBuf {
    let mut name = pdb.as_os_str().to_os_string();
    name.push(".span");
    PathBuf::from(name)
}

fn span_residues(pdb: &Path) -> Result<usize, EngineError> {
    let path = span_path(pdb);
    let file = File::open(&path).map_err(EngineError::io(&path))?;
    residue_count(&mut BufReader::new(file)).map_err(|source| EngineError::SpanFile { path, source })
}

fn write_cleaned_model(model: &Path) -> Result<PathBuf, EngineError> {
    let cleaned = cleaned_path(model);
    if cleaned.exists() {
        info!("Replacing existing cleaned model {:?}.", cleaned);
    }
    let input = File::open(model).map_err(EngineError::io(model))?;
    let output = File::create(&cleaned).map_err(EngineError::io(&cleaned))?;
    let mut writer = BufWriter::new(output);
    strip_patched_termini(&mut BufReader::new(input), &mut writer)
        .and_then(|_| writer.flush())
        .map_err(EngineError::io(&cleaned))?;
    Ok(cleaned)
}

fn score_invocation(
    tools: &ProqmTools,
    work_dir: &Path,
    basename: &Path,
    pdb: &Path,
    residues: usize,
) -> ToolInvocation {
    ToolInvocation::new(&tools.rosetta_score_app, work_dir)
        .arg("-database")
        .arg(&tools.rosetta_db)
        .arg("-in:file:fullatom")
        .arg("-ProQ:basename")
        .arg(basename)
        .arg("-in:file:s")
        .arg(pdb)
        .args([
            "-ignore_unrecognized_res",
            "-Ntermini",
            "ALL",
            "-Ctermini",
            "ALL",
            "-out:file:scorefile",
            ROSETTA_SCORE_FILE,
            "-score:weights",
            "ProQM",
            "-ProQ:membrane",
            "-read_only_ATOM_entries",
            "true",
            "-ProQ:normalize",
        ])
        .arg(residues.to_string())
        .arg("-ProQ:output_local_prediction")
}
