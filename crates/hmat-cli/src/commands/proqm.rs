use crate::cli::ProqmArgs;
use crate::config::PartialAppConfig;
use crate::error::Result;
use hmat::engine::external::SystemRunner;
use hmat::workflows::proqm;
use tracing::{debug, info};

pub fn run(args: ProqmArgs, file_config: PartialAppConfig, quiet: bool) -> Result<()> {
    let config = file_config.merge_proqm(&args)?;
    debug!("Final ProQM configuration: {:?}", config);
    info!("Running ProQM in {:?}.", config.work_dir);

    let result = proqm::run(config, &SystemRunner, &super::reporter(quiet))?;

    println!(
        "Template {} ({} residues) and {} model(s) ({} residues) scored.",
        result.template.display(),
        result.template_residues,
        result.models.len(),
        result.model_residues
    );
    println!("Scores written to {}.", result.score_file.display());
    Ok(())
}
