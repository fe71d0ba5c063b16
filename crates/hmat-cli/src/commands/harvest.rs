use crate::cli::HarvestArgs;
use crate::config::PartialAppConfig;
use crate::error::Result;
use hmat::workflows::harvest;
use tracing::debug;

pub fn run(args: HarvestArgs, file_config: PartialAppConfig, quiet: bool) -> Result<()> {
    let config = file_config.merge_harvest(&args)?;
    debug!("Final harvest configuration: {:?}", config);

    let output = config.output.clone();
    let records = harvest::run(config, &super::reporter(quiet))?;

    println!(
        "Collected {} score(s) into {}.",
        records.len(),
        output.display()
    );
    Ok(())
}
