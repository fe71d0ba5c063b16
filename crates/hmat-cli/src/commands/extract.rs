use crate::cli::{ExtractArgs, SelectionArgs};
use crate::error::{CliError, Result};
use hmat::core::analysis::selection::SelectionRule;
use hmat::engine::config::ExtractConfig;
use hmat::workflows::extract;
use tracing::debug;

pub fn run(args: ExtractArgs, quiet: bool) -> Result<()> {
    let rule = selection_rule(args.rule)?;
    let config = ExtractConfig::new(args.scorefile, args.outdir, rule)
        .map_err(|e| CliError::Argument(e.to_string()))?;
    debug!("Final extract configuration: {:?}", config);

    let output_dir = config.output_dir.clone();
    let selection = extract::run(config, &super::reporter(quiet))?;

    println!("{}", selection.summary());
    println!("Models copied to {}.", output_dir.display());
    Ok(())
}

fn selection_rule(args: SelectionArgs) -> Result<SelectionRule> {
    match (args.percent, args.threshold) {
        (Some(p), None) => Ok(SelectionRule::Percent(p)),
        (None, Some(t)) => Ok(SelectionRule::Threshold(t)),
        _ => Err(CliError::Argument(
            "exactly one of --percent or --threshold is required".into(),
        )),
    }
}
