use crate::cli::ConvArgs;
use crate::config::PartialAppConfig;
use crate::error::Result;
use hmat::workflows::convergence;
use tracing::{debug, info};

pub fn run(args: ConvArgs, file_config: PartialAppConfig, quiet: bool) -> Result<()> {
    let config = file_config.merge_conv(&args)?;
    debug!("Final convergence configuration: {:?}", config);

    info!(
        "Analyzing {:?} with a window of {} models.",
        config.score_file, config.window_size
    );
    let reporter = super::reporter(quiet);
    let result = convergence::run(config, &reporter)?;

    println!(
        "Analyzed {} scores: {} windows of {} models.",
        result.analysis.raw.len(),
        result.analysis.rms.len(),
        result.analysis.window_size
    );
    for path in &result.written {
        println!("  wrote {}", path.display());
    }
    Ok(())
}
