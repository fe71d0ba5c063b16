mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::config::PartialAppConfig;
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run_app(cli) {
        let code = e.exit_code();
        if e.is_insufficient_data() {
            println!("{}", e);
        } else {
            eprintln!("\n❌ Error: {}", e);
        }
        std::process::exit(code);
    }
}

fn run_app(cli: Cli) -> Result<()> {
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("hmat v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let quiet = cli.quiet;
    let file_config = PartialAppConfig::load(cli.config.as_deref(), &cli.set_values)?;

    let command_result = match cli.command {
        Commands::Conv(args) => {
            info!("Dispatching to 'conv' command.");
            commands::conv::run(args, file_config, quiet)
        }
        Commands::Harvest(args) => {
            info!("Dispatching to 'harvest' command.");
            commands::harvest::run(args, file_config, quiet)
        }
        Commands::Extract(args) => {
            info!("Dispatching to 'extract' command.");
            commands::extract::run(args, quiet)
        }
        Commands::Proqm(args) => {
            info!("Dispatching to 'proqm' command.");
            commands::proqm::run(args, file_config, quiet)
        }
    };

    match &command_result {
        Ok(()) => info!("Command completed successfully."),
        Err(e) if e.is_insufficient_data() => info!("Stopped: {}", e),
        Err(e) => error!("Command failed: {}", e),
    }

    command_result
}
