pub mod conv;
pub mod extract;
pub mod harvest;
pub mod proqm;

use crate::utils::progress::CliProgressHandler;
use hmat::engine::progress::ProgressReporter;

pub(crate) fn reporter(quiet: bool) -> ProgressReporter<'static> {
    let handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    ProgressReporter::with_callback(handler.get_callback())
}
