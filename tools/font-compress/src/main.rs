//! Tool for converting monochrome bitmap font spritesheets into compact byte arrays for
//! embedding in firmware.

use std::process::ExitCode;

pub mod action;
pub mod cli;
pub mod format;
pub mod logging;
pub mod sheet;
pub mod stats;

fn main() -> ExitCode {
    let action = cli::get_action();
    logging::init(action.configuration().log_level);

    match action::run(action) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            error.exit_code()
        }
    }
}
