//! coverstamp command-line tool
//!
//! ```text
//! coverstamp --artist "Band" --album "Live" --cover front.jpg recordings/
//! ```
//!
//! Tagged copies go to the output directory; the inputs are never modified.

use std::process::ExitCode;

use clap::Parser;

use coverstamp::cli::{self, Args};
use coverstamp::core::batch::CancelToken;
use coverstamp::logging;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    // Ctrl-C stops the batch before the next file.
    let cancel = CancelToken::new();
    if let Err(err) = ctrlc::set_handler({
        let cancel = cancel.clone();
        move || {
            log::warn!("interrupted, stopping after the current file");
            cancel.cancel();
        }
    }) {
        log::error!("Failed to register signal handler: {err}");
    }

    match cli::run_with_cancel(args, cancel) {
        Ok(summary) => {
            log::info!("{summary}");
            eprintln!("{summary}");
            if summary.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
