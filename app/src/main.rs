use std::process::ExitCode;

use clap::Parser;
use marble_app::{MarbleApp, MarbleArgs, headless};
use marble_sim::SimError;

fn main() -> ExitCode {
    let args = MarbleArgs::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level.as_str()),
    )
    .init();

    marble_core::init();
    marble_sim::init();
    marble_app::init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            if let SimError::BackendUnavailable(_) = err {
                eprintln!(
                    "The marble playground needs a window to run. \
                     Try `marble --headless` to run the simulation without one."
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: MarbleArgs) -> Result<(), SimError> {
    let config = args.load_config()?;
    if args.headless {
        let summary = headless::run(&args, config)?;
        log::info!(
            "Headless run finished: {} frames, {} respawns, ball at {:?}",
            summary.frames,
            summary.respawns,
            summary.last.and_then(|r| r.controlled_position)
        );
        Ok(())
    } else {
        MarbleApp::run(args, config)
    }
}
