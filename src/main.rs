mod app;
mod assets;
mod config;
mod consts;
mod game;
mod input;
mod render;
mod session;
mod ticker;
mod util;
use crate::app::{App, Outcome};
use crate::config::Config;
use crate::game::Game;
use crate::input::TerminalInput;
use crate::session::{GameError, Session};
use crate::util::error_report;
use log::{error, info};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match Config::default_path().and_then(|p| Config::load(&p, true)) {
        Ok(config) => config,
        Err(e) => {
            eprint!("{}", error_report(&e));
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config);
    match run(&config) {
        Ok(outcome) => {
            match outcome.cause {
                Some(cause) => println!("Game over ({cause}).  Final score: {}", outcome.score),
                None => println!("Final score: {}", outcome.score),
            }
            ExitCode::SUCCESS
        }
        Err(e) if e.is_broken_pipe() => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprint!("{}", error_report(&e));
            ExitCode::FAILURE
        }
    }
}

/// Set up the logger.  Failure to do so is not fatal; the game just runs
/// without logs.
fn init_logging(config: &Config) {
    let Some(path) = config.log_file() else {
        return;
    };
    let file = path
        .parent()
        .map_or(Ok(()), fs_err::create_dir_all)
        .and_then(|()| fs_err::File::create(&path));
    match file {
        Ok(file) => {
            match simplelog::WriteLogger::init(
                config.log_level,
                simplelog::Config::default(),
                file,
            ) {
                Ok(()) => info!("tilesnake {} starting", env!("CARGO_PKG_VERSION")),
                Err(e) => eprintln!("Warning: not logging: {e}"),
            }
        }
        Err(e) => eprintln!("Warning: not logging: {e}"),
    }
}

fn run(config: &Config) -> Result<Outcome, GameError> {
    let mut session = Session::open(&config.sprites_dir)?;
    let (renderer, sprites) = session.split();
    let app = App::new(Game::new(), config.tick_period());
    let outcome = app
        .run(renderer, sprites, &mut TerminalInput)
        .map_err(GameError::Io)?;
    info!("Game finished with score {}", outcome.score);
    // The session is dropped here, restoring the terminal before the caller
    // prints anything
    Ok(outcome)
}
