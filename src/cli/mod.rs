use env_logger::{Env, Target};
use log::LevelFilter;

pub mod convert;
pub mod opt;

/// Environment variable holding the log filter, e.g. `TEXT2BIN_LOG=debug`
pub const LOG_ENV: &str = "TEXT2BIN_LOG";

fn init_logger() -> Result<(), log::SetLoggerError> {
    // stdout carries the converted output
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .target(Target::Stderr)
        .parse_env(Env::new().filter(LOG_ENV))
        .try_init()
}

/// Install error reporting and logging, then parse the arguments
pub fn init<T: clap::Parser>() -> color_eyre::Result<T> {
    color_eyre::install()?;
    init_logger()?;
    Ok(T::parse())
}
