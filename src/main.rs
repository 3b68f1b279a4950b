#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate prettytable;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate tracing;
extern crate clap;
extern crate serde;
extern crate serde_json;
extern crate time;
extern crate tracing_subscriber;
extern crate xdg;

#[cfg(test)]
extern crate tempfile;

mod cli;
mod commands;
mod config;
mod data;
mod errors;
mod storage;

use std::io;
use std::process;

use tracing_subscriber::EnvFilter;

use commands::{Command, exec_command};
use config::{Config, LOG_ENV};
use errors::*;
use storage::Storage;

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run() -> Result<()> {
    let matches = cli::build_app().get_matches();

    let config = Config::from_matches(&matches)?;
    init_logging(&config);

    let command = Command::from_matches(&matches)?;

    let storage = Storage::new(config.data_file);
    debug!("using book list at {}", storage.path().display());
    let mut books = storage.load()?;

    let changed = command.mutates();
    let msg = exec_command(&mut books, command)?;

    if changed {
        storage.save(&books)?;
    }

    println!("{}", msg);

    Ok(())
}

fn main() {
    if let Err(ref e) = run() {
        eprintln!("error: {}", e);

        for cause in e.iter().skip(1) {
            eprintln!("caused by: {}", cause);
        }

        process::exit(1);
    }
}
