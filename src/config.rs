use std::cmp;
use std::ffi::OsStr;
use std::path::PathBuf;

use clap::ArgMatches;
use xdg::BaseDirectories;

use errors::*;

pub const NAME: &'static str = "tome";
pub const DATA_FILE: &'static str = "books.json";
pub const LOG_ENV: &'static str = "TOME_LOG";

/// Everything resolved from the process arguments and environment before a
/// command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub verbosity: u64,
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Result<Config> {
        let data_file = match global_value(matches, "file") {
            Some(path) => PathBuf::from(path),
            None => default_data_file()?,
        };

        let verbosity = cmp::max(matches.occurrences_of("verbose"),
                                 matches.subcommand()
                                     .1
                                     .map_or(0, |sub| sub.occurrences_of("verbose")));

        Ok(Config {
            data_file: data_file,
            verbosity: verbosity,
        })
    }

    /// Default log directive; `TOME_LOG` overrides it when set.
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

// Global args given after a subcommand only land in the subcommand's matches.
fn global_value<'m>(matches: &'m ArgMatches, name: &str) -> Option<&'m OsStr> {
    matches.subcommand()
        .1
        .and_then(|sub| sub.value_of_os(name))
        .or_else(|| matches.value_of_os(name))
}

fn default_data_file() -> Result<PathBuf> {
    let bd = BaseDirectories::with_prefix(NAME)?;

    Ok(bd.place_data_file(DATA_FILE)?)
}
