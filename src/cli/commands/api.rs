//! Marketplace API connection arguments.

use crate::web::config::{DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECONDS};
use clap::{Arg, ArgMatches, Command};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_API_TIMEOUT_SECONDS: &str = "api-timeout-seconds";

#[derive(Debug)]
pub struct Options {
    pub url: String,
    pub timeout_seconds: u64,
}

impl Options {
    /// Parse API arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the API URL is missing or blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let url = match matches.get_one::<String>(ARG_API_URL) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => anyhow::bail!("missing required argument: --{ARG_API_URL}"),
        };

        Ok(Self {
            url,
            timeout_seconds: matches
                .get_one::<u64>(ARG_API_TIMEOUT_SECONDS)
                .copied()
                .unwrap_or(DEFAULT_API_TIMEOUT_SECONDS),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the marketplace API")
                .env("MARKETPLACE_API_URL")
                .default_value(DEFAULT_API_BASE_URL),
        )
        .arg(
            Arg::new(ARG_API_TIMEOUT_SECONDS)
                .long(ARG_API_TIMEOUT_SECONDS)
                .help("Timeout in seconds for calls to the marketplace API")
                .env("MARKETPLACE_API_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
