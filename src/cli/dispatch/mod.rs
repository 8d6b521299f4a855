//! Maps validated CLI matches to the action to run.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{api, session};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let api_opts = api::Options::parse(matches)?;
    let session_opts = session::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        api_url: api_opts.url,
        api_timeout_seconds: api_opts.timeout_seconds,
        session_cookie: session_opts.cookie_name,
        session_ttl_seconds: session_opts.ttl_seconds,
        session_check: session_opts.check,
        cookie_secure: session_opts.cookie_secure,
        protected_paths: session_opts.protected_paths,
    }))
}
