//! Session cookie and route protection arguments.

use crate::web::{
    config::{DEFAULT_SESSION_COOKIE, DEFAULT_SESSION_TTL_SECONDS},
    session::SessionCheck,
};
use clap::{Arg, ArgAction, ArgMatches, Command};

pub const ARG_SESSION_COOKIE: &str = "session-cookie";
pub const ARG_SESSION_TTL_SECONDS: &str = "session-ttl-seconds";
pub const ARG_SESSION_CHECK: &str = "session-check";
pub const ARG_COOKIE_SECURE: &str = "cookie-secure";
pub const ARG_PROTECTED_PATHS: &str = "protected-paths";

const DEFAULT_PROTECTED_PATHS_ARG: &str = "/dashboard,/admin,/profile,/posts";

#[derive(Debug)]
pub struct Options {
    pub cookie_name: String,
    pub ttl_seconds: u64,
    pub check: SessionCheck,
    pub cookie_secure: bool,
    pub protected_paths: Vec<String>,
}

impl Options {
    /// Parse session arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the cookie name is blank or the session check is unknown.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let cookie_name = match matches.get_one::<String>(ARG_SESSION_COOKIE) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => anyhow::bail!("missing required argument: --{ARG_SESSION_COOKIE}"),
        };

        let check = matches
            .get_one::<String>(ARG_SESSION_CHECK)
            .map_or(Ok(SessionCheck::default()), |value| value.parse())
            .map_err(|err: String| anyhow::anyhow!("invalid --{ARG_SESSION_CHECK}: {err}"))?;

        let protected_paths = matches
            .get_many::<String>(ARG_PROTECTED_PATHS)
            .map(|paths| {
                paths
                    .map(|path| path.trim().to_string())
                    .filter(|path| !path.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            cookie_name,
            ttl_seconds: matches
                .get_one::<u64>(ARG_SESSION_TTL_SECONDS)
                .copied()
                .unwrap_or(DEFAULT_SESSION_TTL_SECONDS),
            check,
            cookie_secure: matches.get_flag(ARG_COOKIE_SECURE),
            protected_paths,
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SESSION_COOKIE)
                .long(ARG_SESSION_COOKIE)
                .help("Name of the cookie holding the session token")
                .env("MARKETPLACE_SESSION_COOKIE")
                .default_value(DEFAULT_SESSION_COOKIE),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL_SECONDS)
                .long(ARG_SESSION_TTL_SECONDS)
                .help("Session cookie TTL in seconds")
                .env("MARKETPLACE_SESSION_TTL_SECONDS")
                .default_value("3600")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_SESSION_CHECK)
                .long(ARG_SESSION_CHECK)
                .help("What the route guard requires of the session cookie")
                .long_help(
                    "What the route guard requires of the session cookie. `presence` accepts any non-empty value; `expiry` also requires a JWT whose exp claim is in the future.",
                )
                .env("MARKETPLACE_SESSION_CHECK")
                .value_parser(["presence", "expiry"])
                .default_value("presence"),
        )
        .arg(
            Arg::new(ARG_COOKIE_SECURE)
                .long(ARG_COOKIE_SECURE)
                .help("Mark the session cookie as Secure (HTTPS only)")
                .env("MARKETPLACE_COOKIE_SECURE")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_PROTECTED_PATHS)
                .long(ARG_PROTECTED_PATHS)
                .help("Comma separated path prefixes that require a session")
                .env("MARKETPLACE_PROTECTED_PATHS")
                .value_delimiter(',')
                .default_value(DEFAULT_PROTECTED_PATHS_ARG),
        )
}
