use crate::{
    cli::telemetry,
    web::{self, config::WebConfig, session::SessionCheck},
};
use anyhow::Result;
use std::time::Duration;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub api_url: String,
    pub api_timeout_seconds: u64,
    pub session_cookie: String,
    pub session_ttl_seconds: u64,
    pub session_check: SessionCheck,
    pub cookie_secure: bool,
    pub protected_paths: Vec<String>,
}

impl Args {
    #[must_use]
    pub fn web_config(&self) -> WebConfig {
        WebConfig::new(self.api_url.clone())
            .with_api_timeout(Duration::from_secs(self.api_timeout_seconds))
            .with_session_cookie(self.session_cookie.clone())
            .with_session_ttl_seconds(self.session_ttl_seconds)
            .with_session_check(self.session_check)
            .with_cookie_secure(self.cookie_secure)
            .with_protected_paths(self.protected_paths.iter().cloned())
    }
}

fn log_startup_args(args: &Args) {
    debug!(
        port = args.port,
        api_url = %args.api_url,
        api_timeout_seconds = args.api_timeout_seconds,
        session_cookie = %args.session_cookie,
        session_ttl_seconds = args.session_ttl_seconds,
        session_check = args.session_check.as_str(),
        cookie_secure = args.cookie_secure,
        protected_paths = ?args.protected_paths,
        "Startup configuration"
    );
}

/// Execute the server action.
/// # Errors
/// Returns an error if the API client cannot be configured or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let result = web::new(args.port, args.web_config()).await;

    telemetry::shutdown_tracer();

    result
}
