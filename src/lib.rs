//! # Marketplace web front-end
//!
//! `marketplace-web` serves the marketplace pages (login, signup, forgot
//! password, dashboard, posts) and talks to the external marketplace API on
//! behalf of the browser.
//!
//! ## Session model
//!
//! The API hands out a bearer token on login. The token is kept in exactly one
//! place, an `HttpOnly` cookie, and every read or write goes through
//! [`web::session::SessionStore`]. The route guard and the authenticated
//! request wrapper both use that accessor, so they can never disagree about
//! whether a visitor is signed in.
//!
//! ## Route guard
//!
//! Every navigation passes through [`web::guard`] before a page renders.
//! Requests for a protected prefix (`/dashboard`, `/admin`, `/profile`,
//! `/posts` by default) without a session are redirected to `/login`.
//!
//! ## Table widget
//!
//! [`table`] holds a generic sortable/selectable table used by the posts page.
//! Its state machine is independent of HTTP; the posts page replays header
//! clicks and row toggles from the query string.

pub mod cli;
pub mod html;
pub mod table;
pub mod web;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
