//! Page shells: the bare document, the centered auth layout, and the
//! dashboard layout with sidebar and header.

use crate::{html::escape, web::types::CurrentUser};
use axum::http::StatusCode;
use std::fmt::Write as _;

pub const APP_TITLE: &str = "Marketplace";

/// Sidebar entries of the dashboard, as (label, href).
pub const SIDEBAR_LINKS: [(&str, &str); 4] = [
    ("Dashboard", "/dashboard"),
    ("Posts", "/dashboard/posts"),
    ("Users", "/dashboard/users"),
    ("Settings", "/dashboard/settings"),
];

/// Full HTML document. `body` is trusted markup.
#[must_use]
pub fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{} | {APP_TITLE}</title></head><body class="bg-gray-50 text-gray-900 min-h-screen">{body}</body></html>"#,
        escape(title)
    )
}

/// Centered card used by the login, signup and forgot-password pages.
#[must_use]
pub fn auth_layout(title: &str, content: &str) -> String {
    let body = format!(
        r#"<main class="flex min-h-screen items-center justify-center px-4"><div class="w-full max-w-md rounded-2xl bg-white p-8 shadow-lg"><h1 class="mb-6 text-center text-2xl font-bold text-gray-800">{}</h1>{content}</div></main>"#,
        escape(title)
    );
    document(title, &body)
}

/// Dashboard layout with sidebar, header and logout button.
#[must_use]
pub fn dashboard_shell(
    title: &str,
    user: Option<&CurrentUser>,
    active_href: &str,
    content: &str,
) -> String {
    let nav = sidebar_nav(&SIDEBAR_LINKS, active_href);

    let who = user.map_or_else(String::new, |user| {
        let role = user
            .role
            .as_deref()
            .map_or_else(String::new, |role| format!(" ({})", escape(role)));
        format!(
            r#"<span class="text-sm text-gray-600">Signed in as <strong>{}</strong>{role}</span>"#,
            escape(&user.username)
        )
    });

    let body = format!(
        r#"<div class="flex min-h-screen"><aside class="w-64 bg-gray-800 p-4"><div class="mb-8 text-xl font-bold text-white">{APP_TITLE}</div><nav><ul class="space-y-2">{nav}</ul></nav></aside><div class="flex flex-1 flex-col"><header class="flex items-center justify-between bg-white px-6 py-4 shadow"><h1 class="text-xl font-semibold">Admin Dashboard</h1><div class="flex items-center gap-4">{who}<form method="post" action="/logout"><button type="submit" class="rounded-lg bg-red-600 px-4 py-2 text-sm font-medium text-white hover:bg-red-700">Logout</button></form></div></header><main class="flex-1 p-6">{content}</main></div></div>"#
    );
    document(title, &body)
}

/// Page shown for errors surfaced through [`crate::web::errors::AppError`].
#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        r#"<main class="flex min-h-screen flex-col items-center justify-center gap-4 px-4"><h1 class="text-4xl font-bold text-gray-800">{}</h1><p class="text-gray-600">{}</p><a class="text-blue-600 hover:underline" href="/">Back to home</a></main>"#,
        status.as_u16(),
        escape(message)
    );
    document(status.canonical_reason().unwrap_or("Error"), &body)
}

#[must_use]
pub fn not_found_page() -> String {
    error_page(StatusCode::NOT_FOUND, "Page not found")
}

fn sidebar_nav(links: &[(&str, &str)], active_href: &str) -> String {
    let mut nav = String::new();
    for (label, href) in links {
        let class = if *href == active_href {
            "block rounded-lg px-4 py-2 bg-gray-700 text-white"
        } else {
            "block rounded-lg px-4 py-2 text-gray-300 hover:bg-gray-700 hover:text-white"
        };
        let _ = write!(
            nav,
            r#"<li><a class="{class}" href="{}">{}</a></li>"#,
            escape(href),
            escape(label)
        );
    }
    nav
}
