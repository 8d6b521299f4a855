//! Alert banners for success and error messages. Messages must be safe to
//! show and should never include secrets or tokens.

use crate::html::escape;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Success,
    Info,
}

#[must_use]
pub fn alert(kind: AlertKind, message: &str) -> String {
    let class = match kind {
        AlertKind::Error => {
            "rounded-lg border border-red-200 bg-red-50 px-4 py-3 text-sm text-red-700"
        }
        AlertKind::Success => {
            "rounded-lg border border-emerald-200 bg-emerald-50 px-4 py-3 text-sm text-emerald-700"
        }
        AlertKind::Info => {
            "rounded-lg border border-blue-200 bg-blue-50 px-4 py-3 text-sm text-blue-700"
        }
    };

    format!(r#"<div class="{class}" role="alert">{}</div>"#, escape(message))
}
