//! Login, signup and forgot-password forms. Each render starts from the
//! values passed in, so a stale error never survives a new submission.

use super::{
    alert::{AlertKind, alert},
    layout::auth_layout,
};
use crate::html::escape;

const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5";
const LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-gray-900";
const BUTTON_CLASS: &str = "w-full rounded-lg bg-blue-600 px-5 py-2.5 text-center text-sm font-medium text-white hover:bg-blue-700";

fn input(name: &str, label: &str, kind: &str, value: &str) -> String {
    format!(
        r#"<div class="mb-5"><label for="{name}" class="{LABEL_CLASS}">{label}</label><input id="{name}" name="{name}" type="{kind}" value="{}" class="{INPUT_CLASS}" required></div>"#,
        escape(value)
    )
}

fn notice(notice: Option<(AlertKind, &str)>) -> String {
    notice.map_or_else(String::new, |(kind, message)| {
        format!(r#"<div class="mb-5">{}</div>"#, alert(kind, message))
    })
}

#[must_use]
pub fn login_page(username: &str, error: Option<&str>) -> String {
    let content = format!(
        r#"<form method="post" action="/login" class="max-w-sm mx-auto">{}{}{}<button type="submit" class="{BUTTON_CLASS}">Login</button></form><div class="mt-4 flex justify-between text-sm"><a class="text-blue-600 hover:underline" href="/signup">Create an account</a><a class="text-blue-600 hover:underline" href="/forgot-password">Forgot password?</a></div>"#,
        notice(error.map(|message| (AlertKind::Error, message))),
        input("username", "Username", "text", username),
        input("password", "Password", "password", ""),
    );
    auth_layout("Login", &content)
}

/// Values echoed back into the signup form. Passwords are never echoed.
#[derive(Debug, Default)]
pub struct SignupValues<'a> {
    pub username: &'a str,
    pub city: &'a str,
}

#[must_use]
pub fn signup_page(values: &SignupValues<'_>, error: Option<&str>) -> String {
    let content = format!(
        r#"<form method="post" action="/signup" class="max-w-sm mx-auto">{}{}{}{}{}<button type="submit" class="{BUTTON_CLASS}">Sign up</button></form><p class="mt-4 text-center text-sm">Already have an account? <a class="text-blue-600 hover:underline" href="/login">Login</a></p>"#,
        notice(error.map(|message| (AlertKind::Error, message))),
        input("username", "Username", "text", values.username),
        input("password", "Password", "password", ""),
        input("confirm_password", "Confirm password", "password", ""),
        input("city", "City", "text", values.city),
    );
    auth_layout("Sign up", &content)
}

#[must_use]
pub fn forgot_password_page(email: &str, outcome: Option<(AlertKind, &str)>) -> String {
    let content = format!(
        r#"<form method="post" action="/forgot-password" class="max-w-sm mx-auto">{}{}<button type="submit" class="{BUTTON_CLASS}">Send reset link</button></form><p class="mt-4 text-center text-sm"><a class="text-blue-600 hover:underline" href="/login">Back to login</a></p>"#,
        notice(outcome),
        input("email", "Email", "email", email),
    );
    auth_layout("Forgot password", &content)
}
