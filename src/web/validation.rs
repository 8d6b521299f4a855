//! Form checks run before any call to the API.

use once_cell::sync::Lazy;
use regex::Regex;

pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match.";
pub const WEAK_PASSWORD: &str =
    "Password must be at least 8 characters and contain a letter and a number.";
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";

static PASSWORD_CHARS: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\d]{8,}$").ok());
static HAS_LETTER: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"[A-Za-z]").ok());
static HAS_DIGIT: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\d").ok());
static EMAIL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

fn matches(pattern: &Option<Regex>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}

#[must_use]
pub fn passwords_match(password: &str, confirm_password: &str) -> bool {
    password == confirm_password
}

/// At least 8 ASCII letters or digits, with at least one of each.
#[must_use]
pub fn valid_password(password: &str) -> bool {
    matches(&PASSWORD_CHARS, password)
        && matches(&HAS_LETTER, password)
        && matches(&HAS_DIGIT, password)
}

#[must_use]
pub fn valid_email(email: &str) -> bool {
    matches(&EMAIL, email.trim())
}

/// First signup error, checked in the order the form shows them.
#[must_use]
pub fn signup_error(password: &str, confirm_password: &str) -> Option<&'static str> {
    if !passwords_match(password, confirm_password) {
        Some(PASSWORDS_DO_NOT_MATCH)
    } else if !valid_password(password) {
        Some(WEAK_PASSWORD)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_compile() {
        assert!(PASSWORD_CHARS.is_some());
        assert!(HAS_LETTER.is_some());
        assert!(HAS_DIGIT.is_some());
        assert!(EMAIL.is_some());
    }

    #[test]
    fn password_strength() {
        assert!(valid_password("abcdefg1"));
        assert!(valid_password("12345678a"));
        assert!(!valid_password("abcdefgh"));
        assert!(!valid_password("12345678"));
        assert!(!valid_password("abc1"));
        assert!(!valid_password("abcdefg1!"));
        assert!(!valid_password("pässwort1"));
    }

    #[test]
    fn mismatch_is_reported_before_strength() {
        assert_eq!(signup_error("abc", "abd"), Some(PASSWORDS_DO_NOT_MATCH));
        assert_eq!(signup_error("abc", "abc"), Some(WEAK_PASSWORD));
        assert_eq!(signup_error("abcdefg1", "abcdefg1"), None);
    }

    #[test]
    fn email_format() {
        assert!(valid_email("alice@example.com"));
        assert!(valid_email(" alice@example.com "));
        assert!(!valid_email("alice@example"));
        assert!(!valid_email("alice example.com"));
        assert!(!valid_email(""));
    }
}
