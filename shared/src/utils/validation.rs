//! Email validation and masking utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Regular expression for a plausible email address
///
/// Local part and domain consist of word characters, dots, or hyphens;
/// the top-level segment is at least two alphabetic characters.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w.-]+@[\w.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Validates an email address format
///
/// This is a shape check, not a deliverability check: the address still
/// has to receive the verification code to be of any use.
///
/// # Examples
///
/// ```
/// use mg_shared::utils::validation::is_valid_email;
///
/// assert!(is_valid_email("alice@example.com"));
/// assert!(!is_valid_email("not-an-address"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Mask an email address for user-visible replies and logs
///
/// Keeps at most the first three characters of the local part and the
/// full domain: `alice@example.com` becomes `ali***@example.com`.
/// Strings without an `@` are masked entirely.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let keep = local.chars().take(3).collect::<String>();
            format!("{}***@{}", keep, domain)
        }
        None => "***".to_string(),
    }
}
