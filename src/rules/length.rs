//! Length rule - checks password minimum length.

use secrecy::{ExposeSecret, SecretString};

pub const MIN_LENGTH: usize = 8;

/// Length as a browser reports it: UTF-16 code units.
///
/// A character outside the Basic Multilingual Plane counts twice.
pub fn password_length(password: &str) -> usize {
    password.encode_utf16().count()
}

/// Passes when the password has at least [`MIN_LENGTH`] characters.
pub fn length_rule(password: &SecretString) -> bool {
    password_length(password.expose_secret()) >= MIN_LENGTH
}
