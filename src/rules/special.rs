//! Special character rule.

use secrecy::{ExposeSecret, SecretString};

/// Characters accepted by the `special` rule.
pub const SPECIAL_CHARS: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+', '=', '-',
];

/// Passes when the password contains at least one of [`SPECIAL_CHARS`].
pub fn special_rule(password: &SecretString) -> bool {
    password.expose_secret().contains(SPECIAL_CHARS)
}
