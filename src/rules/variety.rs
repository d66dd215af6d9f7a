//! Letter-case rules - checks for ASCII lowercase and uppercase letters.

use secrecy::{ExposeSecret, SecretString};

/// Passes when the password contains at least one ASCII lowercase letter.
pub fn lower_rule(password: &SecretString) -> bool {
    password.expose_secret().chars().any(|c| c.is_ascii_lowercase())
}

/// Passes when the password contains at least one ASCII uppercase letter.
pub fn upper_rule(password: &SecretString) -> bool {
    password.expose_secret().chars().any(|c| c.is_ascii_uppercase())
}

/// Passes when the password contains at least one ASCII digit.
///
/// Not a mandatory rule; only the strength score looks at digits.
pub fn digit_rule(password: &SecretString) -> bool {
    password.expose_secret().chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[test]
    fn test_lower_rule() {
        assert!(lower_rule(&secret("ABCd")));
        assert!(!lower_rule(&secret("ABC123!")));
    }

    #[test]
    fn test_upper_rule() {
        assert!(upper_rule(&secret("abcD")));
        assert!(!upper_rule(&secret("abc123!")));
    }

    #[test]
    fn test_non_ascii_letters_do_not_count() {
        assert!(!lower_rule(&secret("ÀÉÎ")));
        assert!(!upper_rule(&secret("àéî")));
    }

    #[test]
    fn test_digit_rule() {
        assert!(digit_rule(&secret("abc1")));
        assert!(!digit_rule(&secret("abc")));
    }
}
