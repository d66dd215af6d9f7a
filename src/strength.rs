//! Strength meter - informational score, independent of the submit gate.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::patterns::contains_weak_pattern;
use crate::rules::{
    digit_rule, lower_rule, password_length, special_rule, upper_rule, MIN_LENGTH,
};

/// Length at which a password earns its second length point.
pub const LONG_LENGTH: usize = 12;

/// Points removed when a weak pattern is present.
const WEAK_PATTERN_PENALTY: i32 = 2;

/// Strength score, always within `0..=StrengthScore::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StrengthScore(u8);

impl StrengthScore {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 6;

    /// Clamps a raw score into range.
    pub fn new(raw: i32) -> Self {
        Self(raw.clamp(Self::MIN as i32, Self::MAX as i32) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn level(self) -> StrengthLevel {
        match self.0 {
            0..=2 => StrengthLevel::Weak,
            3..=4 => StrengthLevel::Medium,
            _ => StrengthLevel::Strong,
        }
    }
}

impl fmt::Display for StrengthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display band of a [`StrengthScore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

impl StrengthLevel {
    pub fn label(self) -> &'static str {
        match self {
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Medium => "Medium",
            StrengthLevel::Strong => "Strong",
        }
    }
}

/// Computes the strength score of a password.
///
/// +1 for 8+ characters, +1 for 12+, +1 lowercase, +1 uppercase, +1 digit,
/// +2 special character, -2 if any weak pattern appears. Clamped to `0..=6`.
pub fn calculate_strength(password: &SecretString) -> StrengthScore {
    let len = password_length(password.expose_secret());
    let mut score: i32 = 0;

    if len >= MIN_LENGTH {
        score += 1;
    }
    if len >= LONG_LENGTH {
        score += 1;
    }
    if lower_rule(password) {
        score += 1;
    }
    if upper_rule(password) {
        score += 1;
    }
    if digit_rule(password) {
        score += 1;
    }
    if special_rule(password) {
        score += 2;
    }
    if contains_weak_pattern(password.expose_secret()) {
        score -= WEAK_PATTERN_PENALTY;
    }

    StrengthScore::new(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_of(s: &str) -> u8 {
        calculate_strength(&SecretString::new(s.to_string().into())).value()
    }

    #[test]
    fn test_empty_password_scores_zero() {
        assert_eq!(score_of(""), 0);
    }

    #[test]
    fn test_mixed_password_scores_max() {
        // 1 (len>=8) + 1 lower + 1 upper + 1 digit + 2 special
        assert_eq!(score_of("Abc12345!"), 6);
    }

    #[test]
    fn test_common_word_clamps_to_zero() {
        // 1 (len>=8) + 1 lower - 2 weak pattern
        assert_eq!(score_of("password"), 0);
    }

    #[test]
    fn test_long_password_capped() {
        let long = "Zx9!Yw8@Vu7#".repeat(50);
        assert_eq!(score_of(&long), StrengthScore::MAX);
    }

    #[test]
    fn test_weak_pattern_is_case_insensitive() {
        // 1 (len>=8) + 1 (len>=12) + 1 lower + 1 upper - 2
        assert_eq!(score_of("QwErTyUiOpAs"), 2);
        assert_eq!(score_of("ZwErTyUiOpAs"), 4);
    }

    #[test]
    fn test_length_points_use_code_units() {
        // 8 code units: 1 (len>=8) only
        assert_eq!(score_of("😀😀😀😀"), 1);
        // 12 code units: 1 (len>=8) + 1 (len>=12)
        assert_eq!(score_of("😀😀😀😀😀😀"), 2);
    }

    #[test]
    fn test_penalty_applies_once() {
        // 1 (len>=8) + 1 (len>=12) + 1 lower + 1 digit - 2, three patterns present
        assert_eq!(score_of("abc123qwerty"), 2);
    }

    #[test]
    fn test_score_always_in_range() {
        let samples = [
            "", "a", "A", "1", "!", "aA1!", "password", "PASSWORD123",
            "Zx9!Yw8@Vu7#Ts6$", "qwert", "ééééééééééééé", "\u{0}\u{1}",
        ];
        for s in samples {
            let score = score_of(s);
            assert!(score <= StrengthScore::MAX, "{s:?} scored {score}");
        }
    }

    #[test]
    fn test_levels() {
        assert_eq!(StrengthScore::new(-3).level(), StrengthLevel::Weak);
        assert_eq!(StrengthScore::new(2).level(), StrengthLevel::Weak);
        assert_eq!(StrengthScore::new(3).level(), StrengthLevel::Medium);
        assert_eq!(StrengthScore::new(4).level(), StrengthLevel::Medium);
        assert_eq!(StrengthScore::new(5).level(), StrengthLevel::Strong);
        assert_eq!(StrengthScore::new(99).value(), StrengthScore::MAX);
        assert_eq!(StrengthLevel::Strong.label(), "Strong");
    }
}
