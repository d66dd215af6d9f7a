//! Mandatory password rules
//!
//! Each rule is a predicate over the password. A password is acceptable for
//! submission only when every rule in [`RULES`] passes.

mod length;
mod special;
mod variety;

use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;

pub use length::{length_rule, password_length, MIN_LENGTH};
pub use special::{special_rule, SPECIAL_CHARS};
pub use variety::{digit_rule, lower_rule, upper_rule};

/// Predicate signature shared by every rule.
pub type RuleFn = fn(&SecretString) -> bool;

/// Name of a mandatory rule, as written in a requirement item's
/// `data-check` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleName {
    Length,
    Lower,
    Upper,
    Special,
}

impl RuleName {
    pub const ALL: [RuleName; 4] = [
        RuleName::Length,
        RuleName::Lower,
        RuleName::Upper,
        RuleName::Special,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RuleName::Length => "length",
            RuleName::Lower => "lower",
            RuleName::Upper => "upper",
            RuleName::Special => "special",
        }
    }

    /// The predicate backing this rule.
    pub fn predicate(self) -> RuleFn {
        match self {
            RuleName::Length => length_rule,
            RuleName::Lower => lower_rule,
            RuleName::Upper => upper_rule,
            RuleName::Special => special_rule,
        }
    }

    pub fn check(self, password: &SecretString) -> bool {
        (self.predicate())(password)
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRule(pub String);

impl FromStr for RuleName {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleName::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}

/// The fixed rule set, in evaluation order.
pub const RULES: [(RuleName, RuleFn); 4] = [
    (RuleName::Length, length_rule),
    (RuleName::Lower, lower_rule),
    (RuleName::Upper, upper_rule),
    (RuleName::Special, special_rule),
];

/// Per-rule outcome for one password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleReport {
    pub length: bool,
    pub lower: bool,
    pub upper: bool,
    pub special: bool,
}

impl RuleReport {
    pub fn passed(&self, rule: RuleName) -> bool {
        match rule {
            RuleName::Length => self.length,
            RuleName::Lower => self.lower,
            RuleName::Upper => self.upper,
            RuleName::Special => self.special,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.length && self.lower && self.upper && self.special
    }

    /// Rules that did not pass, in evaluation order.
    pub fn failed(&self) -> Vec<RuleName> {
        RuleName::ALL
            .into_iter()
            .filter(|rule| !self.passed(*rule))
            .collect()
    }
}

/// Evaluates every mandatory rule against the password.
pub fn evaluate_rules(password: &SecretString) -> RuleReport {
    let mut report = RuleReport::default();
    for (rule, check) in RULES {
        let passed = check(password);
        match rule {
            RuleName::Length => report.length = passed,
            RuleName::Lower => report.lower = passed,
            RuleName::Upper => report.upper = passed,
            RuleName::Special => report.special = passed,
        }
    }
    report
}

/// True iff all four mandatory rules hold.
pub fn mandatory_rules_met(password: &SecretString) -> bool {
    RULES.iter().all(|(_, check)| check(password))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[test]
    fn test_all_rules_pass() {
        let report = evaluate_rules(&secret("Abc12345!"));
        assert!(report.all_passed());
        assert!(report.failed().is_empty());
        assert!(mandatory_rules_met(&secret("Abc12345!")));
    }

    #[test]
    fn test_common_word_fails_upper_and_special() {
        let report = evaluate_rules(&secret("password"));
        assert!(report.length);
        assert!(report.lower);
        assert_eq!(report.failed(), vec![RuleName::Upper, RuleName::Special]);
        assert!(!mandatory_rules_met(&secret("password")));
    }

    #[test]
    fn test_empty_password_fails_everything() {
        let report = evaluate_rules(&secret(""));
        assert_eq!(report.failed(), RuleName::ALL.to_vec());
    }

    #[test]
    fn test_each_rule_is_necessary() {
        // Each candidate misses exactly one rule.
        let cases = [
            ("Ab1!", RuleName::Length),
            ("ABCDEFG1!", RuleName::Lower),
            ("abcdefg1!", RuleName::Upper),
            ("Abcdefg12", RuleName::Special),
        ];
        for (pwd, missing) in cases {
            let report = evaluate_rules(&secret(pwd));
            assert_eq!(report.failed(), vec![missing], "password {pwd:?}");
            assert!(!mandatory_rules_met(&secret(pwd)));
        }
    }

    #[test]
    fn test_rule_name_parsing() {
        for rule in RuleName::ALL {
            assert_eq!(rule.as_str().parse::<RuleName>(), Ok(rule));
        }
        assert_eq!(
            "digits".parse::<RuleName>(),
            Err(UnknownRule("digits".to_string()))
        );
        assert!("Length".parse::<RuleName>().is_err());
    }

    #[test]
    fn test_check_matches_report() {
        let pwd = secret("lowercase-only");
        let report = evaluate_rules(&pwd);
        for rule in RuleName::ALL {
            assert_eq!(rule.check(&pwd), report.passed(rule));
        }
    }
}
