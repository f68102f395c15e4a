//! Password strength scoring.

use repurpose_common::{PasswordChecks, PasswordStrengthReport};

/// Minimum number of characters for the length rule.
pub const MIN_LENGTH: usize = 8;

/// Characters that satisfy the symbol rule.
pub const SYMBOLS: &str = r#"!@#$%^&*(),.?":{}|<>"#;

/// Score a password against the five strength rules.
///
/// Pure and total: every input, including the empty string, yields a report.
pub fn evaluate(password: &str) -> PasswordStrengthReport {
    let checks = PasswordChecks {
        length: password.chars().count() >= MIN_LENGTH,
        uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
        lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
        digit: password.chars().any(|c| c.is_ascii_digit()),
        symbol: password.chars().any(|c| SYMBOLS.contains(c)),
    };

    PasswordStrengthReport::from_checks(checks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use repurpose_common::Strength;

    #[test]
    fn test_strong_password() {
        let report = evaluate("Str0ng!Pwd");
        assert_eq!(report.score, 5);
        assert_eq!(report.strength, Strength::Strong);
        assert!(report.checks.length);
        assert!(report.checks.uppercase);
        assert!(report.checks.lowercase);
        assert!(report.checks.digit);
        assert!(report.checks.symbol);
    }

    #[test]
    fn test_long_lowercase_is_weak() {
        let report = evaluate("aaaaaaaa");
        assert_eq!(report.score, 2);
        assert_eq!(report.strength, Strength::Weak);
        assert!(report.checks.length);
        assert!(report.checks.lowercase);
    }

    #[test]
    fn test_empty_password() {
        let report = evaluate("");
        assert_eq!(report.score, 0);
        assert_eq!(report.strength, Strength::Weak);
    }

    #[test]
    fn test_score_three_is_medium() {
        // length + lowercase + digit
        let report = evaluate("abcdefg1");
        assert_eq!(report.score, 3);
        assert_eq!(report.strength, Strength::Medium);
    }

    #[test]
    fn test_score_four_is_medium() {
        let report = evaluate("Abcdefg1");
        assert_eq!(report.score, 4);
        assert_eq!(report.strength, Strength::Medium);
        assert!(!report.checks.symbol);
    }

    #[test]
    fn test_short_password_with_every_class() {
        let report = evaluate("Ab1!");
        assert!(!report.checks.length);
        assert_eq!(report.score, 4);
        assert_eq!(report.strength, Strength::Medium);
    }

    #[test]
    fn test_every_listed_symbol_counts() {
        for symbol in SYMBOLS.chars() {
            assert!(evaluate(&symbol.to_string()).checks.symbol, "{symbol:?}");
        }
    }

    #[test]
    fn test_unlisted_punctuation_does_not_count() {
        for c in ['_', '-', '+', '=', '[', ']', '/', '\\', ';', '\'', '`', '~', ' '] {
            assert!(!evaluate(&c.to_string()).checks.symbol, "{c:?}");
        }
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 7 characters, 14 bytes
        assert!(!evaluate("ééééééé").checks.length);
        assert!(evaluate("éééééééé").checks.length);
    }

    #[test]
    fn test_score_matches_rule_count() {
        let samples = [
            "", "a", "A", "1", "!", "aA", "aA1", "aA1!", "aaaaaaaa", "AAAAAAAA", "12345678",
            "!!!!!!!!", "aaaa1111", "AAAA!!!!", "Passw0rd", "P@ssword", "p@ssw0rd", "Str0ng!Pwd",
        ];

        for sample in samples {
            let report = evaluate(sample);
            let expected = [
                sample.chars().count() >= 8,
                sample.chars().any(|c| c.is_ascii_uppercase()),
                sample.chars().any(|c| c.is_ascii_lowercase()),
                sample.chars().any(|c| c.is_ascii_digit()),
                sample.chars().any(|c| SYMBOLS.contains(c)),
            ]
            .iter()
            .filter(|rule| **rule)
            .count() as u8;

            assert_eq!(report.score, expected, "{sample:?}");
            assert_eq!(report.strength, Strength::from_score(expected), "{sample:?}");
        }
    }
}
