//! Password strength policy
//!
//! Six rules, all required before an account password is accepted. The
//! per-rule results feed the checklist shown next to the password field.

/// One evaluated strength rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleCheck {
    pub rule: &'static str,
    pub passed: bool,
}

const MIN_LENGTH: usize = 8;

pub const RULE_MIN_LENGTH: &str = "At least 8 characters";
pub const RULE_UPPERCASE: &str = "Contains an uppercase letter";
pub const RULE_LOWERCASE: &str = "Contains a lowercase letter";
pub const RULE_DIGIT: &str = "Contains a digit";
pub const RULE_SPECIAL: &str = "Contains a special character";
pub const RULE_NOT_ID: &str = "Does not contain the Employee ID";

/// Evaluate every rule against the password. `employee_id` feeds the
/// last rule; pass the id the account will be created under.
pub fn evaluate(password: &str, employee_id: &str) -> Vec<RuleCheck> {
    let contains_id = !employee_id.is_empty()
        && password
            .to_lowercase()
            .contains(&employee_id.to_lowercase());
    vec![
        RuleCheck {
            rule: RULE_MIN_LENGTH,
            passed: password.chars().count() >= MIN_LENGTH,
        },
        RuleCheck {
            rule: RULE_UPPERCASE,
            passed: password.chars().any(|c| c.is_uppercase()),
        },
        RuleCheck {
            rule: RULE_LOWERCASE,
            passed: password.chars().any(|c| c.is_lowercase()),
        },
        RuleCheck {
            rule: RULE_DIGIT,
            passed: password.chars().any(|c| c.is_ascii_digit()),
        },
        RuleCheck {
            rule: RULE_SPECIAL,
            passed: password
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
        },
        RuleCheck {
            rule: RULE_NOT_ID,
            passed: !contains_id,
        },
    ]
}

/// Names of the rules the password fails, empty when it is acceptable.
pub fn failed_rules(password: &str, employee_id: &str) -> Vec<&'static str> {
    evaluate(password, employee_id)
        .into_iter()
        .filter(|check| !check.passed)
        .map(|check| check.rule)
        .collect()
}

/// Whether all six rules pass.
pub fn is_strong(password: &str, employee_id: &str) -> bool {
    failed_rules(password, employee_id).is_empty()
}
