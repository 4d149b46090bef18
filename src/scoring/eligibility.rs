use crate::config::eligibility::{eligibility_rules, EligibilityRule};

/// Rule whose prefix list matches the role identifier, if any
pub fn rule_for_role(role_abbr: &str) -> Option<&'static EligibilityRule> {
    eligibility_rules()
        .iter()
        .find(|rule| rule.prefixes.iter().any(|p| role_abbr.starts_with(p)))
}

/// Roles without a rule are never evaluated
pub fn is_classified(role_abbr: &str) -> bool {
    rule_for_role(role_abbr).is_some()
}

/// Position match AND role-prefix match
pub fn is_eligible(position: &str, role_abbr: &str) -> bool {
    rule_for_role(role_abbr).is_some_and(|rule| position_matches(rule, position))
}

fn position_matches(rule: &EligibilityRule, position: &str) -> bool {
    rule.positions.iter().any(|token| position.contains(token))
}
