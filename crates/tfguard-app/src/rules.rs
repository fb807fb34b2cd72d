//! The `rules` use case: list the built-in rules and their defaults.

use std::sync::Arc;
use tfguard_domain::all_rules;
use tfguard_repo::HclFormatter;
use tfguard_types::Severity;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSummary {
    pub name: &'static str,
    pub enabled: bool,
    pub severity: Severity,
    pub link: String,
}

pub fn list_rules() -> Vec<RuleSummary> {
    all_rules(Arc::new(HclFormatter))
        .iter()
        .map(|rule| RuleSummary {
            name: rule.name(),
            enabled: rule.enabled(),
            severity: rule.severity(),
            link: rule.link(),
        })
        .collect()
}

/// One line per rule: name, default state, severity, documentation link.
pub fn format_rule_list(rules: &[RuleSummary]) -> String {
    let width = rules.iter().map(|r| r.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for r in rules {
        let state = if r.enabled { "enabled" } else { "disabled" };
        out.push_str(&format!(
            "{:<width$}  {:<8}  {:<7}  {}\n",
            r.name,
            state,
            r.severity.as_str(),
            r.link
        ));
    }
    out
}
