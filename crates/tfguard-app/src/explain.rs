//! The `explain` use case: look up rule/code documentation.

use tfguard_types::explain::{self, Explanation};

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown identifier; includes the known rule names and codes.
    NotFound {
        identifier: String,
        available_rules: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

/// Look up an explanation for a rule name or code.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_rules: explain::all_rule_names(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\n");
    out.push_str("Examples\n");
    out.push_str("--------\n\n");
    out.push_str("Before (violation):\n");
    out.push_str("```hcl\n");
    out.push_str(exp.examples.before);
    out.push('\n');
    out.push_str("```\n\n");
    out.push_str("After (fixed):\n");
    out.push_str("```hcl\n");
    out.push_str(exp.examples.after);
    out.push('\n');
    out.push_str("```\n");

    out
}

/// Format the "not found" message for terminal display.
pub fn format_not_found(identifier: &str, rules: &[&str], codes: &[&str]) -> String {
    let mut out = format!("Unknown rule or code: {}\n\n", identifier);
    out.push_str("Available rules:\n");
    for name in rules {
        out.push_str(&format!("  - {}\n", name));
    }
    out.push_str("\nAvailable codes:\n");
    for code in codes {
        out.push_str(&format!("  - {}\n", code));
    }
    out
}
