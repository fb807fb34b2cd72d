//! Explain registry for rules and codes.
//!
//! Maps rule names and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a rule or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule/code.
    pub title: &'static str,
    /// What the rule does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after configuration examples.
    pub examples: ExamplePair,
}

/// Before and after configuration examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Configuration that would trigger a finding.
    pub before: &'static str,
    /// Configuration that passes the rule.
    pub after: &'static str,
}

/// Look up an explanation by rule name or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::RULE_TERRAFORM_OUTPUT_ORDER => Some(explain_output_order()),
        ids::CODE_UNSORTED_OUTPUTS => Some(explain_unsorted_outputs()),
        _ => None,
    }
}

/// List all known rule names.
pub fn all_rule_names() -> &'static [&'static str] {
    &[ids::RULE_TERRAFORM_OUTPUT_ORDER]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[ids::CODE_UNSORTED_OUTPUTS]
}

const OUTPUT_ORDER_BEFORE: &str = r#"output "vpc_id" {
  value = aws_vpc.main.id
}

output "subnet_ids" {
  value = aws_subnet.private[*].id
}"#;

const OUTPUT_ORDER_AFTER: &str = r#"output "subnet_ids" {
  value = aws_subnet.private[*].id
}

output "vpc_id" {
  value = aws_vpc.main.id
}"#;

fn explain_output_order() -> Explanation {
    Explanation {
        title: "Terraform Output Order",
        description: "\
Checks that `output` blocks in each Terraform file are declared in lexicographic
order by output name.

Sorted outputs make modules easier to scan and keep diffs small when outputs are
added: a new output lands in a predictable place instead of wherever the author
happened to append it.

Only top-level `output` blocks are considered, per file. Names are compared
byte-wise, so `Zeta` sorts before `alpha`. This rule is disabled by default.",
        remediation: "\
Reorder the `output` blocks so their names are sorted. The finding message
contains the full recommended block sequence, formatted, with each block's
comments and body preserved; replace the file's outputs with it.

Enable the rule in `tfguard.toml`:

    [rules.terraform_output_order]
    enabled = true",
        examples: ExamplePair {
            before: OUTPUT_ORDER_BEFORE,
            after: OUTPUT_ORDER_AFTER,
        },
    }
}

fn explain_unsorted_outputs() -> Explanation {
    Explanation {
        title: "Unsorted Outputs",
        description: "\
A file declares `output` blocks whose names are not in lexicographic order.
The finding is anchored at the first `output` block of the file, even when a
later block is the one out of place.",
        remediation: "\
Replace the file's `output` blocks with the recommended order from the finding
message.",
        examples: ExamplePair {
            before: OUTPUT_ORDER_BEFORE,
            after: OUTPUT_ORDER_AFTER,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_identifier_resolves() {
        for id in all_rule_names().iter().chain(all_codes()) {
            assert!(lookup_explanation(id).is_some(), "missing explanation: {id}");
        }
    }

    #[test]
    fn unknown_identifier_is_none() {
        assert!(lookup_explanation("terraform_variable_order").is_none());
    }
}
