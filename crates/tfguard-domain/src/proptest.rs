//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - When the output-order rule fires
//! - The shape of the suggested order
//! - Findings ordering determinism

use crate::engine::evaluate;
use crate::rules::{OutputOrderRule, all_rules};
use crate::test_support::{
    config_with_rule, header_names, model, outputs_file, passthrough_formatter,
};
use proptest::prelude::*;
use tfguard_types::{Severity, ids};

/// Output names: identifiers, mixed case so byte order differs from dictionary order.
fn arb_output_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_-]{0,15}").unwrap()
}

fn arb_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_output_name(), 0..12)
}

fn refs(names: &[String]) -> Vec<&str> {
    names.iter().map(String::as_str).collect()
}

proptest! {
    #[test]
    fn sorted_files_never_report(mut names in arb_names()) {
        names.sort();
        let rule = OutputOrderRule::new(passthrough_formatter());
        let file = outputs_file("outputs.tf", &refs(&names));
        prop_assert_eq!(rule.check_file(&file), Ok(None));
    }

    #[test]
    fn reports_exactly_when_unsorted(names in arb_names()) {
        let rule = OutputOrderRule::new(passthrough_formatter());
        let file = outputs_file("outputs.tf", &refs(&names));
        let unsorted = names.windows(2).any(|w| w[0] > w[1]);
        let result = rule.check_file(&file).expect("synthetic file is well formed");
        prop_assert_eq!(result.is_some(), unsorted);
    }

    #[test]
    fn expected_is_sorted_permutation_of_declared(names in arb_names()) {
        let rule = OutputOrderRule::new(passthrough_formatter());
        let file = outputs_file("outputs.tf", &refs(&names));
        if let Some(suggestion) = rule.check_file(&file).expect("well formed") {
            prop_assert_eq!(&suggestion.declared, &names);

            let mut sorted = names.clone();
            sorted.sort();
            prop_assert_eq!(&suggestion.expected, &sorted);

            // The suggestion text lists the blocks in the expected order.
            prop_assert_eq!(header_names(&suggestion.formatted, "output"), sorted);
        }
    }

    #[test]
    fn evaluation_is_deterministic(
        files in prop::collection::vec(arb_names(), 1..6)
    ) {
        let sources = files
            .iter()
            .enumerate()
            .map(|(i, names)| outputs_file(&format!("mod{i}/outputs.tf"), &refs(names)))
            .collect();
        let model = model(sources);
        let cfg = config_with_rule(ids::RULE_TERRAFORM_OUTPUT_ORDER, Severity::Notice);
        let rules = all_rules(passthrough_formatter());

        let first = evaluate(&model, &cfg, &rules);
        let second = evaluate(&model, &cfg, &rules);
        prop_assert_eq!(&first.findings, &second.findings);

        let unsorted = files.iter().filter(|n| n.windows(2).any(|w| w[0] > w[1])).count();
        prop_assert_eq!(first.findings.len(), unsorted);
        prop_assert!(first.data.errors.is_empty());
    }
}
