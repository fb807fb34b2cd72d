//! Property tests for suggestions produced with the real parser and formatter.
//!
//! Output bodies are drawn from shapes that exercise the formatter: nested
//! objects, multi-line lists, heredocs, `for` expressions, conditionals and
//! nested blocks, with messy indentation.

use proptest::prelude::*;
use std::sync::Arc;
use tfguard_domain::Formatter;
use tfguard_domain::model::SourceFile;
use tfguard_domain::rules::OutputOrderRule;
use tfguard_repo::{HclFormatter, parse_config_file};
use tfguard_types::RepoPath;

const BODIES: &[&str] = &[
    "  value = \"x\"\n  description=\"plain\"\n",
    "  value = {\n    a = 1\n    \"b-c\" = [1, 2]\n  }\n",
    "  value = [\n    var.a,\n      var.b,\n  ]\n",
    "  value = <<-EOT\n    hello  {\n  EOT\n",
    "  value = {\n    for k, v in var.m :\n    k => v\n  }\n",
    "  value = [for s in var.l : upper(s)]\n  sensitive=true\n",
    "value  =  1\n      description = \"messy\"\n",
    "  value = (\n    var.a >= 1\n    ? \"x\"\n    : \"y\"\n  )\n",
    "  value = 1\n\n  precondition {\n    condition = var.x != \"\"\n    error_message = \"x is empty\"\n  }\n",
    "  # keep me\n  value = merge(\n    var.tags,\n    { Name = \"web\" },\n  )\n",
];

fn arb_output() -> impl Strategy<Value = (String, usize)> {
    (
        prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,10}").unwrap(),
        0..BODIES.len(),
    )
}

fn module_text(outputs: &[(String, usize)]) -> String {
    let mut text = String::from("variable \"m\" {\n  type = map(string)\n}\n\n");
    for (name, body) in outputs {
        text.push_str(&format!("output \"{}\" {{\n{}}}\n\n", name, BODIES[*body]));
    }
    text
}

fn parse(text: &str) -> SourceFile {
    parse_config_file(&RepoPath::new("outputs.tf"), text).expect("generated HCL parses")
}

fn output_names(file: &SourceFile) -> Vec<String> {
    file.blocks()
        .iter()
        .filter(|b| b.kind == "output")
        .filter_map(|b| b.name().map(str::to_string))
        .collect()
}

proptest! {
    #[test]
    fn suggested_text_parses_to_sorted_outputs(
        outputs in prop::collection::vec(arb_output(), 0..8)
    ) {
        let rule = OutputOrderRule::new(Arc::new(HclFormatter));
        let file = parse(&module_text(&outputs));
        let names: Vec<String> = outputs.iter().map(|(n, _)| n.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();

        match rule.check_file(&file).expect("check succeeds") {
            None => prop_assert_eq!(&names, &sorted),
            Some(suggestion) => {
                let applied = parse_config_file(&RepoPath::new("outputs.tf"), &suggestion.formatted);
                prop_assert!(
                    applied.is_ok(),
                    "suggestion does not parse:\n{}",
                    suggestion.formatted
                );
                let applied = applied.unwrap();

                prop_assert_eq!(output_names(&applied), sorted);
                prop_assert_eq!(rule.check_file(&applied), Ok(None));
            }
        }
    }

    #[test]
    fn suggested_text_is_already_formatted(
        outputs in prop::collection::vec(arb_output(), 2..8)
    ) {
        let rule = OutputOrderRule::new(Arc::new(HclFormatter));
        let file = parse(&module_text(&outputs));
        if let Some(suggestion) = rule.check_file(&file).expect("check succeeds") {
            let again = HclFormatter.format(&suggestion.formatted).expect("formats again");
            prop_assert_eq!(again, suggestion.formatted);
        }
    }
}
