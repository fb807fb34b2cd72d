//! End-to-end: parse real HCL, check with the real formatter, apply the suggestion.

use std::sync::Arc;
use tfguard_domain::model::SourceFile;
use tfguard_domain::rules::{OrderSuggestion, OutputOrderRule};
use tfguard_repo::{HclFormatter, parse_config_file};
use tfguard_types::RepoPath;

const UNSORTED: &str = r#"terraform {
  required_version = ">= 1.5"
}

# Public identifiers.
output "vpc_id" {
  description = "ID of the VPC"
  value       = aws_vpc.main.id
}

variable "cidr" {
  type = string
}

output "subnet_ids" {
    value = aws_subnet.private[*].id
}

output "arn" {
  value = aws_vpc.main.arn
  sensitive = true
}
"#;

fn parse(text: &str) -> SourceFile {
    parse_config_file(&RepoPath::new("outputs.tf"), text).expect("valid HCL")
}

fn rule() -> OutputOrderRule {
    OutputOrderRule::new(Arc::new(HclFormatter))
}

fn check(text: &str) -> Option<OrderSuggestion> {
    rule().check_file(&parse(text)).expect("check succeeds")
}

fn output_names(file: &SourceFile) -> Vec<String> {
    file.blocks()
        .iter()
        .filter(|b| b.kind == "output")
        .filter_map(|b| b.name().map(str::to_string))
        .collect()
}

#[test]
fn suggestion_lists_outputs_in_sorted_order() {
    let suggestion = check(UNSORTED).expect("unsorted outputs");

    assert_eq!(suggestion.declared, vec!["vpc_id", "subnet_ids", "arn"]);
    assert_eq!(suggestion.expected, vec!["arn", "subnet_ids", "vpc_id"]);
    assert_eq!(suggestion.anchor.start.line, 6);
    assert_eq!(suggestion.anchor.end.line, 6);

    // The suggestion is itself valid HCL and names exactly the sorted outputs.
    let rescanned = parse(&suggestion.formatted);
    assert_eq!(output_names(&rescanned), suggestion.expected);
    assert!(!suggestion.formatted.contains("variable"));
    assert!(!suggestion.formatted.contains("terraform {"));
}

#[test]
fn suggestion_is_formatted() {
    let suggestion = check(UNSORTED).expect("unsorted outputs");
    let expected = r#"output "arn" {
  value     = aws_vpc.main.arn
  sensitive = true
}

output "subnet_ids" {
  value = aws_subnet.private[*].id
}

output "vpc_id" {
  description = "ID of the VPC"
  value       = aws_vpc.main.id
}
"#;
    assert_eq!(suggestion.formatted, expected);
    assert_eq!(
        suggestion.message(),
        format!("Recommended output order:\n{}", expected.trim_end())
    );
}

#[test]
fn applying_suggestion_clears_the_issue() {
    let suggestion = check(UNSORTED).expect("unsorted outputs");
    assert_eq!(check(&suggestion.formatted), None);
}

#[test]
fn sorted_file_has_no_issue() {
    let text = "output \"a\" {\n  value = 1\n}\n\noutput \"b\" {\n  value = 2\n}\n";
    assert_eq!(check(text), None);
}

#[test]
fn duplicate_outputs_keep_their_own_bodies() {
    let text = r#"output "z" {
  value = 0
}

output "dup" {
  value = "first"
}

output "dup" {
  value = "second"
}
"#;
    let suggestion = check(text).expect("unsorted outputs");
    let first = suggestion.formatted.find("\"first\"").expect("first body");
    let second = suggestion.formatted.find("\"second\"").expect("second body");
    assert!(first < second);
    assert_eq!(suggestion.expected, vec!["dup", "dup", "z"]);
}
