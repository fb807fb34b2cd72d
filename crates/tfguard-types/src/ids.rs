//! Stable identifiers for rules and finding codes.
//!
//! Rule names are snake_case and match the names users write in `tfguard.toml`
//! and suppression lists. `code` is a short snake_case discriminator.

// Rules
pub const RULE_TERRAFORM_OUTPUT_ORDER: &str = "terraform_output_order";

// Codes: terraform_output_order
pub const CODE_UNSORTED_OUTPUTS: &str = "unsorted_outputs";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";

/// Documentation link for a rule, rooted at the project repository.
pub fn reference_link(rule_name: &str) -> String {
    format!(
        "{}/blob/main/docs/rules/{}.md",
        env!("CARGO_PKG_REPOSITORY"),
        rule_name
    )
}
