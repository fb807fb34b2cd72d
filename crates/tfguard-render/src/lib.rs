//! Rendering utilities for CI surfaces (Markdown, GitHub annotations).

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableSeverity,
    RenderableToolError, RenderableVerdictStatus,
};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn output_order_finding() -> RenderableFinding {
        RenderableFinding {
            severity: RenderableSeverity::Notice,
            check_id: Some("terraform_output_order".to_string()),
            code: "unsorted_outputs".to_string(),
            message: "Recommended output order:\noutput \"a\" {\n  value = 1\n}\n\noutput \"b\" {\n  value = 2\n}"
                .to_string(),
            location: Some(RenderableLocation {
                path: "outputs.tf".to_string(),
                line: Some(1),
                col: Some(1),
            }),
            help: Some("Reorder the output blocks by name.".to_string()),
            url: Some(
                "https://github.com/tfguard/tfguard/blob/main/docs/rules/terraform_output_order.md"
                    .to_string(),
            ),
        }
    }

    pub fn report(findings: Vec<RenderableFinding>) -> RenderableReport {
        let n = findings.len() as u32;
        RenderableReport {
            verdict: RenderableVerdictStatus::Pass,
            findings,
            data: RenderableData {
                findings_emitted: n,
                findings_total: n,
                truncated_reason: None,
                tool_errors: Vec::new(),
            },
        }
    }
}
