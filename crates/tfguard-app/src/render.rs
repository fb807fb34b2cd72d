//! Render use cases: markdown and GitHub annotations from in-memory reports.

use tfguard_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    tfguard_render::render_markdown(report)
}

/// At most `max` annotations; GitHub drops the rest anyway.
pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    tfguard_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}
