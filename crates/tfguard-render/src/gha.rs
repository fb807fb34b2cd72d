use crate::{RenderableReport, RenderableSeverity};

/// Render findings and tool errors as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path},line={line},col={col},title={check_id}::{message}`
///
/// Multi-line messages (such as a suggested block order) are escaped so the
/// annotation shows them on separate lines.
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for f in &report.findings {
        let level = match f.severity {
            RenderableSeverity::Error => "error",
            RenderableSeverity::Warning => "warning",
            RenderableSeverity::Notice => "notice",
        };

        let check_id = f.check_id.as_deref().unwrap_or("tfguard");
        let mut meta = Vec::new();
        if let Some(loc) = &f.location {
            meta.push(format!("file={}", escape_property(&loc.path)));
            if let Some(line) = loc.line {
                meta.push(format!("line={}", line));
            }
            if let Some(col) = loc.col {
                meta.push(format!("col={}", col));
            }
        }
        meta.push(format!("title={}", escape_property(check_id)));

        let message = escape_data(&format!("[{}:{}] {}", check_id, f.code, f.message));
        out.push(format!("::{} {}::{}", level, meta.join(","), message));
    }

    for e in &report.data.tool_errors {
        let message = escape_data(&format!("[{}] {}", e.rule, e.message));
        match &e.path {
            Some(path) => out.push(format!("::error file={}::{}", escape_property(path), message)),
            None => out.push(format!("::error::{}", message)),
        }
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
