use crate::{RenderableFinding, RenderableReport, RenderableSeverity, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Tfguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Findings: {} (emitted) / {} (total)\n\n",
        verdict, report.data.findings_emitted, report.data.findings_total
    ));

    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
    } else {
        out.push_str("## Findings\n\n");
        for f in &report.findings {
            push_finding(&mut out, f);
        }
    }

    if !report.data.tool_errors.is_empty() {
        out.push_str("\n## Tool errors\n\n");
        for e in &report.data.tool_errors {
            match &e.path {
                Some(path) => out.push_str(&format!("- `{}` `{}`: ", e.rule, path)),
                None => out.push_str(&format!("- `{}`: ", e.rule)),
            }
            // Keep multi-line errors inside the list item.
            out.push_str(&e.message.replace('\n', "\n  "));
            out.push('\n');
        }
    }

    out
}

fn push_finding(out: &mut String, f: &RenderableFinding) {
    let sev = match f.severity {
        RenderableSeverity::Notice => "NOTICE",
        RenderableSeverity::Warning => "WARN",
        RenderableSeverity::Error => "ERROR",
    };
    let (summary, details) = match f.message.split_once('\n') {
        Some((summary, details)) => (summary, Some(details)),
        None => (f.message.as_str(), None),
    };

    out.push_str(&format!(
        "- [{}] `{}` / `{}`: {}",
        sev,
        f.check_id.as_deref().unwrap_or(""),
        f.code,
        summary
    ));
    if let Some(loc) = &f.location {
        out.push_str(&format!(" (`{}`:{})", loc.path, loc.line.unwrap_or(0)));
    }
    out.push('\n');

    if let Some(details) = details {
        out.push_str("\n  ```hcl\n");
        for line in details.lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                out.push_str(&format!("  {}\n", line));
            }
        }
        out.push_str("  ```\n\n");
    }

    if let Some(help) = &f.help {
        out.push_str(&format!("  - help: {}\n", help));
    }
    if let Some(url) = &f.url {
        out.push_str(&format!("  - url: {}\n", url));
    }
}
