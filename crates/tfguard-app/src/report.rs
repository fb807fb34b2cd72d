use anyhow::Context;
use tfguard_render::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableSeverity,
    RenderableToolError, RenderableVerdictStatus,
};
use tfguard_types::{
    Finding, ReportEnvelope, SCHEMA_REPORT_V1, Severity, TfguardData, TfguardReport, ToolMeta,
    Verdict, ids,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<TfguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse tfguard report")
}

pub fn serialize_report(report: &TfguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &TfguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
        data: RenderableData {
            findings_emitted: report.data.findings_emitted,
            findings_total: report.data.findings_total,
            truncated_reason: report.data.truncated_reason.clone(),
            tool_errors: report
                .data
                .errors
                .iter()
                .map(|e| RenderableToolError {
                    rule: e.rule.clone(),
                    path: e.path.as_ref().map(|p| p.as_str().to_string()),
                    message: e.message.clone(),
                })
                .collect(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Notice => RenderableSeverity::Notice,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: Some(f.check_id.clone()),
        code: f.code.clone(),
        message: f.message.clone(),
        location: f.location.as_ref().map(|loc| RenderableLocation {
            path: loc.path.as_str().to_string(),
            line: loc.line,
            col: loc.col,
        }),
        help: f.help.clone(),
        url: f.url.clone(),
    }
}

fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "tfguard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// A passing report with nothing scanned.
pub fn empty_report(profile: &str) -> TfguardReport {
    let now = OffsetDateTime::now_utc();
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        verdict: Verdict::Pass,
        findings: Vec::new(),
        data: TfguardData {
            profile: profile.to_string(),
            ..TfguardData::default()
        },
    }
}

/// A failing report carrying a single `tool.runtime` finding, for runs that could not start.
pub fn runtime_error_report(message: &str) -> TfguardReport {
    let now = OffsetDateTime::now_utc();
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            location: None,
            help: Some("Fix the tool error and re-run tfguard.".to_string()),
            url: None,
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        data: TfguardData {
            profile: "unknown".to_string(),
            findings_total: 1,
            findings_emitted: 1,
            ..TfguardData::default()
        },
    }
}
