//! The `check` use case: evaluate rules and produce a report.

use anyhow::Context;
use camino::Utf8Path;
use std::sync::Arc;
use tfguard_domain::report::DomainReport;
use tfguard_repo::HclFormatter;
use tfguard_settings::{Overrides, ResolvedConfig};
use tfguard_types::{ReportEnvelope, SCHEMA_REPORT_V1, TfguardReport, ToolMeta, Verdict};
use time::OffsetDateTime;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Terraform module root.
    pub repo_root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: TfguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

impl CheckOutput {
    /// Whether any rule failed to check some file.
    pub fn has_tool_errors(&self) -> bool {
        !self.report.data.errors.is_empty()
    }
}

/// Run the check use case: parse config, discover files, evaluate rules, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Empty config is allowed; defaults apply.
    let cfg = if input.config_text.trim().is_empty() {
        tfguard_settings::TfguardConfigV1::default()
    } else {
        tfguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = tfguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let model = tfguard_repo::build_module_model(input.repo_root)
        .with_context(|| format!("load Terraform files under {}", input.repo_root))?;

    let rules = tfguard_domain::all_rules(Arc::new(HclFormatter));
    let DomainReport {
        verdict,
        findings,
        data,
        ..
    } = tfguard_domain::evaluate(&model, &resolved.effective, &rules);

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "tfguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        findings,
        data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
