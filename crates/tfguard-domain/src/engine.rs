use crate::fingerprint::fingerprint_for_block;
use crate::model::{ModuleModel, SourceFile};
use crate::policy::{EffectiveConfig, FailOn, IgnoreMatcher};
use crate::report::{DomainReport, SeverityCounts};
use crate::rules::{Issue, Rule, Runner};
use std::collections::BTreeMap;
use tfguard_types::{Finding, RepoPath, Severity, TfguardData, ToolError, Verdict};

struct Emitted {
    rule: &'static str,
    link: String,
    issue: Issue,
}

/// Host handed to each rule: the module's files, the ignore predicate, and an issue sink.
struct EngineRunner<'a> {
    model: &'a ModuleModel,
    ignore: &'a IgnoreMatcher,
    emitted: Vec<Emitted>,
}

impl Runner for EngineRunner<'_> {
    fn files(&self) -> &BTreeMap<RepoPath, SourceFile> {
        &self.model.files
    }

    fn is_ignored(&self, rule_name: &str, path: &RepoPath) -> bool {
        self.ignore.is_ignored(rule_name, path)
    }

    fn emit_issue(&mut self, rule: &dyn Rule, issue: Issue) {
        self.emitted.push(Emitted {
            rule: rule.name(),
            link: rule.link(),
            issue,
        });
    }
}

/// Run every enabled rule over the model.
///
/// A rule that fails on some files still reports issues for the others; its
/// errors end up in `data.errors`, never in `findings`.
pub fn evaluate(
    model: &ModuleModel,
    cfg: &EffectiveConfig,
    rules: &[Box<dyn Rule>],
) -> DomainReport {
    let mut errors: Vec<ToolError> = Vec::new();

    let ignore = match IgnoreMatcher::new(cfg) {
        Ok(m) => m,
        Err(err) => {
            errors.push(ToolError {
                rule: "ignore".to_string(),
                path: None,
                message: format!("invalid ignore pattern: {err}"),
            });
            IgnoreMatcher::default()
        }
    };

    let mut runner = EngineRunner {
        model,
        ignore: &ignore,
        emitted: Vec::new(),
    };
    let mut severities: BTreeMap<&'static str, Severity> = BTreeMap::new();
    let mut rules_run = Vec::new();

    for rule in rules {
        let policy = cfg.policy_for(rule.name(), rule.enabled(), rule.severity());
        if !policy.enabled {
            continue;
        }
        severities.insert(rule.name(), policy.severity);
        rules_run.push(rule.name().to_string());

        if let Err(multi) = rule.check(&mut runner) {
            errors.extend(multi.into_errors().into_iter().map(|e| ToolError {
                rule: rule.name().to_string(),
                path: Some(e.path().clone()),
                message: e.detail(),
            }));
        }
    }

    let mut findings: Vec<Finding> = runner
        .emitted
        .into_iter()
        .map(|e| {
            let severity = severities.get(e.rule).copied().unwrap_or(Severity::Notice);
            to_finding(e, severity)
        })
        .collect();

    // Deterministic ordering before truncation.
    findings.sort_by(compare_findings);

    let total = findings.len() as u32;

    let mut emitted = findings;
    let mut truncated_reason: Option<String> = None;
    if emitted.len() > cfg.max_findings {
        emitted.truncate(cfg.max_findings);
        truncated_reason = Some(format!(
            "findings truncated to max_findings={}",
            cfg.max_findings
        ));
    }

    let verdict = compute_verdict(&emitted, cfg.fail_on);
    let counts = SeverityCounts::from_findings(&emitted);

    let data = TfguardData {
        profile: cfg.profile.clone(),
        files_scanned: model.files.len() as u32,
        blocks_scanned: model.blocks_scanned() as u32,
        rules_run,
        findings_total: total,
        findings_emitted: emitted.len() as u32,
        truncated_reason,
        errors,
    };

    DomainReport {
        verdict,
        findings: emitted,
        data,
        counts,
    }
}

fn to_finding(e: Emitted, severity: Severity) -> Finding {
    let Emitted { rule, link, issue } = e;
    let fingerprint =
        fingerprint_for_block(rule, issue.code, issue.range.path.as_str(), &issue.subject);
    Finding {
        severity,
        check_id: rule.to_string(),
        code: issue.code.to_string(),
        message: issue.message,
        location: Some(issue.range.to_location()),
        help: issue.help,
        url: Some(link),
        fingerprint: Some(fingerprint),
        data: issue.data,
    }
}

fn compute_verdict(findings: &[Finding], fail_on: FailOn) -> Verdict {
    let has_error = findings.iter().any(|f| f.severity == Severity::Error);
    if has_error {
        return Verdict::Fail;
    }

    let has_warn = findings.iter().any(|f| f.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => Verdict::Fail,
            FailOn::Error => Verdict::Warn,
        };
    }

    // Notices are advisory.
    Verdict::Pass
}

fn compare_findings(a: &Finding, b: &Finding) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) severity (error -> warning -> notice)
    // 2) location.path (missing last)
    // 3) location.line (missing last)
    // 4) check_id
    // 5) code
    // 6) message
    let severity_rank = |sev: Severity| match sev {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Notice => 2,
    };
    let (ap, al) = match &a.location {
        Some(l) => (l.path.as_str(), l.line.unwrap_or(u32::MAX)),
        None => ("~", u32::MAX),
    };
    let (bp, bl) = match &b.location {
        Some(l) => (l.path.as_str(), l.line.unwrap_or(u32::MAX)),
        None => ("~", u32::MAX),
    };

    severity_rank(a.severity)
        .cmp(&severity_rank(b.severity))
        .then(ap.cmp(bp))
        .then(al.cmp(&bl))
        .then(a.check_id.cmp(&b.check_id))
        .then(a.code.cmp(&b.code))
        .then(a.message.cmp(&b.message))
}
