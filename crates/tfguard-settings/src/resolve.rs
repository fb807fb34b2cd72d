use crate::{model::TfguardConfigV1, presets};
use anyhow::Context;
use globset::Glob;
use tfguard_domain::policy::{EffectiveConfig, FailOn, RuleOverride};
use tfguard_types::{Severity, explain};

/// Command-line values that win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub max_findings: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: TfguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "default".to_string());

    let mut effective = presets::preset(&profile).with_context(|| {
        format!(
            "unknown profile: {profile} (expected {})",
            presets::PROFILES.join("|")
        )
    })?;

    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }

    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    validate_globs("ignore", &cfg.ignore)?;
    effective.ignore = cfg.ignore;

    // per-rule overrides
    for (rule_name, rc) in cfg.rules {
        if !explain::all_rule_names().contains(&rule_name.as_str()) {
            anyhow::bail!(
                "unknown rule in config: {rule_name} (known: {})",
                explain::all_rule_names().join(", ")
            );
        }

        let severity = match rc.severity.as_deref() {
            Some(sev) => Some(
                parse_severity(sev).with_context(|| format!("invalid severity for {rule_name}"))?,
            ),
            None => None,
        };
        validate_globs(&format!("rules.{rule_name}.ignore"), &rc.ignore)?;

        effective.rules.insert(
            rule_name,
            RuleOverride {
                enabled: rc.enabled,
                severity,
                ignore: rc.ignore,
            },
        );
    }

    Ok(ResolvedConfig { effective })
}

fn validate_globs(field: &str, patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid glob in {field}: {pattern}"))?;
    }
    Ok(())
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "notice" => Ok(Severity::Notice),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected notice|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RuleConfig;
    use tfguard_types::ids;

    fn with_rule(rc: RuleConfig) -> TfguardConfigV1 {
        let mut cfg = TfguardConfigV1::default();
        cfg.rules
            .insert(ids::RULE_TERRAFORM_OUTPUT_ORDER.to_string(), rc);
        cfg
    }

    #[test]
    fn defaults_resolve_to_default_profile() {
        let resolved = resolve_config(TfguardConfigV1::default(), Overrides::default())
            .expect("resolve");
        let eff = resolved.effective;
        assert_eq!(eff.profile, "default");
        assert_eq!(eff.fail_on, FailOn::Error);
        assert_eq!(eff.max_findings, 200);
        assert!(!eff.enable_all);
        assert!(eff.rules.is_empty());
    }

    #[test]
    fn all_profile_enables_opt_in_rules() {
        let cfg = TfguardConfigV1 {
            profile: Some("all".to_string()),
            ..TfguardConfigV1::default()
        };
        let eff = resolve_config(cfg, Overrides::default()).expect("resolve").effective;
        assert!(eff.enable_all);
        let policy = eff.policy_for(ids::RULE_TERRAFORM_OUTPUT_ORDER, false, Severity::Notice);
        assert!(policy.enabled);
    }

    #[test]
    fn overrides_win_over_config() {
        let cfg = TfguardConfigV1 {
            profile: Some("default".to_string()),
            max_findings: Some(5),
            ..TfguardConfigV1::default()
        };
        let eff = resolve_config(
            cfg,
            Overrides {
                profile: Some("all".to_string()),
                max_findings: Some(1),
            },
        )
        .expect("resolve")
        .effective;
        assert_eq!(eff.profile, "all");
        assert_eq!(eff.max_findings, 1);
    }

    #[test]
    fn rule_table_becomes_override() {
        let cfg = with_rule(RuleConfig {
            enabled: Some(true),
            severity: Some("warn".to_string()),
            ignore: vec!["legacy/**".to_string()],
        });
        let eff = resolve_config(cfg, Overrides::default()).expect("resolve").effective;
        let policy = eff.policy_for(ids::RULE_TERRAFORM_OUTPUT_ORDER, false, Severity::Notice);
        assert!(policy.enabled);
        assert_eq!(policy.severity, Severity::Warning);
        assert_eq!(policy.ignore, vec!["legacy/**"]);
    }

    #[test]
    fn unknown_profile_is_rejected() {
        let cfg = TfguardConfigV1 {
            profile: Some("strict".to_string()),
            ..TfguardConfigV1::default()
        };
        let err = resolve_config(cfg, Overrides::default()).expect_err("unknown profile");
        assert!(err.to_string().contains("unknown profile: strict"));
    }

    #[test]
    fn unknown_rule_is_rejected() {
        let mut cfg = TfguardConfigV1::default();
        cfg.rules
            .insert("terraform_variable_order".to_string(), RuleConfig::default());
        let err = resolve_config(cfg, Overrides::default()).expect_err("unknown rule");
        assert!(err.to_string().contains("terraform_variable_order"));
    }

    #[test]
    fn invalid_severity_and_fail_on_are_rejected() {
        let cfg = with_rule(RuleConfig {
            severity: Some("info".to_string()),
            ..RuleConfig::default()
        });
        assert!(resolve_config(cfg, Overrides::default()).is_err());

        let cfg = TfguardConfigV1 {
            fail_on: Some("never".to_string()),
            ..TfguardConfigV1::default()
        };
        assert!(resolve_config(cfg, Overrides::default()).is_err());
    }

    #[test]
    fn invalid_globs_are_rejected() {
        let cfg = TfguardConfigV1 {
            ignore: vec!["[".to_string()],
            ..TfguardConfigV1::default()
        };
        let err = resolve_config(cfg, Overrides::default()).expect_err("bad glob");
        assert!(err.to_string().contains("invalid glob in ignore"));

        let cfg = with_rule(RuleConfig {
            ignore: vec!["{a".to_string()],
            ..RuleConfig::default()
        });
        assert!(resolve_config(cfg, Overrides::default()).is_err());
    }
}
