use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::BTreeMap;
use tfguard_types::{RepoPath, Severity};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

/// Per-rule settings from config; unset fields fall back to the rule's defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleOverride {
    pub enabled: Option<bool>,
    pub severity: Option<Severity>,
    /// Glob patterns of files this rule skips.
    pub ignore: Vec<String>,
}

/// The resolved policy a rule runs with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RulePolicy {
    pub enabled: bool,
    pub severity: Severity,
    pub ignore: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub fail_on: FailOn,
    pub max_findings: usize,
    /// Turn on every rule, including the ones that are opt-in.
    pub enable_all: bool,
    /// Glob patterns of files no rule looks at.
    pub ignore: Vec<String>,
    pub rules: BTreeMap<String, RuleOverride>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
            fail_on: FailOn::Error,
            max_findings: 200,
            enable_all: false,
            ignore: Vec::new(),
            rules: BTreeMap::new(),
        }
    }
}

impl EffectiveConfig {
    pub fn policy_for(
        &self,
        rule_name: &str,
        default_enabled: bool,
        default_severity: Severity,
    ) -> RulePolicy {
        let over = self.rules.get(rule_name);
        RulePolicy {
            enabled: over
                .and_then(|o| o.enabled)
                .unwrap_or(self.enable_all || default_enabled),
            severity: over.and_then(|o| o.severity).unwrap_or(default_severity),
            ignore: over.map(|o| o.ignore.clone()).unwrap_or_default(),
        }
    }
}

/// Compiled global + per-rule ignore globs.
#[derive(Clone, Debug, Default)]
pub struct IgnoreMatcher {
    global: Option<GlobSet>,
    per_rule: BTreeMap<String, GlobSet>,
}

impl IgnoreMatcher {
    pub fn new(cfg: &EffectiveConfig) -> Result<Self, globset::Error> {
        let mut per_rule = BTreeMap::new();
        for (name, over) in &cfg.rules {
            if let Some(set) = build_globset(&over.ignore)? {
                per_rule.insert(name.clone(), set);
            }
        }
        Ok(Self {
            global: build_globset(&cfg.ignore)?,
            per_rule,
        })
    }

    pub fn is_ignored(&self, rule_name: &str, path: &RepoPath) -> bool {
        let hit = |set: &GlobSet| set.is_match(path.as_str());
        self.global.as_ref().is_some_and(hit) || self.per_rule.get(rule_name).is_some_and(hit)
    }
}

fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, globset::Error> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    builder.build().map(Some)
}
