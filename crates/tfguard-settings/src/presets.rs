use tfguard_domain::policy::{EffectiveConfig, FailOn};

pub const PROFILES: &[&str] = &["default", "all"];

/// Preset profiles. `None` for an unknown name.
pub fn preset(profile: &str) -> Option<EffectiveConfig> {
    match profile {
        "default" => Some(base("default", false)),
        // Opt-in rules such as terraform_output_order run too.
        "all" => Some(base("all", true)),
        _ => None,
    }
}

fn base(name: &str, enable_all: bool) -> EffectiveConfig {
    EffectiveConfig {
        profile: name.to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        enable_all,
        ..EffectiveConfig::default()
    }
}
