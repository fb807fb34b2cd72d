//! Config parsing and profile resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{RuleConfig, TfguardConfigV1};
pub use resolve::{Overrides, ResolvedConfig};

/// Conventional config file name, looked up in the module root.
pub const CONFIG_FILE_NAME: &str = "tfguard.toml";

/// Parse `tfguard.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<TfguardConfigV1> {
    let cfg: TfguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profile + overrides + per-rule config).
pub fn resolve_config(
    cfg: TfguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
