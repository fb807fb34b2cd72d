//! Repository adapters: discover Terraform files, read and parse them, and format HCL.
//!
//! This crate is allowed to do filesystem IO. Rules never see the filesystem; they
//! get the [`ModuleModel`] built here.

#![forbid(unsafe_code)]

mod discover;
mod format;
mod parse;

use camino::Utf8Path;
use rayon::prelude::*;
use tfguard_domain::model::{ModuleModel, SourceFile};
use tfguard_types::RepoPath;

pub use discover::discover_config_files;
pub use format::HclFormatter;
pub use parse::parse_config_file;

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;
    use tfguard_domain::Formatter;

    /// Parse arbitrary text as a Terraform file.
    ///
    /// Returns the number of top-level blocks on valid HCL, `Err(...)` otherwise.
    /// **Never panics** on any input.
    pub fn parse_config(text: &str) -> anyhow::Result<usize> {
        let file = parse::parse_config_file(&RepoPath::new("fuzz.tf"), text)?;
        Ok(file.blocks().len())
    }

    /// Run arbitrary text through the canonical formatter.
    ///
    /// **Never panics** on any input.
    pub fn format_config(text: &str) -> anyhow::Result<String> {
        Ok(HclFormatter.format(text)?)
    }
}

/// Build the in-memory module model the rule engine runs on.
///
/// Files that cannot be read or parsed stay in the model as unavailable; rules
/// report them per file instead of the whole run failing.
pub fn build_module_model(repo_root: &Utf8Path) -> anyhow::Result<ModuleModel> {
    let paths = discover::discover_config_files(repo_root)?;

    let files: Vec<SourceFile> = paths
        .into_par_iter()
        .map(|path| load_file(repo_root, path))
        .collect();

    let mut model = ModuleModel {
        root: RepoPath::from(repo_root),
        ..ModuleModel::default()
    };
    for file in files {
        model.insert(file);
    }
    Ok(model)
}

fn load_file(repo_root: &Utf8Path, path: RepoPath) -> SourceFile {
    let abs = repo_root.join(path.as_str());
    let text = match std::fs::read_to_string(&abs) {
        Ok(text) => text,
        Err(err) => return SourceFile::unavailable(path, format!("read {abs}: {err}")),
    };
    match parse::parse_config_file(&path, &text) {
        Ok(file) => file,
        Err(err) => SourceFile::unavailable(path, format!("{err:#}")),
    }
}
