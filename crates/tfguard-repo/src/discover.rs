use camino::{Utf8Path, Utf8PathBuf};
use std::path::PathBuf;
use tfguard_types::RepoPath;
use walkdir::{DirEntry, WalkDir};

const CONFIG_EXTENSION: &str = "tf";

/// Discover Terraform configuration files under `repo_root`.
///
/// Behavior:
/// - Collects every `*.tf` file, recursively.
/// - Skips `.terraform/` (provider and module caches) and any other hidden directory.
/// - Returns repo-relative paths in sorted order.
pub fn discover_config_files(repo_root: &Utf8Path) -> anyhow::Result<Vec<RepoPath>> {
    if !repo_root.is_dir() {
        anyhow::bail!("{repo_root} is not a directory");
    }

    let mut out: Vec<RepoPath> = WalkDir::new(repo_root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| pathbuf_to_utf8(e.path().to_path_buf()))
        .filter(|abs| abs.extension() == Some(CONFIG_EXTENSION))
        .map(|abs| RepoPath::relative_to(repo_root, &abs))
        .collect();

    // Stable order.
    out.sort();
    out.dedup();

    Ok(out)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
