use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a block-level finding.
///
/// Identity fields:
/// - rule name
/// - code
/// - file path (repo-relative)
/// - name of the anchoring block
pub fn fingerprint_for_block(rule: &str, code: &str, file_path: &str, block_name: &str) -> String {
    let canonical = [rule, code, file_path, block_name].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}
