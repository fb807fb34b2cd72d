//! Stable DTOs and IDs used across the tfguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable rule names and finding codes
//! - canonical repo-relative path handling
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod path;
pub mod receipt;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use path::RepoPath;
pub use receipt::{
    Finding, Location, ReportEnvelope, SCHEMA_REPORT_V1, Severity, TfguardData, TfguardReport,
    ToolError, ToolMeta, Verdict,
};
