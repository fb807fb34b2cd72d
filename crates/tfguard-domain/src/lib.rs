//! Pure rule evaluation (no IO).
//!
//! Input: a module model of parsed Terraform files, constructed elsewhere.
//! Output: findings + verdict + summary data, plus any per-file tool errors.

#![forbid(unsafe_code)]

pub mod error;
pub mod format;
pub mod model;
pub mod policy;
pub mod report;
pub mod rules;

mod engine;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::evaluate;
pub use error::{CheckError, FormatError, MultiError};
pub use format::Formatter;
pub use rules::{Issue, Rule, Runner, all_rules};
