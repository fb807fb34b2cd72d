//! Rule capability, host seam, and the registry of built-in rules.

use crate::error::MultiError;
use crate::format::Formatter;
use crate::model::{SourceFile, SourceRange};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tfguard_types::{RepoPath, Severity, ids};

mod output_order;


pub use output_order::{OrderSuggestion, OutputOrderRule};

/// A lint rule.
///
/// Rules never mutate files. They read what the [`Runner`] hands them and report
/// back through [`Runner::emit_issue`].
pub trait Rule: Send + Sync {
    /// Stable identifier, used for enable/disable and ignore lists.
    fn name(&self) -> &'static str;

    /// Whether the rule runs without being enabled in config.
    fn enabled(&self) -> bool;

    fn severity(&self) -> Severity;

    fn link(&self) -> String {
        ids::reference_link(self.name())
    }

    /// Check every file the runner supplies. Errors for individual files are
    /// collected; a failing file never stops the remaining ones.
    fn check(&self, runner: &mut dyn Runner) -> Result<(), MultiError>;
}

/// The host a rule runs inside.
pub trait Runner {
    fn files(&self) -> &BTreeMap<RepoPath, SourceFile>;

    fn is_ignored(&self, rule_name: &str, path: &RepoPath) -> bool;

    fn emit_issue(&mut self, rule: &dyn Rule, issue: Issue);
}

/// What a rule reports. The host decides the final severity.
#[derive(Clone, Debug, PartialEq)]
pub struct Issue {
    pub code: &'static str,
    /// Name of the block the issue is anchored at.
    pub subject: String,
    pub message: String,
    pub range: SourceRange,
    pub help: Option<String>,
    pub data: Value,
}

/// Every built-in rule, in registration order.
pub fn all_rules(formatter: Arc<dyn Formatter>) -> Vec<Box<dyn Rule>> {
    vec![Box::new(OutputOrderRule::new(formatter))]
}
