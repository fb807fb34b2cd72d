use super::{Issue, Rule, Runner};
use crate::error::{CheckError, MultiError};
use crate::format::Formatter;
use crate::model::{Block, FileContent, SourceFile, SourceRange};
use serde_json::json;
use std::sync::Arc;
use tfguard_types::{RepoPath, Severity, ids};

const TRACKED_KIND: &str = "output";

/// Flags files whose `output` blocks are not sorted by name.
pub struct OutputOrderRule {
    formatter: Arc<dyn Formatter>,
}

/// The recommended order for one file's tracked blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderSuggestion {
    /// Header of the first tracked block in the file.
    pub anchor: SourceRange,
    pub declared: Vec<String>,
    pub expected: Vec<String>,
    /// The blocks in expected order, run through the formatter.
    pub formatted: String,
}

impl OrderSuggestion {
    pub fn message(&self) -> String {
        format!("Recommended output order:\n{}", self.formatted.trim_end())
    }
}

impl OutputOrderRule {
    pub fn new(formatter: Arc<dyn Formatter>) -> Self {
        Self { formatter }
    }

    /// Check one file. `Ok(None)` means its outputs are already in order.
    pub fn check_file(&self, file: &SourceFile) -> Result<Option<OrderSuggestion>, CheckError> {
        let (source, blocks) = match &file.content {
            FileContent::Parsed { source, blocks } => (source.as_str(), blocks.as_slice()),
            FileContent::Unavailable { reason } => {
                return Err(CheckError::Read {
                    path: file.path.clone(),
                    reason: reason.clone(),
                });
            }
        };

        let entries = collect_entries(&file.path, source, blocks, TRACKED_KIND)?;
        if entries.windows(2).all(|w| w[0].name <= w[1].name) {
            return Ok(None);
        }

        let declared: Vec<String> = entries.iter().map(|e| e.name.to_string()).collect();

        // Stable: entries sharing a name keep their relative order.
        let mut sorted: Vec<&Entry<'_>> = entries.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(b.name));

        let joined = sorted
            .iter()
            .map(|e| e.raw_text.trim_end())
            .collect::<Vec<_>>()
            .join("\n\n");
        let formatted = self
            .formatter
            .format(&joined)
            .map_err(|source| CheckError::Format {
                path: file.path.clone(),
                source,
            })?;

        Ok(Some(OrderSuggestion {
            anchor: entries[0].def_range.clone(),
            declared,
            expected: sorted.iter().map(|e| e.name.to_string()).collect(),
            formatted,
        }))
    }
}

impl Rule for OutputOrderRule {
    fn name(&self) -> &'static str {
        ids::RULE_TERRAFORM_OUTPUT_ORDER
    }

    fn enabled(&self) -> bool {
        false
    }

    fn severity(&self) -> Severity {
        Severity::Notice
    }

    fn check(&self, runner: &mut dyn Runner) -> Result<(), MultiError> {
        let mut suggestions = Vec::new();
        let mut errors = Vec::new();

        for (path, file) in runner.files() {
            if runner.is_ignored(self.name(), path) {
                continue;
            }
            match self.check_file(file) {
                Ok(Some(suggestion)) => suggestions.push(suggestion),
                Ok(None) => {}
                Err(err) => errors.push(err),
            }
        }

        for suggestion in suggestions {
            let issue = Issue {
                code: ids::CODE_UNSORTED_OUTPUTS,
                subject: suggestion.declared[0].clone(),
                message: suggestion.message(),
                help: Some(
                    "Reorder the output blocks by name; the message shows the full recommended order."
                        .to_string(),
                ),
                data: json!({
                    "file": suggestion.anchor.path.as_str(),
                    "declared": suggestion.declared,
                    "expected": suggestion.expected,
                }),
                range: suggestion.anchor,
            };
            runner.emit_issue(self, issue);
        }

        MultiError::from_errors(errors)
    }
}

/// One tracked block: its name, where it is, and its verbatim text.
struct Entry<'a> {
    name: &'a str,
    def_range: SourceRange,
    raw_text: &'a str,
}

fn collect_entries<'a>(
    path: &RepoPath,
    source: &'a str,
    blocks: &'a [Block],
    kind: &str,
) -> Result<Vec<Entry<'a>>, CheckError> {
    let mut out = Vec::new();
    for block in blocks.iter().filter(|b| b.kind == kind) {
        let Some(name) = block.name() else {
            return Err(CheckError::MissingLabel {
                path: path.clone(),
                kind: block.kind.clone(),
                line: block.def_range.start.line,
            });
        };
        let Some(raw_text) = block.range.slice(source) else {
            return Err(CheckError::Read {
                path: path.clone(),
                reason: format!(
                    "block `{} \"{}\"` spans bytes {:?} outside the file",
                    block.kind,
                    name,
                    block.range.bytes()
                ),
            });
        };
        out.push(Entry {
            name,
            def_range: block.def_range.clone(),
            raw_text,
        });
    }
    Ok(out)
}
