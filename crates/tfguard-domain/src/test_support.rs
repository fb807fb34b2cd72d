use crate::error::FormatError;
use crate::format::Formatter;
use crate::model::{Block, ModuleModel, Pos, SourceFile, SourceRange};
use crate::policy::{EffectiveConfig, RuleOverride};
use crate::rules::{Issue, Rule, Runner};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tfguard_types::{RepoPath, Severity};

/// Builds a source file the way a parser would see it, block by block.
pub struct FileBuilder {
    path: RepoPath,
    source: String,
    blocks: Vec<Block>,
}

impl FileBuilder {
    pub fn new(path: &str) -> Self {
        Self {
            path: RepoPath::new(path),
            source: String::new(),
            blocks: Vec::new(),
        }
    }

    /// Append `kind "label"... { body }` followed by a blank line.
    pub fn block(mut self, kind: &str, labels: &[&str], body: &str) -> Self {
        let start = self.source.len();
        self.source.push_str(kind);
        for label in labels {
            self.source.push_str(&format!(" \"{label}\""));
        }
        let def_end = self.source.len();
        self.source.push_str(" {\n");
        for line in body.lines() {
            self.source.push_str("  ");
            self.source.push_str(line);
            self.source.push('\n');
        }
        self.source.push('}');
        let end = self.source.len();
        self.source.push_str("\n\n");

        let range = |from: usize, to: usize, src: &str, path: &RepoPath| SourceRange {
            path: path.clone(),
            start: pos_at(src, from),
            end: pos_at(src, to),
        };
        self.blocks.push(Block {
            kind: kind.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            range: range(start, end, &self.source, &self.path),
            def_range: range(start, def_end, &self.source, &self.path),
        });
        self
    }

    pub fn output(self, name: &str) -> Self {
        let body = format!("value = \"{name}\"");
        self.block("output", &[name], &body)
    }

    pub fn build(self) -> SourceFile {
        SourceFile::parsed(self.path, self.source, self.blocks)
    }
}

pub fn pos_at(source: &str, byte: usize) -> Pos {
    let before = &source[..byte];
    let line = before.matches('\n').count() as u32 + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    Pos {
        line,
        column: (byte - line_start) as u32 + 1,
        byte,
    }
}

pub fn outputs_file(path: &str, names: &[&str]) -> SourceFile {
    names
        .iter()
        .fold(FileBuilder::new(path), |b, n| b.output(n))
        .build()
}

pub fn model(files: Vec<SourceFile>) -> ModuleModel {
    let mut m = ModuleModel::default();
    for f in files {
        m.insert(f);
    }
    m
}

/// Appends a newline and otherwise leaves the text alone.
pub fn passthrough_formatter() -> Arc<dyn Formatter> {
    Arc::new(|source: &str| -> Result<String, FormatError> { Ok(format!("{source}\n")) })
}

pub fn rejecting_formatter() -> Arc<dyn Formatter> {
    Arc::new(|_: &str| -> Result<String, FormatError> {
        Err(FormatError::new("unexpected end of input"))
    })
}

/// Names of every `kind "name"` header at the start of a line.
pub fn header_names(text: &str, kind: &str) -> Vec<String> {
    let prefix = format!("{kind} \"");
    text.lines()
        .filter_map(|line| line.strip_prefix(prefix.as_str()))
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}

pub fn config_with_rule(rule_name: &str, severity: Severity) -> EffectiveConfig {
    let mut rules = BTreeMap::new();
    rules.insert(
        rule_name.to_string(),
        RuleOverride {
            enabled: Some(true),
            severity: Some(severity),
            ignore: Vec::new(),
        },
    );
    EffectiveConfig {
        profile: "test".to_string(),
        rules,
        ..EffectiveConfig::default()
    }
}

/// Minimal host that records what rules emit.
#[derive(Default)]
pub struct RecordingRunner {
    pub files: BTreeMap<RepoPath, SourceFile>,
    pub ignored: BTreeSet<String>,
    pub issues: Vec<(String, Issue)>,
}

impl RecordingRunner {
    pub fn new(files: Vec<SourceFile>) -> Self {
        Self {
            files: model(files).files,
            ..Self::default()
        }
    }
}

impl Runner for RecordingRunner {
    fn files(&self) -> &BTreeMap<RepoPath, SourceFile> {
        &self.files
    }

    fn is_ignored(&self, _rule_name: &str, path: &RepoPath) -> bool {
        self.ignored.contains(path.as_str())
    }

    fn emit_issue(&mut self, rule: &dyn Rule, issue: Issue) {
        self.issues.push((rule.name().to_string(), issue));
    }
}
