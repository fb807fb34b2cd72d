use std::collections::BTreeMap;
use std::ops::Range;
use tfguard_types::{Location, RepoPath};

/// All Terraform files in scope, keyed by repo-relative path.
#[derive(Clone, Debug, Default)]
pub struct ModuleModel {
    pub root: RepoPath,
    pub files: BTreeMap<RepoPath, SourceFile>,
}

impl ModuleModel {
    pub fn insert(&mut self, file: SourceFile) {
        self.files.insert(file.path.clone(), file);
    }

    pub fn blocks_scanned(&self) -> usize {
        self.files.values().map(|f| f.blocks().len()).sum()
    }
}

#[derive(Clone, Debug)]
pub struct SourceFile {
    pub path: RepoPath,
    pub content: FileContent,
}

#[derive(Clone, Debug)]
pub enum FileContent {
    /// Raw text plus its top-level blocks in declaration order.
    Parsed { source: String, blocks: Vec<Block> },
    /// The host could not read or parse the file.
    Unavailable { reason: String },
}

impl SourceFile {
    pub fn parsed(path: RepoPath, source: String, blocks: Vec<Block>) -> Self {
        Self {
            path,
            content: FileContent::Parsed { source, blocks },
        }
    }

    pub fn unavailable(path: RepoPath, reason: impl Into<String>) -> Self {
        Self {
            path,
            content: FileContent::Unavailable {
                reason: reason.into(),
            },
        }
    }

    /// Top-level blocks; empty when the file is unavailable.
    pub fn blocks(&self) -> &[Block] {
        match &self.content {
            FileContent::Parsed { blocks, .. } => blocks,
            FileContent::Unavailable { .. } => &[],
        }
    }
}

/// A top-level block such as `output "vpc_id" { ... }`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Block type identifier (`output`, `variable`, `resource`, ...).
    pub kind: String,
    pub labels: Vec<String>,
    /// From the type keyword through the closing brace.
    pub range: SourceRange,
    /// The block header: type keyword and labels.
    pub def_range: SourceRange,
}

impl Block {
    pub fn name(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }
}

/// 1-based line and column plus the 0-based byte offset of a position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
    pub byte: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceRange {
    pub path: RepoPath,
    pub start: Pos,
    pub end: Pos,
}

impl SourceRange {
    pub fn bytes(&self) -> Range<usize> {
        self.start.byte..self.end.byte
    }

    /// Slice the range out of `source`; `None` if it is out of bounds or splits a character.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.bytes())
    }

    pub fn to_location(&self) -> Location {
        Location {
            path: self.path.clone(),
            line: Some(self.start.line),
            col: Some(self.start.column),
            end_line: Some(self.end.line),
            end_col: Some(self.end.column),
        }
    }
}
