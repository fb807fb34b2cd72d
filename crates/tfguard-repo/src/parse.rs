use anyhow::Context;
use hcl_edit::Span;
use hcl_edit::structure::{Block as HclBlock, BlockLabel};
use std::ops::Range;
use tfguard_domain::model::{Block, Pos, SourceFile, SourceRange};
use tfguard_types::RepoPath;

/// Byte offsets of line starts, for turning spans into 1-based line/column positions.
struct LineIndex<'a> {
    source: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(source: &'a str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { source, starts }
    }

    fn pos(&self, byte: usize) -> Pos {
        let byte = byte.min(self.source.len());
        // Index of the last line start <= byte.
        let line = self.starts.partition_point(|&s| s <= byte) - 1;
        let line_start = self.starts[line];
        let column = self
            .source
            .get(line_start..byte)
            .map(|s| s.chars().count())
            .unwrap_or(byte - line_start);
        Pos {
            line: (line + 1) as u32,
            column: (column + 1) as u32,
            byte,
        }
    }

    fn range(&self, path: &RepoPath, bytes: Range<usize>) -> SourceRange {
        SourceRange {
            path: path.clone(),
            start: self.pos(bytes.start),
            end: self.pos(bytes.end),
        }
    }
}

/// Parse one Terraform file into its top-level blocks.
pub fn parse_config_file(path: &RepoPath, text: &str) -> anyhow::Result<SourceFile> {
    let body = hcl_edit::parser::parse_body(text).with_context(|| format!("parse {path}"))?;
    let index = LineIndex::new(text);

    let mut blocks = Vec::new();
    for block in body.blocks() {
        blocks.push(convert_block(path, text, &index, block)?);
    }

    Ok(SourceFile::parsed(path.clone(), text.to_string(), blocks))
}

fn convert_block(
    path: &RepoPath,
    text: &str,
    index: &LineIndex<'_>,
    block: &HclBlock,
) -> anyhow::Result<Block> {
    let kind = block.ident.value().as_str().to_string();
    let span = block
        .span()
        .with_context(|| format!("{path}: `{kind}` block has no source span"))?;
    let ident_span = block.ident.span().unwrap_or(span.start..span.start);

    let header_end = block
        .labels
        .last()
        .and_then(|label| label_span(text, label))
        .map(|s| s.end)
        .unwrap_or(ident_span.end);

    Ok(Block {
        labels: block.labels.iter().map(label_text).collect(),
        range: index.range(path, span.clone()),
        def_range: index.range(path, span.start..header_end),
        kind,
    })
}

fn label_text(label: &BlockLabel) -> String {
    match label {
        BlockLabel::String(s) => s.value().to_string(),
        BlockLabel::Ident(ident) => ident.value().as_str().to_string(),
    }
}

fn label_span(text: &str, label: &BlockLabel) -> Option<Range<usize>> {
    match label {
        BlockLabel::Ident(ident) => ident.span(),
        BlockLabel::String(s) => {
            let mut span = s.span()?;
            // Take in the closing quote when the span stops at the literal's content.
            if text.as_bytes().get(span.end) == Some(&b'"') {
                span.end += 1;
            }
            Some(span)
        }
    }
}
