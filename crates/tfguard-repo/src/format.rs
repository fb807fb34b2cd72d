//! Canonical HCL layout for suggested text.
//!
//! Input must parse as an HCL body. The output uses two-space indentation per
//! nesting level, `key = value` spacing with `=` aligned across consecutive
//! single-line attributes, no trailing whitespace, and exactly one trailing
//! newline. Heredoc bodies, block comments and lines inside multi-line
//! templates are copied unchanged.

use tfguard_domain::{FormatError, Formatter};

const INDENT: &str = "  ";

/// The formatter tfguard injects into its rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct HclFormatter;

impl Formatter for HclFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        hcl_edit::parser::parse_body(source).map_err(|e| FormatError::new(e.to_string()))?;
        let out = render(&layout(source));
        hcl_edit::parser::parse_body(&out)
            .map_err(|e| FormatError::new(format!("formatted text does not parse: {e}")))?;
        Ok(out)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ctx {
    /// `{`, `[` or `(` in expression position.
    Group,
    /// Inside a quoted string or template.
    Str,
    /// `${` or `%{` inside a template.
    Interp,
}

#[derive(Debug, Default)]
struct Lexer {
    stack: Vec<Ctx>,
    block_comment: bool,
    heredoc: Option<String>,
}

impl Lexer {
    fn depth(&self) -> usize {
        self.stack.iter().filter(|c| **c == Ctx::Group).count()
    }

    /// Whether the next line has to be copied as-is.
    fn verbatim(&self) -> bool {
        self.block_comment || self.heredoc.is_some() || self.stack.iter().any(|c| *c != Ctx::Group)
    }

    fn in_code(&self) -> bool {
        !matches!(self.stack.last(), Some(Ctx::Str))
    }

    /// Track heredoc terminators for a line copied verbatim.
    fn end_heredoc(&mut self, line: &str) -> bool {
        match &self.heredoc {
            Some(marker) if line.trim() == marker => {
                self.heredoc = None;
                true
            }
            Some(_) => true,
            None => false,
        }
    }

    fn scan(&mut self, line: &str) {
        let bytes = line.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if self.block_comment {
                if bytes[i..].starts_with(b"*/") {
                    self.block_comment = false;
                    i += 2;
                } else {
                    i += 1;
                }
                continue;
            }

            if !self.in_code() {
                match bytes[i] {
                    b'\\' => i += 2,
                    b'"' => {
                        self.stack.pop();
                        i += 1;
                    }
                    b'$' | b'%' if bytes.get(i + 1) == Some(&bytes[i]) => i += 2,
                    b'$' | b'%' if bytes.get(i + 1) == Some(&b'{') => {
                        self.stack.push(Ctx::Interp);
                        i += 2;
                    }
                    _ => i += 1,
                }
                continue;
            }

            match bytes[i] {
                b'"' => self.stack.push(Ctx::Str),
                b'#' => return,
                b'/' if bytes.get(i + 1) == Some(&b'/') => return,
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    self.block_comment = true;
                    i += 2;
                    continue;
                }
                b'<' if bytes.get(i + 1) == Some(&b'<') => {
                    if let Some(marker) = heredoc_marker(&line[i + 2..]) {
                        self.heredoc = Some(marker.to_string());
                        return;
                    }
                }
                b'{' | b'[' | b'(' => self.stack.push(Ctx::Group),
                b'}' | b']' | b')' => {
                    if matches!(self.stack.last(), Some(Ctx::Group) | Some(Ctx::Interp)) {
                        self.stack.pop();
                    }
                }
                _ => {}
            }
            i += 1;
        }
    }
}

fn heredoc_marker(rest: &str) -> Option<&str> {
    let rest = rest.strip_prefix('-').unwrap_or(rest);
    let end = ident_len(rest);
    (end > 0).then(|| &rest[..end])
}

/// Byte length of the identifier at the start of `text`.
fn ident_len(text: &str) -> usize {
    text.char_indices()
        .find(|&(i, c)| !(c.is_ascii_alphabetic() || c == '_' || (i > 0 && (c.is_ascii_digit() || c == '-'))))
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

#[derive(Debug, PartialEq, Eq)]
enum Line {
    Blank,
    Verbatim(String),
    Code {
        depth: usize,
        text: String,
        /// `(key, value)` for an attribute whose expression ends on the same line.
        attr: Option<(String, String)>,
    },
}

fn layout(source: &str) -> Vec<Line> {
    let mut lexer = Lexer::default();
    let mut out = Vec::new();

    for raw in source.lines() {
        if lexer.verbatim() {
            if !lexer.end_heredoc(raw) {
                lexer.scan(raw);
            }
            out.push(Line::Verbatim(raw.to_string()));
            continue;
        }

        let text = raw.trim();
        if text.is_empty() {
            out.push(Line::Blank);
            continue;
        }

        let closers = text
            .bytes()
            .take_while(|b| matches!(b, b'}' | b']' | b')'))
            .count();
        let depth = lexer.depth().saturating_sub(closers);

        let before = lexer.stack.len();
        lexer.scan(text);
        let single_line = lexer.stack.len() == before && !lexer.verbatim();

        let attr = split_attribute(text);
        let text = match &attr {
            Some((key, value)) => format!("{key} = {value}"),
            None => text.to_string(),
        };
        out.push(Line::Code {
            depth,
            text,
            attr: attr.filter(|_| single_line),
        });
    }

    out
}

/// Byte length of an attribute or object key at the start of `text`: an
/// identifier, or a quoted string without escapes or interpolation.
fn key_len(text: &str) -> usize {
    let Some(rest) = text.strip_prefix('"') else {
        return ident_len(text);
    };
    match rest.find(['"', '\\']) {
        Some(end) if rest[end..].starts_with('"') => {
            let inner = &rest[..end];
            if inner.contains("${") || inner.contains("%{") {
                0
            } else {
                end + 2
            }
        }
        _ => 0,
    }
}

/// Split `key = value`. `==` and the `=>` of `for` expressions are not attributes.
fn split_attribute(text: &str) -> Option<(String, String)> {
    let key_len = key_len(text);
    if key_len == 0 || key_len == text.len() {
        return None;
    }
    let (key, rest) = text.split_at(key_len);
    let value = rest.trim_start().strip_prefix('=')?;
    if value.starts_with(['=', '>']) {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

fn render(lines: &[Line]) -> String {
    let mut rendered: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        match &lines[i] {
            Line::Blank => {
                rendered.push(String::new());
                i += 1;
            }
            Line::Verbatim(text) => {
                rendered.push(text.clone());
                i += 1;
            }
            Line::Code {
                depth,
                attr: Some(_),
                ..
            } => {
                let run: Vec<(&str, &str)> = lines[i..]
                    .iter()
                    .map_while(|l| match l {
                        Line::Code {
                            depth: d,
                            attr: Some((k, v)),
                            ..
                        } if d == depth => Some((k.as_str(), v.as_str())),
                        _ => None,
                    })
                    .collect();
                let width = run.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
                let indent = INDENT.repeat(*depth);
                for (key, value) in &run {
                    rendered.push(format!("{indent}{key:<width$} = {value}").trim_end().to_string());
                }
                i += run.len();
            }
            Line::Code { depth, text, .. } => {
                rendered.push(format!("{}{}", INDENT.repeat(*depth), text));
                i += 1;
            }
        }
    }

    let first = rendered.iter().position(|l| !l.trim().is_empty());
    let last = rendered.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => {
            let mut out = rendered[first..=last].join("\n");
            out.push('\n');
            out
        }
        _ => String::new(),
    }
}
