//! GCC-style compiler diagnostic parsing and rendering.
//!
//! Compiler stderr is split into paragraphs: a paragraph starts at any line
//! beginning with a word character or `/`, and every indented line after it
//! (source excerpts, carets, notes) belongs to it. Each paragraph is then
//! read as `file:line:column:type:message`.
//!
//! Parsing is best effort. Paragraphs that do not have that shape, such as
//! `foo.c: In function 'main':` or `1 error generated.`, come back as
//! [`RawDiagnosticFragment`]s instead of records.

use std::sync::LazyLock;

use colored::Colorize;
use regex::Regex;
use serde::Serialize;

static PARAGRAPH_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[\w/]").expect("paragraph pattern is valid"));

/// One compiler-reported error or warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticRecord {
    pub file: String,
    pub line: u32,
    pub column: u32,
    /// Severity label as printed by the compiler (`error`, `warning`, `note`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Message text, including any continuation lines
    pub message: String,
}

/// A paragraph that could not be read as a diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawDiagnosticFragment {
    pub text: String,
}

/// A parsed stderr paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParsedDiagnostic {
    Record(DiagnosticRecord),
    Fragment(RawDiagnosticFragment),
}

impl ParsedDiagnostic {
    pub fn as_record(&self) -> Option<&DiagnosticRecord> {
        match self {
            ParsedDiagnostic::Record(record) => Some(record),
            ParsedDiagnostic::Fragment(_) => None,
        }
    }
}

/// Split raw compiler stderr into parsed paragraphs, in input order.
///
/// Text before the first paragraph start is dropped.
pub fn parse_errors(stderr: &str) -> Vec<ParsedDiagnostic> {
    let starts: Vec<usize> = PARAGRAPH_START.find_iter(stderr).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(stderr.len());
            parse_paragraph(&stderr[start..end])
        })
        .collect()
}

/// Only the well-formed records of `stderr`.
pub fn parse_records(stderr: &str) -> Vec<DiagnosticRecord> {
    parse_errors(stderr)
        .into_iter()
        .filter_map(|d| match d {
            ParsedDiagnostic::Record(record) => Some(record),
            ParsedDiagnostic::Fragment(_) => None,
        })
        .collect()
}

fn parse_paragraph(paragraph: &str) -> ParsedDiagnostic {
    let text = paragraph.strip_suffix('\n').unwrap_or(paragraph);
    let fragment = || {
        ParsedDiagnostic::Fragment(RawDiagnosticFragment {
            text: text.to_string(),
        })
    };

    // The message is the fifth field only; anything after a further colon
    // (`std::vector`, `note: ...`) is cut off.
    let fields: Vec<&str> = text.split(':').map(str::trim).collect();
    let [file, line, column, kind, message, ..] = fields[..] else {
        return fragment();
    };

    match (line.parse::<u32>(), column.parse::<u32>()) {
        (Ok(line), Ok(column)) => ParsedDiagnostic::Record(DiagnosticRecord {
            file: file.to_string(),
            line,
            column,
            kind: kind.to_string(),
            message: message.to_string(),
        }),
        _ => fragment(),
    }
}

impl DiagnosticRecord {
    /// Render as `<type> <file> line <line>` followed by the indented message.
    ///
    /// The last character of the message is treated as the caret and gets
    /// its own highlight.
    pub fn render(&self, color: bool) -> String {
        let mut message = self.message.clone();
        let caret = message.pop().map(String::from).unwrap_or_default();

        if color {
            format!(
                "{} {}{}{}\n {}{}",
                self.kind.as_str().red().bold(),
                self.file.as_str().green().bold(),
                " line ".cyan().bold(),
                self.line.to_string().bold(),
                message.as_str().white(),
                caret.as_str().red().bold()
            )
        } else {
            format!(
                "{} {} line {}\n {}{}",
                self.kind, self.file, self.line, message, caret
            )
        }
    }
}

/// Parse `stderr` and render every record, one block per record.
///
/// Blocks are separated by a single newline with none after the last.
/// Fragments are skipped.
pub fn format_errors(stderr: &str, color: bool) -> String {
    parse_records(stderr)
        .iter()
        .map(|record| record.render(color))
        .collect::<Vec<_>>()
        .join("\n")
}
