//! Comment-aware line parser.
//!
//! Splits raw text into [`LogicalUnit`]s: a run of `#` comment lines plus the
//! one content line they sit on top of. Comments only ever attach forward, so
//! a comment run with no content line after it (typically at the very end of
//! a document) belongs to nothing and is dropped.
//!
//! # Quoted spans
//!
//! Inline `#` comments and list commas are only significant outside quoted
//! spans. A `'` or `"` opens a span when it starts a token (it is the first
//! non-blank character, or the previous non-blank character is `=` or `,`)
//! and the same quote character appears again later on the line; the span
//! runs to that next occurrence. Apostrophes inside words (`John's`) never
//! open a span.

use crate::error::{Result, Utf8ConfigError};

/// A leading comment block plus exactly one content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalUnit {
    /// The raw comment lines, still carrying their `#` markers.
    pub comments: Vec<String>,
    /// The content line, with leading indentation removed.
    pub content: String,
    /// 1-based line number of `content` in the parsed text.
    pub line: usize,
}

impl LogicalUnit {
    /// The comment block as newline-joined text, markers stripped.
    pub fn upper_comment(&self) -> Result<String> {
        let lines = self
            .comments
            .iter()
            .map(|line| extract_comment(line))
            .collect::<Result<Vec<_>>>()?;
        Ok(lines.join("\n"))
    }

    /// Whether the content line is a `[section]` header.
    pub fn is_header(&self) -> bool {
        self.content.starts_with('[')
    }
}

fn is_comment_line(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Strip the leading `#` markers and surrounding whitespace from a comment line.
///
/// ```
/// use utf8config::parser::extract_comment;
/// assert_eq!(extract_comment("###  This is comment ").unwrap(), "This is comment");
/// ```
pub fn extract_comment(line: &str) -> Result<String> {
    let trimmed = line.trim();
    if !trimmed.starts_with('#') {
        return Err(Utf8ConfigError::format(
            0,
            format!("not a comment line: {:?}", line),
        ));
    }
    Ok(trimmed.trim_start_matches('#').trim().to_string())
}

/// Split a content line into `(content, side_comment)` at the first `#`
/// outside a quoted span. The content is returned as-is; the side comment is
/// trimmed. Without a `#`, the side comment is empty.
pub fn split_inline_comment(line: &str) -> (&str, &str) {
    match find_unquoted(line, '#').first() {
        Some(&pos) => (&line[..pos], line[pos + 1..].trim()),
        None => (line, ""),
    }
}

/// Group raw text into logical units. Blank lines only separate; they never
/// detach a comment block from the content line below it.
pub fn group_into_units(text: &str) -> Vec<LogicalUnit> {
    let mut units = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        if is_comment_line(raw) {
            pending.push(raw.trim().to_string());
            continue;
        }
        units.push(LogicalUnit {
            comments: std::mem::take(&mut pending),
            content: raw.trim_start().to_string(),
            line: idx + 1,
        });
    }

    units
}

/// Byte offsets of every `target` in `text` that lies outside a quoted span.
pub(crate) fn find_unquoted(text: &str, target: char) -> Vec<usize> {
    let mut hits = Vec::new();
    let mut open: Option<char> = None;
    let mut prev: Option<char> = None;

    for (i, c) in text.char_indices() {
        if let Some(q) = open {
            if c == q {
                open = None;
                prev = Some(c);
            }
            continue;
        }
        if c == target {
            hits.push(i);
        } else if (c == '\'' || c == '"')
            && matches!(prev, None | Some('=') | Some(','))
            && text[i + 1..].contains(c)
        {
            open = Some(c);
        }
        if !c.is_whitespace() {
            prev = Some(c);
        }
    }

    hits
}

/// If `text` is one quoted token (`'...'` or `"..."` with no inner copy of
/// the quote character), return the text between the quotes.
pub(crate) fn unquote(text: &str) -> Option<&str> {
    let q = text.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let rest = &text[1..];
    let close = rest.find(q)?;
    if close + 1 == rest.len() {
        Some(&rest[..close])
    } else {
        None
    }
}
