//! A single `key = value` record and the comments attached to it.
//!
//! ```text
//! # A full name              <- upper comment (any number of lines)
//! # Has to be titlized
//! name = John # The boss     <- side comment (one line)
//! ```

use crate::codec::{decode, encode, encode_quoted};
use crate::error::{Result, Utf8ConfigError};
use crate::ordered::Named;
use crate::parser::{group_into_units, split_inline_comment, LogicalUnit};
use crate::value::Value;

/// Check that `key` is an identifier: a letter or `_`, then letters, digits
/// or `_`. Letters outside ASCII are accepted.
pub fn validate_key(key: &str) -> Result<()> {
    let mut chars = key.chars();
    let valid = match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(Utf8ConfigError::InvalidKey(key.to_string()))
    }
}

/// One key/value record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: String,
    value: Value,
    upper_comment: String,
    side_comment: String,
}

impl Field {
    /// Create a field without comments. Fails if `key` is not an identifier.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Self {
            key,
            value: value.into(),
            upper_comment: String::new(),
            side_comment: String::new(),
        })
    }

    pub fn with_upper_comment(mut self, comment: impl Into<String>) -> Self {
        self.upper_comment = comment.into();
        self
    }

    pub fn with_side_comment(mut self, comment: impl Into<String>) -> Self {
        self.side_comment = comment.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Comment lines above the field, joined with `\n`. Empty when absent.
    pub fn upper_comment(&self) -> &str {
        &self.upper_comment
    }

    /// Inline comment after the value. Empty when absent.
    pub fn side_comment(&self) -> &str {
        &self.side_comment
    }

    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    pub fn set_upper_comment(&mut self, comment: impl Into<String>) {
        self.upper_comment = comment.into();
    }

    pub fn set_side_comment(&mut self, comment: impl Into<String>) {
        self.side_comment = comment.into();
    }

    /// Parse a field from text holding exactly one content line, optionally
    /// preceded by comment lines.
    pub fn load(text: &str) -> Result<Self> {
        let mut units = group_into_units(text);
        match units.len() {
            1 => Self::from_unit(&units.remove(0)),
            0 => Err(Utf8ConfigError::format(0, "no field found")),
            _ => Err(Utf8ConfigError::format(
                units[1].line,
                "expected a single field",
            )),
        }
    }

    pub(crate) fn from_unit(unit: &LogicalUnit) -> Result<Self> {
        let (lhs, rhs) = unit
            .content
            .split_once('=')
            .ok_or_else(|| Utf8ConfigError::format(unit.line, "missing '=' in field line"))?;

        let key = lhs.trim();
        validate_key(key)?;

        let (raw, side_comment) = split_inline_comment(rhs);
        let commented = raw.len() < rhs.len();
        // The single space on either side of the value is layout, not data.
        let raw = raw.strip_prefix(' ').unwrap_or(raw);
        let raw = if commented {
            raw.strip_suffix(' ').unwrap_or(raw)
        } else {
            raw
        };

        Ok(Self {
            key: key.to_string(),
            value: decode(raw, true)?,
            upper_comment: unit.upper_comment()?,
            side_comment: side_comment.to_string(),
        })
    }

    /// Render the field as text ending in a newline. `ignore_comment` drops
    /// both the upper and the side comment.
    pub fn dump(&self, ignore_comment: bool) -> Result<String> {
        let side = if ignore_comment {
            String::new()
        } else {
            flatten(&self.side_comment)
        };

        let mut out = String::new();
        if !ignore_comment {
            push_comment_block(&self.upper_comment, &mut out);
        }
        out.push_str(&self.key);
        out.push_str(" = ");
        out.push_str(&self.value_text(&side)?);
        if !side.is_empty() {
            out.push_str(" # ");
            out.push_str(&side);
        }
        out.push('\n');
        Ok(out)
    }

    /// The encoded value as it must appear on the field line.
    fn value_text(&self, side: &str) -> Result<String> {
        let mut text = encode(&self.value, true)?;
        if !stays_intact(&text, side) {
            text = encode_quoted(&self.value, true)?;
        }
        if text.contains(|c: char| c == '\n' || c == '\r') {
            return Err(Utf8ConfigError::TypeMismatch(format!(
                "value of {:?} spans multiple lines",
                self.key
            )));
        }
        Ok(text)
    }
}

/// Whether `text` reads back unchanged from ` = text # side`. A bare '#' in
/// the value, or a quote that pairs with one in the side comment, moves the
/// comment boundary; bare blanks are eaten as layout.
fn stays_intact(text: &str, side: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    let line = if side.is_empty() {
        format!(" {}", text)
    } else {
        format!(" {} # {}", text, side)
    };
    let (content, _) = split_inline_comment(&line);
    content.len() == text.len() + 1 + usize::from(!side.is_empty())
}

impl Named for Field {
    fn name(&self) -> &str {
        &self.key
    }
}

/// Emit `# line` for each line of `comment`; nothing for an empty comment.
pub(crate) fn push_comment_block(comment: &str, out: &mut String) {
    if comment.is_empty() {
        return;
    }
    for line in comment.split('\n') {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            out.push_str("#\n");
        } else {
            out.push_str("# ");
            out.push_str(line);
            out.push('\n');
        }
    }
}

/// Side comments are single-line; line breaks become spaces.
fn flatten(comment: &str) -> String {
    comment.lines().collect::<Vec<_>>().join(" ").trim().to_string()
}
