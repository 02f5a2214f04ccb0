//! Value codec: converts between value text and [`Value`].
//!
//! Decoding classifies a piece of text in a fixed order (first match wins):
//!
//! 1. quoted token (`'...'` or `"..."`) → string, no escape processing
//! 2. empty → null
//! 3. whitespace only → the whitespace itself if `allow_space`, else null
//! 4. `none` / `null` (any case) → null
//! 5. `true` / `yes` / `是` → true, `false` / `no` / `否` → false (any case)
//! 6. `[+-]digits` → integer
//! 7. `[+-]digits.digits` with optional exponent → float
//! 8. a comma outside quotes → homogeneous list
//! 9. anything else → the trimmed text as a string
//!
//! Encoding is the mirror image: a string is only quoted when decoding its raw
//! text would not give the same string back, so the encoder asks the decoder.
//!
//! # Key design decisions
//!
//! - **No escapes**: the quote character is picked so that it does not occur
//!   in the text (`'` first, `"` when the text holds an apostrophe). A string
//!   that needs quoting and contains both quote characters cannot be written.
//! - **Trailing comma** (a format extension): a list of one element is written
//!   `x,`. When decoding, one trailing empty segment is a terminator, not a
//!   null, and a lone `,` is the empty list. So `1, 2,` reads as `[1, 2]`;
//!   a trailing null has to be spelled out as `1, 2, None`. Null elements are
//!   always written as `None`, so an encoded list never ends in an empty
//!   segment that means something.
//! - **Self-check for lists**: quote characters inside unquoted elements can
//!   pair up across elements once joined. The encoder decodes its own output
//!   and falls back to quoting every string element when it does not match.

use crate::error::{Result, Utf8ConfigError};
use crate::parser::{find_unquoted, unquote};
use crate::value::{Value, ValueKind};

const NULL_TOKENS: [&str; 2] = ["none", "null"];
const TRUE_TOKENS: [&str; 3] = ["true", "yes", "是"];
const FALSE_TOKENS: [&str; 3] = ["false", "no", "否"];

/// Decode value text into a [`Value`].
///
/// `allow_space` keeps a whitespace-only input as a string instead of
/// reading it as null. List elements are always decoded without it.
///
/// ```
/// use utf8config::{decode, Value};
/// assert_eq!(decode("1, , 3", false).unwrap(),
///            Value::List(vec![Value::Int(1), Value::Null, Value::Int(3)]));
/// assert_eq!(decode("'123'", false).unwrap(), Value::String("123".into()));
/// ```
pub fn decode(raw: &str, allow_space: bool) -> Result<Value> {
    let trimmed = raw.trim();

    if let Some(inner) = unquote(trimmed) {
        return Ok(Value::String(inner.to_string()));
    }
    if raw.is_empty() {
        return Ok(Value::Null);
    }
    if trimmed.is_empty() {
        return Ok(if allow_space {
            Value::String(raw.to_string())
        } else {
            Value::Null
        });
    }
    if let Some(value) = decode_token(trimmed) {
        return Ok(value);
    }

    let commas = find_unquoted(trimmed, ',');
    if !commas.is_empty() {
        return decode_list(trimmed, &commas);
    }

    Ok(Value::String(trimmed.to_string()))
}

/// Null, bool and number literals.
fn decode_token(s: &str) -> Option<Value> {
    let lower = s.to_lowercase();
    let lower = lower.as_str();

    if NULL_TOKENS.contains(&lower) {
        return Some(Value::Null);
    }
    if TRUE_TOKENS.contains(&lower) {
        return Some(Value::Bool(true));
    }
    if FALSE_TOKENS.contains(&lower) {
        return Some(Value::Bool(false));
    }

    if is_integer(s) {
        // Out of i64 range: keep the magnitude as a float.
        return match s.parse::<i64>() {
            Ok(n) => Some(Value::Int(n)),
            Err(_) => parse_finite(s),
        };
    }
    if is_float(s) {
        return parse_finite(s);
    }
    None
}

fn parse_finite(s: &str) -> Option<Value> {
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
}

fn strip_sign(s: &str) -> &str {
    s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s)
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn is_integer(s: &str) -> bool {
    let body = strip_sign(s);
    !body.is_empty() && all_digits(body)
}

fn is_float(s: &str) -> bool {
    let body = strip_sign(s);
    let (mantissa, exponent) = match body.find(|c: char| c == 'e' || c == 'E') {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };

    let Some((int_part, frac_part)) = mantissa.split_once('.') else {
        return false;
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return false;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let digits = strip_sign(exp);
            !digits.is_empty() && all_digits(digits)
        }
    }
}

fn decode_list(text: &str, commas: &[usize]) -> Result<Value> {
    let mut segments = Vec::with_capacity(commas.len() + 1);
    let mut start = 0;
    for &pos in commas {
        segments.push(&text[start..pos]);
        start = pos + 1;
    }
    segments.push(&text[start..]);

    if segments.last().is_some_and(|s| s.trim().is_empty()) {
        segments.pop();
    }
    if segments.len() == 1 && segments[0].trim().is_empty() {
        return Ok(Value::List(Vec::new()));
    }

    let items = segments
        .into_iter()
        .map(|segment| decode(segment, false))
        .collect::<Result<Vec<_>>>()?;
    check_homogeneous(&items)?;
    Ok(Value::List(items))
}

/// Non-null list elements must all be of one kind.
fn check_homogeneous(items: &[Value]) -> Result<()> {
    let mut seen: Option<ValueKind> = None;
    for item in items.iter().filter(|v| !v.is_null()) {
        match seen {
            None => seen = Some(item.kind()),
            Some(kind) if kind != item.kind() => {
                return Err(Utf8ConfigError::TypeMismatch(format!(
                    "list mixes {} and {} elements",
                    kind,
                    item.kind()
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Encode a [`Value`] as value text that [`decode`] reads back unchanged.
///
/// Fails with [`Utf8ConfigError::TypeMismatch`] for non-finite floats,
/// nested or mixed-kind lists, and strings that need quoting but contain both
/// quote characters.
///
/// ```
/// use utf8config::{encode, Value};
/// assert_eq!(encode(&Value::from("123"), false).unwrap(), "'123'");
/// assert_eq!(encode(&Value::from("Hello World"), false).unwrap(), "Hello World");
/// assert_eq!(encode(&Value::List(vec![]), false).unwrap(), ",");
/// ```
pub fn encode(value: &Value, allow_space: bool) -> Result<String> {
    encode_value(value, allow_space, false)
}

/// Like [`encode`], but every string (including list elements) is quoted.
pub(crate) fn encode_quoted(value: &Value, allow_space: bool) -> Result<String> {
    encode_value(value, allow_space, true)
}

fn encode_value(value: &Value, allow_space: bool, force_quotes: bool) -> Result<String> {
    match value {
        Value::Null => Ok("None".to_string()),
        Value::Bool(true) => Ok("True".to_string()),
        Value::Bool(false) => Ok("False".to_string()),
        Value::Int(n) => Ok(n.to_string()),
        Value::Float(f) => format_float(*f),
        Value::String(s) => encode_string(s, allow_space, force_quotes),
        Value::List(items) => encode_list(items, force_quotes),
    }
}

/// Shortest round-trip form, always with a `.` so it never reads as an int.
fn format_float(f: f64) -> Result<String> {
    if !f.is_finite() {
        return Err(Utf8ConfigError::TypeMismatch(format!(
            "cannot encode non-finite float {}",
            f
        )));
    }
    let s = format!("{}", f);
    if s.contains('.') {
        Ok(s)
    } else {
        Ok(format!("{}.0", s))
    }
}

fn encode_string(s: &str, allow_space: bool, force_quotes: bool) -> Result<String> {
    if !force_quotes && reads_back_as(s, allow_space) {
        return Ok(s.to_string());
    }
    quote(s)
}

fn reads_back_as(s: &str, allow_space: bool) -> bool {
    matches!(decode(s, allow_space), Ok(Value::String(ref d)) if d == s)
}

fn quote(s: &str) -> Result<String> {
    if !s.contains('\'') {
        Ok(format!("'{}'", s))
    } else if !s.contains('"') {
        Ok(format!("\"{}\"", s))
    } else {
        Err(Utf8ConfigError::TypeMismatch(format!(
            "string needs quoting but contains both quote characters: {:?}",
            s
        )))
    }
}

fn encode_list(items: &[Value], force_quotes: bool) -> Result<String> {
    if items.is_empty() {
        return Ok(",".to_string());
    }
    if items.iter().any(|v| matches!(v, Value::List(_))) {
        return Err(Utf8ConfigError::TypeMismatch(
            "nested lists cannot be encoded".to_string(),
        ));
    }
    check_homogeneous(items)?;

    let text = join_elements(items, force_quotes)?;
    if force_quotes || list_reads_back(&text, items) {
        return Ok(text);
    }

    let text = join_elements(items, true)?;
    if list_reads_back(&text, items) {
        Ok(text)
    } else {
        Err(Utf8ConfigError::TypeMismatch(format!(
            "list cannot be written unambiguously: {}",
            text
        )))
    }
}

fn join_elements(items: &[Value], force_quotes: bool) -> Result<String> {
    let parts = items
        .iter()
        .map(|item| encode_value(item, false, force_quotes))
        .collect::<Result<Vec<_>>>()?;
    if parts.len() == 1 {
        Ok(format!("{},", parts[0]))
    } else {
        Ok(parts.join(", "))
    }
}

fn list_reads_back(text: &str, items: &[Value]) -> bool {
    matches!(decode(text, false), Ok(Value::List(ref decoded)) if decoded.as_slice() == items)
}
