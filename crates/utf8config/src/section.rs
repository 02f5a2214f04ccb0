//! A `[name]` section: an ordered set of uniquely keyed fields.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Result, Utf8ConfigError};
use crate::field::{push_comment_block, Field};
use crate::ordered::{Named, OrderedMap};
use crate::parser::{group_into_units, LogicalUnit};

/// A named group of fields. Fields keep the order they were added or loaded
/// in, which is also the order they are dumped in.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    name: String,
    upper_comment: String,
    fields: OrderedMap<Field>,
}

/// Check that `name` reads back unchanged from a `[name]` header: non-empty,
/// no surrounding whitespace, no line break and no `]`.
pub fn validate_section_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.trim() == name
        && !name.contains(|c: char| c == '\n' || c == '\r' || c == ']');
    if valid {
        Ok(())
    } else {
        Err(Utf8ConfigError::InvalidSectionName(name.to_string()))
    }
}

impl Section {
    /// Create an empty section. Fails if `name` cannot be written as a header.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_section_name(&name)?;
        Ok(Self {
            name,
            upper_comment: String::new(),
            fields: OrderedMap::default(),
        })
    }

    pub fn with_upper_comment(mut self, comment: impl Into<String>) -> Self {
        self.upper_comment = comment.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Comment lines above the header, joined with `\n`.
    pub fn upper_comment(&self) -> &str {
        &self.upper_comment
    }

    pub fn set_upper_comment(&mut self, comment: impl Into<String>) {
        self.upper_comment = comment.into();
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.len() == 0
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains(key)
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.fields.get_mut(key)
    }

    /// Like [`Section::get`], but a missing key is an error.
    pub fn field(&self, key: &str) -> Result<&Field> {
        self.get(key)
            .ok_or_else(|| Utf8ConfigError::MissingKey(key.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key())
    }

    pub fn values(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn items(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|f| (f.key(), f))
    }

    /// Append a field. Fails if its key is already present.
    pub fn add_field(&mut self, field: Field) -> Result<()> {
        self.fields
            .push(field)
            .map_err(|f| Utf8ConfigError::DuplicateKey(f.key().to_string()))
    }

    /// Append several fields in order. Nothing is added if any key is
    /// already present or repeats within `fields`.
    pub fn add_fields(&mut self, fields: impl IntoIterator<Item = Field>) -> Result<()> {
        let fields: Vec<Field> = fields.into_iter().collect();
        if let Some(key) = self.fields.first_conflict(fields.iter().map(|f| f.key())) {
            return Err(Utf8ConfigError::DuplicateKey(key.to_string()));
        }
        fields.into_iter().try_for_each(|f| self.add_field(f))
    }

    /// Remove and return a field. Fails if `key` is absent.
    pub fn remove_field(&mut self, key: &str) -> Result<Field> {
        self.fields
            .remove(key)
            .ok_or_else(|| Utf8ConfigError::MissingKey(key.to_string()))
    }

    /// Remove several fields. Nothing is removed if any key is absent.
    pub fn remove_fields<K: AsRef<str>>(
        &mut self,
        keys: impl IntoIterator<Item = K>,
    ) -> Result<Vec<Field>> {
        let keys: Vec<String> = keys.into_iter().map(|k| k.as_ref().to_string()).collect();
        if let Some(missing) = keys.iter().find(|k| !self.contains_key(k)) {
            return Err(Utf8ConfigError::MissingKey(missing.clone()));
        }
        Ok(keys.iter().filter_map(|k| self.fields.remove(k)).collect())
    }

    /// Parse one section: a `[name]` header (with its comment block) followed
    /// by fields.
    pub fn load(text: &str) -> Result<Self> {
        Self::from_units(&group_into_units(text))
    }

    pub(crate) fn from_units(units: &[LogicalUnit]) -> Result<Self> {
        let (header, rest) = units
            .split_first()
            .ok_or_else(|| Utf8ConfigError::format(0, "no section header found"))?;

        if !header.is_header() {
            return Err(Utf8ConfigError::format(
                header.line,
                "expected a [section] header",
            ));
        }

        let mut section = Section::new(parse_header(header)?)?;
        section.upper_comment = header.upper_comment()?;

        for unit in rest {
            if unit.is_header() {
                return Err(Utf8ConfigError::format(
                    unit.line,
                    "unexpected section header inside a section",
                ));
            }
            section.add_field(Field::from_unit(unit)?)?;
        }
        Ok(section)
    }

    /// Render the section: comment block, `[name]`, then the fields with a
    /// blank line between each.
    pub fn dump(&self, ignore_comment: bool) -> Result<String> {
        let mut out = String::new();
        if !ignore_comment {
            push_comment_block(&self.upper_comment, &mut out);
        }
        out.push('[');
        out.push_str(&self.name);
        out.push_str("]\n");
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&field.dump(ignore_comment)?);
        }
        Ok(out)
    }
}

/// `[ name ]` → `name`.
fn parse_header(unit: &LogicalUnit) -> Result<String> {
    let line = unit.content.trim_end();
    let name = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| {
            Utf8ConfigError::format(unit.line, "section header must end with ']'")
        })?
        .trim();
    if name.is_empty() {
        return Err(Utf8ConfigError::format(unit.line, "empty section name"));
    }
    validate_section_name(name).map_err(|_| {
        Utf8ConfigError::format(unit.line, format!("invalid section name {:?}", name))
    })?;
    Ok(name.to_string())
}

impl Named for Section {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Serializes as a map of key → value; comments are not part of the output.
impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for field in self.fields.iter() {
            map.serialize_entry(field.key(), field.value())?;
        }
        map.end()
    }
}
