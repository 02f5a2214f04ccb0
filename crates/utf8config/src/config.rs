//! A whole document: an ordered set of uniquely named sections.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Result, Utf8ConfigError};
use crate::ordered::OrderedMap;
use crate::parser::group_into_units;
use crate::section::Section;
use crate::value::Value;

/// A parsed configuration document.
///
/// ```
/// use utf8config::{Config, Value};
///
/// let text = "# server settings\n[server]\nport = 8080 # default\n";
/// let config = Config::load(text).unwrap();
/// assert_eq!(config.value("server", "port").unwrap(), &Value::Int(8080));
/// assert_eq!(config.dump(false).unwrap(), text);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    sections: OrderedMap<Section>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.len() == 0
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(name)
    }

    /// Like [`Config::get`], but a missing section is an error.
    pub fn section(&self, name: &str) -> Result<&Section> {
        self.get(name)
            .ok_or_else(|| Utf8ConfigError::MissingSection(name.to_string()))
    }

    /// Value of `key` in section `name`.
    pub fn value(&self, name: &str, key: &str) -> Result<&Value> {
        Ok(self.section(name)?.field(key)?.value())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name())
    }

    pub fn values(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn items(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|s| (s.name(), s))
    }

    pub fn add_section(&mut self, section: Section) -> Result<()> {
        self.sections
            .push(section)
            .map_err(|s| Utf8ConfigError::DuplicateSection(s.name().to_string()))
    }

    /// Append several sections in order; all-or-nothing.
    pub fn add_sections(&mut self, sections: impl IntoIterator<Item = Section>) -> Result<()> {
        let sections: Vec<Section> = sections.into_iter().collect();
        if let Some(name) = self
            .sections
            .first_conflict(sections.iter().map(|s| s.name()))
        {
            return Err(Utf8ConfigError::DuplicateSection(name.to_string()));
        }
        sections.into_iter().try_for_each(|s| self.add_section(s))
    }

    pub fn remove_section(&mut self, name: &str) -> Result<Section> {
        self.sections
            .remove(name)
            .ok_or_else(|| Utf8ConfigError::MissingSection(name.to_string()))
    }

    /// Remove several sections; all-or-nothing.
    pub fn remove_sections<K: AsRef<str>>(
        &mut self,
        names: impl IntoIterator<Item = K>,
    ) -> Result<Vec<Section>> {
        let names: Vec<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();
        if let Some(missing) = names.iter().find(|n| !self.contains_section(n)) {
            return Err(Utf8ConfigError::MissingSection(missing.clone()));
        }
        Ok(names
            .iter()
            .filter_map(|n| self.sections.remove(n))
            .collect())
    }

    /// Parse a document. Each `[header]` starts a new section and takes the
    /// comment block right above it; a field before the first header is an
    /// error. Nothing is returned unless the whole text parses.
    pub fn load(text: &str) -> Result<Self> {
        let units = group_into_units(text);

        let starts: Vec<usize> = units
            .iter()
            .enumerate()
            .filter(|(_, unit)| unit.is_header())
            .map(|(i, _)| i)
            .collect();

        if let Some(stray) = units.first().filter(|unit| !unit.is_header()) {
            return Err(Utf8ConfigError::format(
                stray.line,
                "field outside of any section",
            ));
        }

        let mut config = Config::new();
        for (n, &start) in starts.iter().enumerate() {
            let end = starts.get(n + 1).copied().unwrap_or(units.len());
            config.add_section(Section::from_units(&units[start..end])?)?;
        }
        Ok(config)
    }

    /// Render every section in order, separated by a blank line.
    pub fn dump(&self, ignore_comment: bool) -> Result<String> {
        let parts = self
            .sections
            .iter()
            .map(|s| s.dump(ignore_comment))
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join("\n"))
    }

    /// Pretty JSON view: `{ section: { key: value } }`, comments left out.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for section in self.sections.iter() {
            map.serialize_entry(section.name(), section)?;
        }
        map.end()
    }
}
