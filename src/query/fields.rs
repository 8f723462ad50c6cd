//! Weighted field lists.
//!
//! Fields keep the order they were configured in: it is the order of the
//! clauses in every compiled disjunction and of the fields in displays.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{Result, SpanfoldError};

/// Weight of a field configured without `^boost`.
pub const DEFAULT_FIELD_BOOST: f32 = 1.0;

/// Ordered `field → boost` list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoostedFields {
    fields: Vec<(String, f32)>,
}

impl BoostedFields {
    /// An empty field list.
    pub fn new() -> Self {
        BoostedFields { fields: Vec::new() }
    }

    /// Unweighted fields.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields = Self::new();
        for name in names {
            fields.insert(name, DEFAULT_FIELD_BOOST);
        }
        fields
    }

    /// Parse a `"title, body^2"` field list.
    pub fn parse(list: &str) -> Result<Self> {
        let mut fields = Self::new();
        fields.extend_from_list(list)?;
        Ok(fields)
    }

    /// Add every field of a `"title, body^2"` field list.
    ///
    /// Entries are trimmed and empty entries are skipped.
    pub fn extend_from_list(&mut self, list: &str) -> Result<()> {
        for entry in list.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let (name, boost) = match entry.split_once('^') {
                Some((name, boost)) => {
                    let boost = boost.trim().parse::<f32>().map_err(|e| {
                        SpanfoldError::parse(format!("Invalid boost in field [{entry}]: {e}"))
                    })?;
                    (name.trim(), boost)
                }
                None => (entry, DEFAULT_FIELD_BOOST),
            };
            if name.is_empty() {
                return Err(SpanfoldError::parse(format!("Missing field name in [{entry}]")));
            }
            self.insert(name, boost);
        }
        Ok(())
    }

    /// Read fields from JSON: a field list string, an array of
    /// field list strings, or an object of numeric boosts.
    pub fn from_json(value: &Value) -> Result<Self> {
        let mut fields = Self::new();
        match value {
            Value::String(list) => fields.extend_from_list(list)?,
            Value::Array(entries) => {
                for entry in entries {
                    match entry {
                        Value::String(list) => fields.extend_from_list(list)?,
                        other => {
                            return Err(SpanfoldError::parse(format!(
                                "invalid value type in fields array [{other}], only \"field^boost\" is supported"
                            )));
                        }
                    }
                }
            }
            Value::Object(map) => {
                for (name, boost) in map {
                    let boost = boost.as_f64().ok_or_else(|| {
                        SpanfoldError::parse(format!(
                            "invalid value type in fields map [{boost}], only numeric is supported"
                        ))
                    })?;
                    fields.insert(name.trim(), boost as f32);
                }
            }
            other => {
                return Err(SpanfoldError::parse(format!(
                    "invalid value type for fields [{other}]"
                )));
            }
        }
        Ok(fields)
    }

    /// Set the boost of a field, appending it when new.
    pub fn insert<S: Into<String>>(&mut self, name: S, boost: f32) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = boost,
            None => self.fields.push((name, boost)),
        }
    }

    /// Boost of a field, if configured.
    pub fn boost(&self, name: &str) -> Option<f32> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, boost)| *boost)
    }

    /// Iterate over `(field, boost)` in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.fields.iter().map(|(name, boost)| (name.as_str(), *boost))
    }

    /// Field names in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Whether any field carries a boost other than the default.
    pub fn has_boosts(&self) -> bool {
        self.fields.iter().any(|(_, boost)| *boost != DEFAULT_FIELD_BOOST)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is configured.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The same fields with every boost reset to the default.
    pub fn unweighted(&self) -> Self {
        Self::from_names(self.names())
    }
}

impl fmt::Display for BoostedFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, boost)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{name}")?;
            if *boost != DEFAULT_FIELD_BOOST {
                write!(f, "^{boost}")?;
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, f32)> for BoostedFields {
    fn from_iter<I: IntoIterator<Item = (S, f32)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (name, boost) in iter {
            fields.insert(name, boost);
        }
        fields
    }
}

impl Serialize for BoostedFields {
    fn serialize<Ser: Serializer>(
        &self,
        serializer: Ser,
    ) -> std::result::Result<Ser::Ok, Ser::Error> {
        serializer.collect_map(self.fields.iter().map(|(name, boost)| (name, boost)))
    }
}

impl<'de> Deserialize<'de> for BoostedFields {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        BoostedFields::from_json(&value).map_err(serde::de::Error::custom)
    }
}
