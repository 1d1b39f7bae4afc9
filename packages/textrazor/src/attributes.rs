//! Ordered `name -> [values]` mapping.
//!
//! Used for entity enrichment data and dictionary entry data. Dictionary
//! entry data is attached back onto matched entities, so both share this
//! type and the same JSON shape (a plain object of string arrays).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Result of looking up one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// The key is not in the map: the service had nothing to say.
    Absent,
    /// The key is present with no values: the service confirmed no matches.
    Empty,
    /// The key is present with at least one value.
    Values(&'a [String]),
}

impl<'a> Lookup<'a> {
    /// The values, or an empty slice for both `Absent` and `Empty`.
    #[must_use]
    pub fn values(self) -> &'a [String] {
        match self {
            Self::Values(values) => values,
            Self::Absent | Self::Empty => &[],
        }
    }

    #[must_use]
    pub fn first(self) -> Option<&'a str> {
        self.values().first().map(String::as_str)
    }
}

/// Attribute name to list of string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap(BTreeMap<String, Vec<String>>);

impl AttributeMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Three-state lookup of `key`.
    ///
    /// # Examples
    /// ```
    /// use textrazor::attributes::{AttributeMap, Lookup};
    ///
    /// let mut data = AttributeMap::new();
    /// data.insert("types", vec!["writer".to_string()]);
    /// data.insert("aliases", Vec::new());
    ///
    /// assert_eq!(data.lookup("types").first(), Some("writer"));
    /// assert_eq!(data.lookup("aliases"), Lookup::Empty);
    /// assert_eq!(data.lookup("born"), Lookup::Absent);
    /// ```
    #[must_use]
    pub fn lookup(&self, key: &str) -> Lookup<'_> {
        match self.0.get(key) {
            None => Lookup::Absent,
            Some(values) if values.is_empty() => Lookup::Empty,
            Some(values) => Lookup::Values(values),
        }
    }

    /// Raw access; `None` only when the key is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Replace the values stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.0.insert(key.into(), values);
    }

    /// Append one value under `key`, creating the key if needed.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
