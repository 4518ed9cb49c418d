use std::ops::{Deref, DerefMut};

use indexmap::IndexMap;
use serde::Serialize;

use crate::ast::Value;

/// Flat settings keyed by dotted names such as `server.port`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct SettingsMap(IndexMap<String, Value>);

impl SettingsMap {
    pub const SEPARATOR: char = '.';

    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.0
    }

    /// Settings under `section` with the `section.` prefix removed.
    ///
    /// An empty name selects the keys that have no section at all.
    ///
    /// ```
    /// # use konfig::{SettingsMap, Value};
    /// let settings: SettingsMap = [("a.one", 1), ("a.two", 2), ("b.three", 3), ("four", 4)]
    ///     .into_iter()
    ///     .map(|(k, v)| (k.to_string(), Value::Integer(v)))
    ///     .collect();
    /// assert_eq!(settings.getsection("a").len(), 2);
    /// assert_eq!(settings.getsection("")["four"], Value::Integer(4));
    /// ```
    pub fn getsection(&self, section: &str) -> SettingsMap {
        if section.is_empty() {
            return self
                .0
                .iter()
                .filter(|(k, _)| !k.contains(Self::SEPARATOR))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
        }

        let prefix = format!("{}{}", section, Self::SEPARATOR);
        self.0
            .iter()
            .filter_map(|(k, v)| k.strip_prefix(&prefix).map(|rest| (rest.to_string(), v.clone())))
            .collect()
    }

    /// Insert every pair whose key is not set yet; existing keys keep their values.
    pub fn setdefaults<I, K>(&mut self, defaults: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        for (k, v) in defaults {
            self.0.entry(k.into()).or_insert(v);
        }
    }
}

impl Deref for SettingsMap {
    type Target = IndexMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SettingsMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<(String, Value)> for SettingsMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for SettingsMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<IndexMap<String, Value>> for SettingsMap {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self(map)
    }
}
