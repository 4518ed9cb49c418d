use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// A typed configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Bool(bool),
    String(String),
    List(Vec<Value>), // one element per continuation line
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self { Some(s) } else { None }
    }

    /// Wraps a scalar into a one-element list; lists are returned unchanged.
    pub fn into_list(self) -> Vec<Value> {
        match self {
            Value::List(items) => items,
            other => vec![other],
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Raw option text of one section, in insertion order.
pub type Section = IndexMap<String, String>;

/// The uninterpolated store produced by the parser.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub defaults: Section,
    pub sections: IndexMap<String, Section>,
}

impl Document {
    /// Raw lookup with default-section fallthrough.
    pub fn raw(&self, default_section: &str, section: &str, option: &str) -> Option<&str> {
        if section != default_section {
            if let Some(v) = self.sections.get(section).and_then(|s| s.get(option)) {
                return Some(v);
            }
        }
        self.defaults.get(option).map(String::as_str)
    }

    pub fn section(&self, default_section: &str, name: &str) -> Option<&Section> {
        if name == default_section {
            Some(&self.defaults)
        } else {
            self.sections.get(name)
        }
    }

    pub fn section_mut(&mut self, default_section: &str, name: &str) -> Option<&mut Section> {
        if name == default_section {
            Some(&mut self.defaults)
        } else {
            self.sections.get_mut(name)
        }
    }
}
