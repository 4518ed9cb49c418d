// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;
use std::env;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::ast::Document;
use crate::utils::escape_dollars;
use crate::KonfigError;

/// Name of the variable holding the directory of the file being read.
pub const HERE: &str = "HERE";

/// Placeholders nested deeper than this are treated as a reference cycle.
pub const MAX_DEPTH: usize = 10;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$\{([^}]+)\}").expect("valid regex"));

/// Substitution table for `${name}` placeholders.
///
/// Holds an escaped snapshot of the environment plus `HERE`. When the source
/// has no location, `HERE` expands to the literal text `${HERE}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariableNamespace {
    vars: HashMap<String, String>,
}

impl VariableNamespace {
    /// Snapshot the process environment.
    pub fn from_env(location: Option<&Path>) -> Self {
        let vars = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::build(vars, location)
    }

    pub fn build<I, K, V>(environment: I, location: Option<&Path>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut vars: HashMap<String, String> = environment
            .into_iter()
            .map(|(k, v)| (k.into(), escape_dollars(v.as_ref())))
            .collect();

        let here = match location.and_then(Path::parent) {
            Some(dir) => escape_dollars(&dir.to_string_lossy()),
            None => escape_dollars("${HERE}"),
        };
        vars.insert(HERE.to_string(), here);

        Self { vars }
    }

    /// The escaped substitution text for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Expands placeholders in raw option text.
///
/// `${name}` is looked up in the namespace first, then among the options
/// visible from the section being read. `${section:option}` reads another
/// section. `$$` is a literal `$`. Anything that does not resolve is kept
/// verbatim.
pub struct Interpolator<'a> {
    namespace: &'a VariableNamespace,
    document: &'a Document,
    default_section: &'a str,
}

impl<'a> Interpolator<'a> {
    pub fn new(namespace: &'a VariableNamespace, document: &'a Document, default_section: &'a str) -> Self {
        Self { namespace, document, default_section }
    }

    pub fn interpolate(&self, section: &str, option: &str, raw: &str) -> Result<String, KonfigError> {
        let mut out = String::with_capacity(raw.len());
        self.expand((section, option), section, raw, &mut out, 1)?;
        Ok(out)
    }

    fn expand(
        &self,
        origin: (&str, &str),
        section: &str,
        raw: &str,
        out: &mut String,
        depth: usize,
    ) -> Result<(), KonfigError> {
        if depth > MAX_DEPTH {
            return Err(KonfigError::InterpolationDepth {
                section: origin.0.to_string(),
                option: origin.1.to_string(),
                depth: MAX_DEPTH,
                hint: Some("Check for placeholders that refer back to themselves".into()),
                code: Some(303),
            });
        }

        let mut rest = raw;
        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];

            if let Some(after) = tail.strip_prefix("$$") {
                out.push('$');
                rest = after;
                continue;
            }

            if let Some(caps) = PLACEHOLDER.captures(tail) {
                let whole = caps.get(0).map_or(0, |m| m.end());
                let name = caps.get(1).map_or("", |m| m.as_str());
                match self.resolve(section, name) {
                    Some((next_section, text)) => {
                        self.expand(origin, next_section, text, out, depth + 1)?
                    }
                    None => {
                        trace!(section = origin.0, option = origin.1, placeholder = name, "unresolved placeholder");
                        out.push_str(&tail[..whole]);
                    }
                }
                rest = &tail[whole..];
                continue;
            }

            out.push('$');
            rest = &tail[1..];
        }
        out.push_str(rest);
        Ok(())
    }

    /// Returns the section to keep expanding in and the raw text to expand.
    fn resolve<'s>(&'s self, section: &'s str, name: &'s str) -> Option<(&'s str, &'s str)> {
        if let Some((other, option)) = name.split_once(':') {
            if other != self.default_section && !self.document.sections.contains_key(other) {
                return None;
            }
            return self
                .document
                .raw(self.default_section, other, option)
                .map(|text| (other, text));
        }

        if let Some(text) = self.namespace.get(name) {
            return Some((section, text));
        }

        self.document
            .raw(self.default_section, section, name)
            .map(|text| (section, text))
    }
}

// -- Tests --
