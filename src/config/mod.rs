// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ast::{Document, Value};
use crate::codec;
use crate::parser::Parser;
use crate::resolver::{Interpolator, VariableNamespace};
use crate::KonfigError;

mod access;
mod conversion;
mod extend;
mod options;

pub use extend::EXTENDS;
pub use options::Options;

/// Where a configuration comes from.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Path(&'a Path),
    Text(&'a str),
}

/// A loaded configuration: the raw sections plus the variable snapshot used
/// to interpolate them on every read.
#[derive(Debug, Clone)]
pub struct Config {
    document: Document,
    namespace: VariableNamespace,
    options: Options,
    location: Option<PathBuf>,
}

impl Config {
    /// Load a config file, resolving its `extends` chain.
    ///
    /// # Example
    /// ```no_run
    /// let config = konfig::Config::from_file("app.ini")?;
    /// let port: i64 = config.get_as("server", "port")?;
    /// # Ok::<(), konfig::KonfigError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, KonfigError> {
        Self::from_file_with_options(path, Options::default())
    }

    pub fn from_file_with_options<P: AsRef<Path>>(path: P, options: Options) -> Result<Self, KonfigError> {
        let mut chain = vec![chain_key(path.as_ref())];
        Self::load_file(path.as_ref(), options, &mut chain)
    }

    /// Parse config text that has no location on disk. `${HERE}` stays unresolved.
    pub fn from_str(content: &str) -> Result<Self, KonfigError> {
        Self::from_str_with_options(content, Options::default())
    }

    pub fn from_str_with_options(content: &str, options: Options) -> Result<Self, KonfigError> {
        Self::build(content, None, options, &mut Vec::new())
    }

    /// Read an already-open stream to the end and parse it like [`Config::from_str`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, KonfigError> {
        Self::from_reader_with_options(reader, Options::default())
    }

    pub fn from_reader_with_options<R: Read>(mut reader: R, options: Options) -> Result<Self, KonfigError> {
        let mut content = String::new();
        reader.read_to_string(&mut content).map_err(|e| KonfigError::FileError {
            message: format!("Failed to read stream: {}", e),
            path: "<stream>".into(),
            hint: None,
            code: Some(302),
        })?;
        Self::from_str_with_options(&content, options)
    }

    pub fn load(source: Source<'_>) -> Result<Self, KonfigError> {
        Self::load_with_options(source, Options::default())
    }

    pub fn load_with_options(source: Source<'_>, options: Options) -> Result<Self, KonfigError> {
        match source {
            Source::Path(path) => Self::from_file_with_options(path, options),
            Source::Text(text) => Self::from_str_with_options(text, options),
        }
    }

    pub(crate) fn load_file(path: &Path, options: Options, chain: &mut Vec<PathBuf>) -> Result<Self, KonfigError> {
        if !path.is_file() {
            return Err(KonfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
                hint: Some("Check that the file exists and is readable".into()),
                code: Some(301),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| KonfigError::FileError {
            message: format!("Failed to read file: {}", e),
            path: path.to_string_lossy().to_string(),
            hint: Some("Check the file permissions and encoding".into()),
            code: Some(302),
        })?;

        Self::build(&content, Some(path), options, chain)
    }

    fn build(
        content: &str,
        location: Option<&Path>,
        options: Options,
        chain: &mut Vec<PathBuf>,
    ) -> Result<Self, KonfigError> {
        debug!(location = ?location, "loading config");

        let document = Parser::with_settings(content, &options.default_section, &options.comment_prefixes)
            .parse_document()?;

        let namespace = match &options.environment {
            Some(vars) => VariableNamespace::build(vars.iter().map(|(k, v)| (k.as_str(), v.as_str())), location),
            None => VariableNamespace::from_env(location),
        };

        let mut config = Self {
            document,
            namespace,
            options,
            location: location.map(Path::to_path_buf),
        };
        config.resolve_extends(chain)?;

        debug!(
            location = ?config.location,
            sections = config.document.sections.len(),
            variables = config.namespace.len(),
            "config loaded"
        );
        Ok(config)
    }

    /// Interpolate and decode one raw value in the context of `section`.
    fn read_raw(&self, section: &str, option: &str, raw: &str) -> Result<Value, KonfigError> {
        let text = Interpolator::new(&self.namespace, &self.document, &self.options.default_section)
            .interpolate(section, option, raw)?;
        codec::decode_with(&text, self.options.decode_mode)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn namespace(&self) -> &VariableNamespace {
        &self.namespace
    }

    pub fn load_options(&self) -> &Options {
        &self.options
    }

    /// Path the config was read from, if any.
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    pub fn default_section_name(&self) -> &str {
        &self.options.default_section
    }
}

/// Identity of a file on the extends chain.
pub(crate) fn chain_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests;
