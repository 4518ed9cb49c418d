// Author: Dustin Pilgrim
// License: MIT

use std::io::Write;

use crate::config::Config;
use crate::settings::SettingsMap;
use crate::KonfigError;

/// Flatten a config into typed values.
///
/// Without a filter every section is exported, the default section included,
/// under `section.option` keys. With a filter only that section is exported,
/// keyed by bare option name. Default-section options show up in every
/// section either way.
///
/// # Examples
/// ```
/// use konfig::{Config, Value};
///
/// let config = Config::from_str("[one]\nfoo = bar\n").unwrap();
/// let all = konfig::export::export_flat(&config, None).unwrap();
/// assert_eq!(all["one.foo"], Value::from("bar"));
///
/// let one = konfig::export::export_flat(&config, Some("one")).unwrap();
/// assert_eq!(one["foo"], Value::from("bar"));
/// ```
pub fn export_flat(config: &Config, section_filter: Option<&str>) -> Result<SettingsMap, KonfigError> {
    if let Some(section) = section_filter {
        return Ok(config.items(section)?.into_iter().collect());
    }

    let mut out = SettingsMap::new();
    let default_section = config.default_section_name();
    let names = std::iter::once(default_section).chain(config.sections());
    for section in names {
        for (option, value) in config.items(section)? {
            out.insert(format!("{}{}{}", section, SettingsMap::SEPARATOR, option), value);
        }
    }
    Ok(out)
}

/// Export the flattened config as pretty-printed JSON.
pub fn to_json(config: &Config, section_filter: Option<&str>) -> Result<String, KonfigError> {
    let flat = export_flat(config, section_filter)?;
    serde_json::to_string_pretty(&flat).map_err(|e| KonfigError::TypeError {
        message: format!("Failed to serialize config: {}", e),
        hint: None,
        code: Some(501),
    })
}

/// Render the raw (uninterpolated) sections back to INI text.
///
/// The default section comes first and is omitted when empty. Continuation
/// lines are indented by four spaces.
pub fn to_ini_string(config: &Config) -> String {
    let document = config.document();
    let mut out = String::new();

    let default_section = config.default_section_name();
    let sections = std::iter::once((default_section, &document.defaults))
        .filter(|(_, options)| !options.is_empty())
        .chain(document.sections.iter().map(|(name, options)| (name.as_str(), options)));

    for (name, options) in sections {
        out.push_str(&format!("[{}]\n", name));
        for (option, raw) in options {
            let mut lines = raw.split('\n');
            let first = lines.next().unwrap_or_default();
            if first.is_empty() {
                out.push_str(&format!("{} =", option));
            } else {
                out.push_str(&format!("{} = {}", option, first));
            }
            for line in lines {
                out.push_str("\n    ");
                out.push_str(line.trim());
            }
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

/// Write [`to_ini_string`] output to a writer.
pub fn write_ini<W: Write>(config: &Config, mut writer: W) -> Result<(), KonfigError> {
    writer
        .write_all(to_ini_string(config).as_bytes())
        .map_err(|e| KonfigError::FileError {
            message: format!("Failed to write config: {}", e),
            path: "<writer>".into(),
            hint: None,
            code: Some(304),
        })
}

impl Config {
    /// See [`export_flat`].
    pub fn export_flat(&self, section_filter: Option<&str>) -> Result<SettingsMap, KonfigError> {
        export_flat(self, section_filter)
    }

    /// See [`write_ini`].
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), KonfigError> {
        write_ini(self, writer)
    }
}
