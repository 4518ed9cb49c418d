use tracing::{debug, warn};

use super::*;
use crate::ast::Section;
use crate::utils::{escape_dollars, expand_home};

/// Default-section option listing the files to inherit from.
pub const EXTENDS: &str = "extends";

impl Config {
    /// Pull in options from every file named by `extends`, in order, never
    /// replacing an option this config already has.
    pub(super) fn resolve_extends(&mut self, chain: &mut Vec<PathBuf>) -> Result<(), KonfigError> {
        if !self.document.defaults.contains_key(EXTENDS) {
            return Ok(());
        }

        let default_section = self.options.default_section.clone();
        let targets: Vec<String> = self
            .get(&default_section, EXTENDS)?
            .into_list()
            .iter()
            .map(Value::to_string)
            .collect();

        for target in targets {
            let path = expand_home(&target);
            if !path.is_file() {
                return Err(KonfigError::FileNotFound {
                    path: target,
                    hint: Some(format!("Listed in `{}`", EXTENDS)),
                    code: Some(301),
                });
            }

            let key = chain_key(&path);
            if chain.contains(&key) {
                warn!(path = %path.display(), "skipping extends entry already being loaded");
                continue;
            }

            chain.push(key);
            let loaded = Config::load_file(&path, self.options.clone(), chain);
            chain.pop();
            let secondary = loaded?;

            let copied = self.merge_missing(&secondary)?;
            debug!(path = %path.display(), copied, "merged extended config");
        }

        Ok(())
    }

    /// Copy every option of `other` that is absent here. Values are copied in
    /// resolved form, so they keep meaning what they meant in `other`. They
    /// are decoded leniently; strict decoding applies when the option is read.
    fn merge_missing(&mut self, other: &Config) -> Result<usize, KonfigError> {
        let default_section = self.options.default_section.clone();
        let other_default = other.options.default_section.clone();
        // Defaults held before this merge; `other`'s own defaults must not
        // shadow its section values.
        let inherited = self.document.defaults.clone();
        let mut copied = 0;

        let names = std::iter::once(default_section.clone()).chain(other.document.sections.keys().cloned());
        for name in names {
            let theirs_name = if name == default_section { other_default.as_str() } else { name.as_str() };
            let Some(theirs) = other.document.section(&other_default, theirs_name) else {
                continue;
            };

            if name != default_section && !self.document.sections.contains_key(&name) {
                self.document.sections.insert(name.clone(), Section::new());
            }

            for (option, theirs_raw) in theirs {
                let present = self
                    .document
                    .section(&default_section, &name)
                    .is_some_and(|ours| ours.contains_key(option))
                    || (name != default_section && inherited.contains_key(option));
                if present {
                    continue;
                }

                let raw = match other.interpolate_for_copy(theirs_name, option, theirs_raw) {
                    Ok(text) => escape_dollars(&codec::encode_exact(&codec::decode(&text))),
                    // Reported when the option is read, not at load.
                    Err(KonfigError::InterpolationDepth { .. }) => theirs_raw.clone(),
                    Err(e) => return Err(e),
                };
                if let Some(ours) = self.document.section_mut(&default_section, &name) {
                    ours.insert(option.clone(), raw);
                    copied += 1;
                }
            }
        }

        Ok(copied)
    }

    fn interpolate_for_copy(&self, section: &str, option: &str, raw: &str) -> Result<String, KonfigError> {
        Interpolator::new(&self.namespace, &self.document, &self.options.default_section)
            .interpolate(section, option, raw)
    }
}
