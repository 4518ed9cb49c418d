use super::*;

impl Config {
    /// Get the typed value of `option` in `section`.
    ///
    /// Options of the default section are visible from every section. The
    /// raw text is interpolated against the variable snapshot taken at load
    /// time and then decoded.
    ///
    /// # Examples
    /// ```no_run
    /// # use konfig::{Config, Value};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = Config::from_file("app.ini")?;
    /// if let Value::Integer(port) = config.get("server", "port")? {
    ///     println!("port {}", port);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// `SectionNotFound` / `OptionNotFound` when the pair does not exist,
    /// `InterpolationDepth` for self-referencing placeholders, and
    /// `ValueDecode` in strict mode.
    pub fn get(&self, section: &str, option: &str) -> Result<Value, KonfigError> {
        self.ensure_section(section)?;
        let raw = self
            .document
            .raw(&self.options.default_section, section, option)
            .ok_or_else(|| KonfigError::OptionNotFound {
                section: section.to_string(),
                option: option.to_string(),
                hint: Some(format!(
                    "Define it in [{}] or [{}]",
                    section, self.options.default_section
                )),
                code: Some(201),
            })?;
        self.read_raw(section, option, raw)
    }

    /// Get a value converted to a Rust type.
    ///
    /// ```no_run
    /// # use konfig::Config;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = Config::from_file("app.ini")?;
    /// let debug: bool = config.get_as("app", "debug")?;
    /// let hosts: Vec<String> = config.get_as("app", "hosts")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_as<T>(&self, section: &str, option: &str) -> Result<T, KonfigError>
    where
        T: TryFrom<Value, Error = KonfigError>,
    {
        T::try_from(self.get(section, option)?).map_err(|e| match e {
            KonfigError::TypeError { message, hint, code } => KonfigError::TypeError {
                message: format!("{} (at {}.{})", message, section, option),
                hint,
                code,
            },
            other => other,
        })
    }

    /// Like [`Config::get_as`], but a missing section or option is `Ok(None)`.
    pub fn get_optional<T>(&self, section: &str, option: &str) -> Result<Option<T>, KonfigError>
    where
        T: TryFrom<Value, Error = KonfigError>,
    {
        match self.get_as(section, option) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn get_or<T>(&self, section: &str, option: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = KonfigError>,
    {
        self.get_as(section, option).unwrap_or(default)
    }

    /// Get a value as a sequence; a scalar comes back as a one-element list.
    pub fn get_list(&self, section: &str, option: &str) -> Result<Vec<Value>, KonfigError> {
        Ok(self.get(section, option)?.into_list())
    }

    /// Non-default section names in file order.
    pub fn sections(&self) -> Vec<&str> {
        self.document.sections.keys().map(String::as_str).collect()
    }

    pub fn has_section(&self, section: &str) -> bool {
        section == self.options.default_section || self.document.sections.contains_key(section)
    }

    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.has_section(section)
            && self
                .document
                .raw(&self.options.default_section, section, option)
                .is_some()
    }

    /// Option names visible in `section`: its own first, then inherited defaults.
    pub fn options(&self, section: &str) -> Result<Vec<String>, KonfigError> {
        self.ensure_section(section)?;
        let mut names: Vec<String> = Vec::new();
        if section != self.options.default_section {
            if let Some(own) = self.document.sections.get(section) {
                names.extend(own.keys().cloned());
            }
        }
        for name in self.document.defaults.keys() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Ok(names)
    }

    /// Every visible option of `section` with its typed value.
    pub fn items(&self, section: &str) -> Result<Vec<(String, Value)>, KonfigError> {
        self.options(section)?
            .into_iter()
            .map(|name| -> Result<(String, Value), KonfigError> {
                let value = self.get(section, &name)?;
                Ok((name, value))
            })
            .collect()
    }

    /// Store a value, encoding it to raw text first.
    pub fn set(&mut self, section: &str, option: &str, value: impl Into<Value>) -> Result<(), KonfigError> {
        self.ensure_section(section)?;
        let raw = codec::encode(&value.into());
        let default_section = self.options.default_section.clone();
        if let Some(target) = self.document.section_mut(&default_section, section) {
            target.insert(option.to_string(), raw);
        }
        Ok(())
    }

    /// Returns `false` if the section already exists.
    pub fn add_section(&mut self, section: &str) -> bool {
        if self.has_section(section) {
            return false;
        }
        self.document.sections.insert(section.to_string(), Default::default());
        true
    }

    /// Remove an option defined directly in `section`. Inherited defaults are untouched.
    pub fn remove_option(&mut self, section: &str, option: &str) -> bool {
        let default_section = self.options.default_section.clone();
        self.document
            .section_mut(&default_section, section)
            .is_some_and(|s| s.shift_remove(option).is_some())
    }

    fn ensure_section(&self, section: &str) -> Result<(), KonfigError> {
        if self.has_section(section) {
            Ok(())
        } else {
            Err(KonfigError::SectionNotFound {
                section: section.to_string(),
                hint: Some(format!("Available sections: {}", self.sections().join(", "))),
                code: Some(202),
            })
        }
    }
}
