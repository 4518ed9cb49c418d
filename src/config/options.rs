use crate::codec::DecodeMode;
use crate::parser::DEFAULT_SECTION;

/// Load-time settings. They are handed down unchanged to every file pulled in
/// through `extends`.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub default_section: String,
    pub comment_prefixes: Vec<String>,
    pub decode_mode: DecodeMode,
    /// Replaces the process environment when set.
    pub environment: Option<Vec<(String, String)>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_section: DEFAULT_SECTION.to_string(),
            comment_prefixes: vec!["#".to_string()],
            decode_mode: DecodeMode::Lenient,
            environment: None,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_section(mut self, name: impl Into<String>) -> Self {
        self.default_section = name.into();
        self
    }

    pub fn comment_prefixes<S: AsRef<str>>(mut self, prefixes: &[S]) -> Self {
        self.comment_prefixes = prefixes.iter().map(|p| p.as_ref().to_string()).collect();
        self
    }

    pub fn strict_decoding(mut self, strict: bool) -> Self {
        self.decode_mode = if strict { DecodeMode::Strict } else { DecodeMode::Lenient };
        self
    }

    pub fn with_environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }
}
