use std::fmt;

/// The main error type for loading and reading configuration files.
#[derive(Debug, Clone, PartialEq)]
pub enum KonfigError {
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a load target or an `extends` entry does not exist.
    FileNotFound {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    SectionNotFound {
        section: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    OptionNotFound {
        section: String,
        option: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when placeholders keep expanding past the depth limit.
    InterpolationDepth {
        section: String,
        option: String,
        depth: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Only produced when strict decoding is enabled.
    ValueDecode {
        raw: String,
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    TypeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl KonfigError {
    pub fn code(&self) -> Option<u32> {
        match self {
            KonfigError::SyntaxError { code, .. }
            | KonfigError::FileNotFound { code, .. }
            | KonfigError::FileError { code, .. }
            | KonfigError::SectionNotFound { code, .. }
            | KonfigError::OptionNotFound { code, .. }
            | KonfigError::InterpolationDepth { code, .. }
            | KonfigError::ValueDecode { code, .. }
            | KonfigError::TypeError { code, .. } => *code,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            KonfigError::SectionNotFound { .. } | KonfigError::OptionNotFound { .. }
        )
    }
}

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

impl fmt::Display for KonfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KonfigError::SyntaxError { message, line, column, hint, code } =>
                write!(f, "[KONFIG] Syntax Error at {}:{}: {}{}",
                    line, column, message, suffix(hint, code)),
            KonfigError::FileNotFound { path, hint, code } =>
                write!(f, "[KONFIG] No such file: '{}'{}", path, suffix(hint, code)),
            KonfigError::FileError { message, path, hint, code } =>
                write!(f, "[KONFIG] File Error '{}': {}{}", path, message, suffix(hint, code)),
            KonfigError::SectionNotFound { section, hint, code } =>
                write!(f, "[KONFIG] No section: '{}'{}", section, suffix(hint, code)),
            KonfigError::OptionNotFound { section, option, hint, code } =>
                write!(f, "[KONFIG] No option '{}' in section '{}'{}",
                    option, section, suffix(hint, code)),
            KonfigError::InterpolationDepth { section, option, depth, hint, code } =>
                write!(f, "[KONFIG] Interpolation of '{}.{}' exceeded depth {}{}",
                    section, option, depth, suffix(hint, code)),
            KonfigError::ValueDecode { raw, message, hint, code } =>
                write!(f, "[KONFIG] Cannot decode '{}': {}{}", raw, message, suffix(hint, code)),
            KonfigError::TypeError { message, hint, code } =>
                write!(f, "[KONFIG] Type Error: {}{}", message, suffix(hint, code)),
        }
    }
}

impl std::error::Error for KonfigError {}
