// Author: Dustin Pilgrim
// License: MIT

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::Value;
use crate::KonfigError;

static LOOKS_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]").expect("valid regex"));

/// How to treat text that looks like an integer but does not parse as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Keep it as a string.
    #[default]
    Lenient,
    /// Report a `ValueDecode` error.
    Strict,
}

/// Decode raw (already interpolated) text, never failing.
pub fn decode(raw: &str) -> Value {
    match decode_with(raw, DecodeMode::Lenient) {
        Ok(value) => value,
        Err(_) => Value::String(raw.trim().to_string()),
    }
}

/// Decode raw text into a typed value.
///
/// Order of the checks:
/// 1. digit-led text (optionally negative) that parses as `i64` is an integer
/// 2. `"..."` is a string with exactly one quote stripped from each end
/// 3. `true` / `false` in any case is a boolean
/// 4. text spanning several lines is a list, each non-empty line decoded by 1-3
/// 5. anything else is a string
pub fn decode_with(raw: &str, mode: DecodeMode) -> Result<Value, KonfigError> {
    if raw.contains('\n') {
        let text = raw.trim();
        if let Some(inner) = unquote(text) {
            return Ok(Value::String(inner.to_string()));
        }
        let items = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| decode_scalar(line, mode))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Value::List(items));
    }
    decode_scalar(raw.trim(), mode)
}

fn decode_scalar(text: &str, mode: DecodeMode) -> Result<Value, KonfigError> {
    if LOOKS_NUMERIC.is_match(text) {
        return match text.parse::<i64>() {
            Ok(n) => Ok(Value::Integer(n)),
            Err(e) if mode == DecodeMode::Strict => Err(KonfigError::ValueDecode {
                raw: text.to_string(),
                message: format!("looks like an integer but {}", e),
                hint: Some("Quote the value to keep it as text".into()),
                code: Some(401),
            }),
            Err(_) => Ok(Value::String(text.to_string())),
        };
    }

    if let Some(inner) = unquote(text) {
        return Ok(Value::String(inner.to_string()));
    }

    match text.to_lowercase().as_str() {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => Ok(Value::String(text.to_string())),
    }
}

fn unquote(text: &str) -> Option<&str> {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

/// Encode a value into the raw text stored in a section.
pub fn encode(value: &Value) -> String {
    match value {
        Value::List(items) => {
            let body = items
                .iter()
                .map(|item| format!("    {}", encode_scalar(item)))
                .collect::<Vec<_>>()
                .join("\n");
            if items.len() == 1 {
                // a lone element keeps its leading newline so it reads back as a list
                format!("\n{}", body.trim_end())
            } else {
                body.trim().to_string()
            }
        }
        scalar => encode_scalar(scalar),
    }
}

/// Like [`encode`], but quotes strings that would otherwise read back as
/// another type (`"12"`, `"true"`, padded text), so decoding the result
/// always gives `value` again.
pub fn encode_exact(value: &Value) -> String {
    match value {
        Value::String(s) => quote_if_ambiguous(s),
        Value::List(items) => encode(&Value::List(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Value::String(quote_if_ambiguous(s)),
                    other => other.clone(),
                })
                .collect(),
        )),
        scalar => encode(scalar),
    }
}

fn quote_if_ambiguous(s: &str) -> String {
    if decode(s).as_str() == Some(s) {
        s.to_string()
    } else {
        format!("\"{}\"", s)
    }
}

fn encode_scalar(value: &Value) -> String {
    match value {
        Value::Bool(b) => if *b { "true".into() } else { "false".into() },
        Value::Integer(n) => n.to_string(),
        Value::String(s) => s.clone(),
        nested @ Value::List(_) => nested.to_string(),
    }
}
