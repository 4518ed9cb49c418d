// Author: Dustin Pilgrim
// License: MIT

use std::str::Chars;

mod scanner;

/// Syntactic shape of one physical line.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `[name]`
    Header(String),
    /// `key = value` or `key: value`, split on the first delimiter.
    Entry(String, String),
    /// Anything else that is not blank; only valid as a continuation.
    Text,
    Blank,
    Comment,
    Eof,
}

/// A token together with the layout information the parser needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    /// The whole line with surrounding whitespace removed.
    pub text: String,
    /// Number of leading whitespace characters.
    pub indent: usize,
    pub line: usize,
}

pub struct Lexer<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
    comment_prefixes: Vec<String>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_comment_prefixes(input, &["#"])
    }

    pub fn with_comment_prefixes<S: AsRef<str>>(input: &'a str, prefixes: &[S]) -> Self {
        let mut lexer = Lexer {
            input: input.chars(),
            peek: None,
            line: 1,
            comment_prefixes: prefixes.iter().map(|p| p.as_ref().to_string()).collect(),
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Consume one physical line and classify it.
    pub fn next_token(&mut self) -> Spanned {
        let line = self.line;
        if self.peek.is_none() {
            return Spanned { token: Token::Eof, text: String::new(), indent: 0, line };
        }

        let indent = scanner::skip_indent(self);
        let text = scanner::read_to_eol(self).trim().to_string();

        let token = if text.is_empty() {
            Token::Blank
        } else if self.comment_prefixes.iter().any(|p| text.starts_with(p.as_str())) {
            Token::Comment
        } else if text.starts_with('[') {
            classify_header(&text)
        } else if let Some(idx) = text.find(['=', ':']) {
            let key = text[..idx].trim_end().to_string();
            let value = text[idx + 1..].trim_start().to_string();
            Token::Entry(key, value)
        } else {
            Token::Text
        };

        Spanned { token, text, indent, line }
    }
}

/// Only a well-formed `[name]` is a header; anything else bracketed is left
/// for the parser to report, since it may be a continuation line.
fn classify_header(text: &str) -> Token {
    match text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        Some(name) if !name.is_empty() => Token::Header(name.to_string()),
        _ => Token::Text,
    }
}
