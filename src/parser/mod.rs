use crate::lexer::{Lexer, Spanned, Token};
use crate::KonfigError;
use crate::ast::Document;

mod document;

pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Builds the raw, uninterpolated [`Document`] out of INI text.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peek: Option<Spanned>,
    default_section: String,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_settings(input, DEFAULT_SECTION, &["#"])
    }

    pub fn with_settings<S: AsRef<str>>(
        input: &'a str,
        default_section: &str,
        comment_prefixes: &[S],
    ) -> Self {
        let mut lexer = Lexer::with_comment_prefixes(input, comment_prefixes);
        let peek = Some(lexer.next_token());
        Self {
            lexer,
            peek,
            default_section: default_section.to_string(),
        }
    }

    pub(crate) fn bump(&mut self) -> Spanned {
        let curr = self.peek.take().unwrap_or_else(|| Spanned {
            token: Token::Eof,
            text: String::new(),
            indent: 0,
            line: self.lexer.line(),
        });
        if curr.token != Token::Eof {
            self.peek = Some(self.lexer.next_token());
        }
        curr
    }

    pub(crate) fn default_section(&self) -> &str {
        &self.default_section
    }

    pub fn parse_document(&mut self) -> Result<Document, KonfigError> {
        document::parse_document(self)
    }
}
