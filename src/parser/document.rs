use std::collections::HashSet;

use super::*;
use crate::ast::Section;

/// The option currently collecting continuation lines.
struct Pending {
    section: String,
    option: String,
    lines: Vec<String>,
}

pub(super) fn parse_document(parser: &mut Parser) -> Result<Document, KonfigError> {
    let default_section = parser.default_section().to_string();
    let mut doc = Document::default();

    let mut current: Option<String> = None;
    let mut pending: Option<Pending> = None;
    let mut indent_level = 0;
    let mut seen_sections: HashSet<String> = HashSet::new();
    let mut seen_options: HashSet<(String, String)> = HashSet::new();

    loop {
        let tok = parser.bump();
        match tok.token {
            Token::Eof => break,
            // Comments neither end nor extend a value.
            Token::Comment => continue,
            Token::Blank => {
                if let Some(p) = pending.as_mut() {
                    p.lines.push(String::new());
                }
                continue;
            }
            _ => {}
        }

        if let Some(p) = pending.as_mut() {
            if tok.indent > indent_level {
                p.lines.push(tok.text);
                continue;
            }
        }

        let orphan_continuation = pending.is_none() && tok.indent > 0;
        if let Some(p) = pending.take() {
            store(&mut doc, &default_section, p);
        }
        indent_level = tok.indent;

        match tok.token {
            Token::Header(name) => {
                if name != default_section {
                    if !seen_sections.insert(name.clone()) {
                        return Err(KonfigError::SyntaxError {
                            message: format!("Section '{}' already exists", name),
                            line: tok.line,
                            column: tok.indent + 1,
                            hint: Some("Merge the duplicate sections into one".into()),
                            code: Some(102),
                        });
                    }
                    doc.sections.entry(name.clone()).or_insert_with(Section::new);
                }
                current = Some(name);
            }
            Token::Entry(key, value) => {
                let Some(section) = current.clone() else {
                    return Err(missing_header(&tok.text, tok.line, tok.indent));
                };
                if key.is_empty() {
                    return Err(KonfigError::SyntaxError {
                        message: format!("Option without a name: {}", tok.text),
                        line: tok.line,
                        column: tok.indent + 1,
                        hint: Some("Use `name = value`".into()),
                        code: Some(105),
                    });
                }
                if !seen_options.insert((section.clone(), key.clone())) {
                    return Err(KonfigError::SyntaxError {
                        message: format!("Option '{}' in section '{}' already exists", key, section),
                        line: tok.line,
                        column: tok.indent + 1,
                        hint: Some("Remove the duplicate option".into()),
                        code: Some(103),
                    });
                }
                pending = Some(Pending { section, option: key, lines: vec![value] });
            }
            Token::Text => {
                if current.is_none() {
                    return Err(missing_header(&tok.text, tok.line, tok.indent));
                }
                let (message, hint, code) = if orphan_continuation {
                    (format!("Continuation line with no option to continue: {}", tok.text),
                     "Put an option line above it or remove the indentation", 104)
                } else if tok.text.starts_with('[') {
                    (format!("Malformed section header: {}", tok.text),
                     "Indent the line to continue the previous value", 106)
                } else {
                    (format!("Expected `name = value`, got: {}", tok.text),
                     "Indent the line to continue the previous value", 105)
                };
                return Err(KonfigError::SyntaxError {
                    message,
                    line: tok.line,
                    column: tok.indent + 1,
                    hint: Some(hint.into()),
                    code: Some(code),
                });
            }
            Token::Blank | Token::Comment | Token::Eof => unreachable!(),
        }
    }

    if let Some(p) = pending.take() {
        store(&mut doc, &default_section, p);
    }

    Ok(doc)
}

fn store(doc: &mut Document, default_section: &str, pending: Pending) {
    let value = pending.lines.join("\n").trim_end().to_string();
    if let Some(section) = doc.section_mut(default_section, &pending.section) {
        section.insert(pending.option, value);
    }
}

fn missing_header(text: &str, line: usize, indent: usize) -> KonfigError {
    KonfigError::SyntaxError {
        message: format!("File contains no section headers: {}", text),
        line,
        column: indent + 1,
        hint: Some("Start the file with a [section] header".into()),
        code: Some(101),
    }
}
