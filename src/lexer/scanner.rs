use super::*;

/// Advance the character iterator and update line tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if curr == Some('\n') {
        lexer.line += 1;
    }
    lexer.peek = lexer.input.next();
    curr
}

/// Skip leading spaces and tabs, returning how many were skipped
pub(super) fn skip_indent(lexer: &mut Lexer) -> usize {
    let mut count = 0;
    while let Some(' ' | '\t') = lexer.peek {
        bump(lexer);
        count += 1;
    }
    count
}

/// Collect the rest of the current line, consuming the newline
pub(super) fn read_to_eol(lexer: &mut Lexer) -> String {
    let mut out = String::new();
    while let Some(c) = bump(lexer) {
        if c == '\n' {
            break;
        }
        out.push(c);
    }
    out
}
