//! Block location by brace-depth scanning.
//!
//! This crate owns *where* a declaration lives in a source buffer; it does
//! not own how the buffer is mutated (that's `declfix-edit`). Blocks are
//! re-located by scan on every access and never cached by position.
//!
//! Scanning is not a parser: it finds the declaration keyword by plain
//! substring search, then counts `{`/`}` depth from the first brace after
//! it. A minimal lexer state machine skips braces that occur inside string
//! literals and comments, so `description: "se{ja}"` or a commented-out
//! field cannot unbalance the count.

use declfix_types::span::Span;

/// Declaration keyword searched by [`locate_block`].
///
/// The needle is `"<keyword> <name>"`, which also matches `export interface`
/// headers since the search is substring-based. The first match wins;
/// uniqueness of declaration names is assumed, not enforced.
pub const DEFAULT_KEYWORD: &str = "interface";

/// Locate the named declaration block, returning the span from its first
/// `{` (inclusive) to the matching `}` (inclusive of that brace).
///
/// Returns `None` when the declaration header never occurs, or when no
/// brace follows it. On text whose braces never re-balance the span extends
/// to the end of the buffer.
pub fn locate_block(text: &str, name: &str) -> Option<Span> {
    locate_block_with(text, DEFAULT_KEYWORD, name)
}

/// [`locate_block`] with an explicit declaration keyword, for sources that
/// spell their record-like declarations differently (`type`, `enum`, ...).
pub fn locate_block_with(text: &str, keyword: &str, name: &str) -> Option<Span> {
    let needle = format!("{keyword} {name}");
    let decl = text.find(&needle)?;
    let brace = next_code_brace(text, decl + needle.len())?;
    let end = matching_close(text, brace);
    Some(Span::new(brace, end))
}

/// Raw text of the named block, for inspection.
pub fn block_text<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    locate_block(text, name).map(|span| span.slice(text))
}

/// Lexer states for skipping string/comment literals during the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lex {
    Code,
    LineComment,
    BlockComment,
    Single,
    Double,
    Template,
}

/// Walk `text` from byte offset `from`, invoking `on_brace` for every brace
/// in code position with its byte index. Stops early when the callback
/// returns `Some`.
fn scan_code<T>(text: &str, from: usize, mut on_brace: impl FnMut(usize, char) -> Option<T>) -> Option<T> {
    let mut state = Lex::Code;
    let mut chars = text[from..].char_indices().peekable();

    while let Some((off, c)) = chars.next() {
        let i = from + off;
        match state {
            Lex::Code => match c {
                '/' => match chars.peek().map(|&(_, n)| n) {
                    Some('/') => {
                        chars.next();
                        state = Lex::LineComment;
                    }
                    Some('*') => {
                        chars.next();
                        state = Lex::BlockComment;
                    }
                    _ => {}
                },
                '\'' => state = Lex::Single,
                '"' => state = Lex::Double,
                '`' => state = Lex::Template,
                '{' | '}' => {
                    if let Some(out) = on_brace(i, c) {
                        return Some(out);
                    }
                }
                _ => {}
            },
            Lex::LineComment => {
                if c == '\n' {
                    state = Lex::Code;
                }
            }
            Lex::BlockComment => {
                if c == '*' && chars.peek().map(|&(_, n)| n) == Some('/') {
                    chars.next();
                    state = Lex::Code;
                }
            }
            Lex::Single => match c {
                '\\' => {
                    chars.next();
                }
                // Plain string literals do not span lines; treat a stray
                // newline as the end of the literal rather than derailing
                // the rest of the scan.
                '\'' | '\n' => state = Lex::Code,
                _ => {}
            },
            Lex::Double => match c {
                '\\' => {
                    chars.next();
                }
                '"' | '\n' => state = Lex::Code,
                _ => {}
            },
            Lex::Template => match c {
                '\\' => {
                    chars.next();
                }
                '`' => state = Lex::Code,
                _ => {}
            },
        }
    }

    None
}

/// Byte index of the first code-position `{` at or after `from`.
fn next_code_brace(text: &str, from: usize) -> Option<usize> {
    scan_code(text, from, |i, c| if c == '{' { Some(i) } else { None })
}

/// One past the `}` matching the `{` at `brace`, or `text.len()` when the
/// braces never re-balance.
fn matching_close(text: &str, brace: usize) -> usize {
    let mut depth: usize = 0;
    scan_code(text, brace, |i, c| {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        None
    })
    .unwrap_or(text.len())
}
