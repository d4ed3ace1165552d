//! Body template parsing
//!
//! A body template is a source file declaring (at least) one method. The
//! top-level statements of the first method's body become the statement
//! sequence injected into every generated stub.

use thiserror::Error;

use crate::ast::{Body, Stmt};
use crate::lexer::{tokenize, Spanned, TemplateToken};

/// Keywords that continue a statement after its block closes
const CONTINUATION_KEYWORDS: &[&str] = &["else", "elseif", "catch", "finally"];

/// Errors raised while parsing a body template
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateParseError {
    #[error("Unexpected character at offset {offset}")]
    UnexpectedCharacter { offset: usize },

    #[error("Template does not declare a method")]
    MissingMethod,

    #[error("Template method `{name}` has no body")]
    MissingBody { name: String },

    #[error("Unbalanced `{delimiter}` at offset {offset}")]
    Unbalanced { delimiter: char, offset: usize },

    #[error("Statement starting at offset {offset} is not terminated")]
    UnterminatedStatement { offset: usize },

    #[error("Template method body is not closed")]
    UnterminatedBody,
}

/// Parse a template and return the body of its first method
pub fn parse_body(source: &str) -> Result<Body, TemplateParseError> {
    let tokens = tokenize(source).map_err(|offset| TemplateParseError::UnexpectedCharacter { offset })?;
    let start = find_body_start(source, &tokens)?;
    let stmts = split_statements(source, &tokens[start..])?;
    Ok(Body::new(stmts))
}

/// Locate the token index just past the first method's opening brace
fn find_body_start(source: &str, tokens: &[Spanned]) -> Result<usize, TemplateParseError> {
    let fn_index = tokens
        .iter()
        .enumerate()
        .position(|(i, t)| {
            t.token == TemplateToken::Function
                && tokens.get(i + 1).map(|n| n.token) == Some(TemplateToken::Ident)
        })
        .ok_or(TemplateParseError::MissingMethod)?;
    let name = source[tokens[fn_index + 1].span.clone()].to_string();

    let mut paren_depth = 0usize;
    for (i, t) in tokens.iter().enumerate().skip(fn_index + 2) {
        match t.token {
            TemplateToken::LParen => paren_depth += 1,
            TemplateToken::RParen => {
                paren_depth = paren_depth.checked_sub(1).ok_or(TemplateParseError::Unbalanced {
                    delimiter: ')',
                    offset: t.span.start,
                })?;
            }
            TemplateToken::LBrace if paren_depth == 0 => return Ok(i + 1),
            TemplateToken::Semicolon if paren_depth == 0 => {
                return Err(TemplateParseError::MissingBody { name });
            }
            _ => {}
        }
    }
    Err(TemplateParseError::MissingBody { name })
}

/// Split body tokens into top-level statements, stopping at the closing brace
fn split_statements(source: &str, tokens: &[Spanned]) -> Result<Vec<Stmt>, TemplateParseError> {
    let mut stmts = Vec::new();
    let mut start: Option<usize> = None;
    // One entry per open brace: whether it opened a statement block
    let mut braces: Vec<bool> = Vec::new();
    let mut paren_depth = 0usize;

    for (i, t) in tokens.iter().enumerate() {
        if t.token == TemplateToken::RBrace && braces.is_empty() && paren_depth == 0 {
            if let Some(s) = start {
                if tokens[s..i].iter().any(|p| !p.token.is_comment()) {
                    return Err(TemplateParseError::UnterminatedStatement {
                        offset: tokens[s].span.start,
                    });
                }
                // Trailing comments are kept as their own statement
                stmts.push(make_stmt(source, &tokens[s..i]));
            }
            return Ok(stmts);
        }

        let s = *start.get_or_insert(i);
        let ends = match t.token {
            TemplateToken::LParen => {
                paren_depth += 1;
                false
            }
            TemplateToken::RParen => {
                paren_depth = paren_depth.checked_sub(1).ok_or(TemplateParseError::Unbalanced {
                    delimiter: ')',
                    offset: t.span.start,
                })?;
                false
            }
            TemplateToken::LBrace => {
                braces.push(opens_block(i.checked_sub(1).map(|p| &tokens[p])));
                false
            }
            TemplateToken::RBrace => {
                let block = braces.pop().ok_or(TemplateParseError::Unbalanced {
                    delimiter: '}',
                    offset: t.span.start,
                })?;
                block && braces.is_empty() && paren_depth == 0 && !continues(source, &tokens[s..=i], tokens.get(i + 1))
            }
            TemplateToken::Semicolon => braces.is_empty() && paren_depth == 0,
            _ => false,
        };

        if ends {
            stmts.push(make_stmt(source, &tokens[s..=i]));
            start = None;
        }
    }

    Err(TemplateParseError::UnterminatedBody)
}

/// Check whether a `{` after `prev` opens a statement block.
///
/// Blocks follow `)` (`if (..) {`), a keyword (`else {`, `try {`) or a
/// return type; braces after `->`, `::` or `$` are expression syntax.
fn opens_block(prev: Option<&Spanned>) -> bool {
    matches!(
        prev.map(|t| t.token),
        Some(TemplateToken::RParen) | Some(TemplateToken::Ident)
    )
}

/// Check whether the token after a closing brace extends the statement
fn continues(source: &str, stmt: &[Spanned], next: Option<&Spanned>) -> bool {
    let word = |t: &Spanned| source[t.span.clone()].to_ascii_lowercase();
    match next {
        // Closure assigned or returned: `$f = function () { ... };`
        Some(t) if t.token == TemplateToken::Semicolon => true,
        Some(t) if t.token == TemplateToken::Ident => {
            let next_word = word(t);
            if next_word == "while" {
                // Only `do { ... } while (...);`
                return stmt
                    .iter()
                    .find(|t| !t.token.is_comment())
                    .is_some_and(|first| first.token == TemplateToken::Ident && word(first) == "do");
            }
            CONTINUATION_KEYWORDS.contains(&next_word.as_str())
        }
        _ => false,
    }
}

/// Build a statement from its tokens, removing the base indentation.
///
/// Lines that start inside a multi-line string literal are kept verbatim and
/// marked so the printer does not re-indent them. Lines that end inside one
/// keep their trailing whitespace.
fn make_stmt(source: &str, tokens: &[Spanned]) -> Stmt {
    let (first, last) = match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Stmt::new(""),
    };
    let line_start = source[..first.span.start].rfind('\n').map_or(0, |p| p + 1);
    let base = source[line_start..first.span.start].chars().count();

    let strings: Vec<_> = tokens
        .iter()
        .filter(|t| t.token == TemplateToken::StringLiteral)
        .map(|t| t.span.clone())
        .collect();
    let in_string = |offset: usize| strings.iter().any(|s| s.start < offset && offset < s.end);

    let mut text = String::with_capacity(last.span.end - first.span.start);
    let mut verbatim = Vec::new();
    let mut offset = first.span.start;
    for (i, line) in source[first.span.start..last.span.end].split('\n').enumerate() {
        let line_end = offset + line.len();
        let line = if i == 0 {
            line
        } else if in_string(offset) {
            verbatim.push(i);
            line
        } else {
            let strip = line
                .char_indices()
                .take(base)
                .take_while(|(_, c)| *c == ' ' || *c == '\t')
                .count();
            &line[strip..]
        };

        if i > 0 {
            text.push('\n');
        }
        text.push_str(if in_string(line_end) { line } else { line.trim_end() });
        offset = line_end + 1;
    }

    Stmt::with_verbatim_lines(text, verbatim)
}
