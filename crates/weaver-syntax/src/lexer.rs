//! Lexer for body templates.
//!
//! The template only needs to be split into statements, so the token set is
//! coarse: delimiters, strings and comments are distinguished, everything
//! else is an identifier, variable, number or punctuation.

use std::ops::Range;

use logos::Logos;

/// Template token kinds
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateToken {
    // Whitespace (skip)
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Whitespace,

    #[token("<?php")]
    OpenTag,

    #[token("?>")]
    CloseTag,

    #[regex(r"//[^\n]*")]
    #[regex(r"#[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"'([^'\\]|\\.)*'")]
    #[regex(r#""([^"\\]|\\.)*""#)]
    StringLiteral,

    #[token("function")]
    Function,

    #[regex(r"[a-zA-Z_\\][a-zA-Z0-9_\\]*")]
    Ident,

    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_]*")]
    Variable,

    #[regex(r"[0-9][0-9_]*(\.[0-9]+)?")]
    Number,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(";")]
    Semicolon,

    #[token("/")]
    Slash,

    // Any other single character: operators, `$`, `?`, `:`, `,`, ...
    #[regex(r#"[^ \t\r\n\fa-zA-Z0-9_\\{}();'"/#]"#)]
    Punct,
}

impl TemplateToken {
    /// Check if the token is a comment
    pub fn is_comment(self) -> bool {
        matches!(self, TemplateToken::LineComment | TemplateToken::BlockComment)
    }
}

/// Consume a block comment body up to and including `*/`
fn block_comment(lex: &mut logos::Lexer<'_, TemplateToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

/// A token with its byte range in the template source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    /// Token kind
    pub token: TemplateToken,
    /// Byte range in the source
    pub span: Range<usize>,
}

/// Tokenize template source.
///
/// Returns the byte offset of the first character no token matches.
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, usize> {
    let mut tokens = Vec::new();
    for (result, span) in TemplateToken::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push(Spanned { token, span }),
            Err(()) => return Err(span.start),
        }
    }
    Ok(tokens)
}
