//! Declaration AST
//!
//! Immutable values describing a generated method declaration. They are
//! assembled by the code generator and rendered by [`crate::Printer`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A literal expression usable as a parameter default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Literal {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// Floating point literal
    Float(f64),
    /// String literal (unescaped contents)
    String(String),
    /// Array literal, items in source order
    Array(Vec<ArrayItem>),
    /// Constant reference such as `self::LIMIT` or `PHP_EOL`
    Constant(String),
}

/// One entry of an array literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayItem {
    /// Explicit key, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Literal>,
    /// Item value
    pub value: Literal,
}

impl ArrayItem {
    /// Create a positional item
    pub fn new(value: Literal) -> Self {
        Self { key: None, value }
    }

    /// Create a keyed item
    pub fn keyed(key: Literal, value: Literal) -> Self {
        Self {
            key: Some(key),
            value,
        }
    }
}

impl Literal {
    /// Create a string literal
    pub fn string(value: impl Into<String>) -> Self {
        Literal::String(value.into())
    }

    /// Create a constant reference
    pub fn constant(name: impl Into<String>) -> Self {
        Literal::Constant(name.into())
    }

    /// Check if this is the `null` literal
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Float(x) => {
                if x.is_nan() {
                    write!(f, "NAN")
                } else if x.is_infinite() {
                    write!(f, "{}INF", if *x < 0.0 { "-" } else { "" })
                } else {
                    // Debug keeps the fractional part ("1.0"), so the value stays a float
                    write!(f, "{:?}", x)
                }
            }
            Literal::String(s) => {
                write!(f, "'")?;
                for c in s.chars() {
                    match c {
                        '\\' => write!(f, "\\\\")?,
                        '\'' => write!(f, "\\'")?,
                        _ => write!(f, "{}", c)?,
                    }
                }
                write!(f, "'")
            }
            Literal::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if let Some(key) = &item.key {
                        write!(f, "{} => ", key)?;
                    }
                    write!(f, "{}", item.value)?;
                }
                write!(f, "]")
            }
            Literal::Constant(name) => write!(f, "{}", name),
        }
    }
}

/// An opaque statement of the dispatch body
///
/// Holds the statement's source text with the body's base indentation removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    source: String,
    verbatim_lines: Vec<usize>,
}

impl Stmt {
    /// Create a statement from dedented source text
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_verbatim_lines(source, Vec::new())
    }

    /// Create a statement whose listed lines continue a multi-line string
    /// literal and must not be re-indented
    pub fn with_verbatim_lines(source: impl Into<String>, verbatim_lines: Vec<usize>) -> Self {
        Self {
            source: source.into(),
            verbatim_lines,
        }
    }

    /// Check if a line (zero-based) must be emitted without indentation
    pub fn is_verbatim_line(&self, line: usize) -> bool {
        self.verbatim_lines.contains(&line)
    }

    /// Statement source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source lines of the statement
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.source.split('\n')
    }
}

/// A shared, immutable statement sequence
///
/// Cloning a `Body` shares the underlying allocation, so every stub built
/// from the same template points at the same statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body(Arc<[Stmt]>);

impl Body {
    /// Create a body from statements
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Body(stmts.into())
    }

    /// The statements in order
    pub fn statements(&self) -> &[Stmt] {
        &self.0
    }

    /// Number of statements
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the body has no statements
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if two bodies share the same allocation
    pub fn ptr_eq(&self, other: &Body) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A parameter of a generated method declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDeclaration {
    /// Parameter name, without sigil
    pub name: String,
    /// Type annotation, if expressible
    pub type_hint: Option<String>,
    /// Default expression; `None` keeps the parameter required
    pub default: Option<Literal>,
}

impl ParameterDeclaration {
    /// Create a required, untyped parameter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_hint: None,
            default: None,
        }
    }

    /// Check if the parameter can be omitted by callers
    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }
}

impl fmt::Display for ParameterDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ty) = &self.type_hint {
            write!(f, "{} ", ty)?;
        }
        write!(f, "${}", self.name)?;
        if let Some(default) = &self.default {
            write!(f, " = {}", default)?;
        }
        Ok(())
    }
}

/// A generated method declaration
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDeclaration {
    /// Method name
    pub name: String,
    /// Parameters in declaration order
    pub params: Vec<ParameterDeclaration>,
    /// Return type annotation
    pub return_type: Option<String>,
    /// Statement body
    pub body: Body,
    /// Leading doc comment, verbatim
    pub doc_comment: Option<String>,
}

impl MethodDeclaration {
    /// Parameter names in order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    /// Find a parameter by name
    pub fn param(&self, name: &str) -> Option<&ParameterDeclaration> {
        self.params.iter().find(|p| p.name == name)
    }
}
