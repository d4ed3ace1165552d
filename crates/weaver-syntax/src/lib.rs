//! Weaver Syntax
//!
//! The output side of proxy stub generation:
//! - **AST**: immutable method and parameter declarations (`ast`)
//! - **Template**: lexer and statement splitter for dispatch body templates (`template`)
//! - **Printer**: renders declarations as source text (`printer`)
//!
//! # Example
//!
//! ```rust,ignore
//! use weaver_syntax::{parse_body, Printer};
//!
//! let body = parse_body(template_source)?;
//! let text = Printer::default().print_methods(&declarations);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod ast;
#[allow(missing_docs)]
pub mod lexer;
pub mod printer;
#[allow(missing_docs)]
pub mod template;

pub use ast::{ArrayItem, Body, Literal, MethodDeclaration, ParameterDeclaration, Stmt};
pub use printer::{Printer, PrinterConfig, PrinterFeatures};
pub use template::{parse_body, TemplateParseError};
