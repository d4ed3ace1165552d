//! Pretty-printing for method declarations
//!
//! Renders [`MethodDeclaration`] values as source text suitable for pasting
//! into a generated proxy class.

use serde::{Deserialize, Serialize};

use crate::ast::{MethodDeclaration, ParameterDeclaration};

/// Printer settings, loaded from `[printer]` in the generator config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PrinterConfig {
    /// One level of indentation
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Whether the output format can express return types
    #[serde(default = "default_true")]
    pub return_types: bool,
}

fn default_indent() -> String {
    "    ".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            return_types: default_true(),
        }
    }
}

/// Emission capabilities of a printer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterFeatures {
    /// Return-type annotations can be emitted
    pub return_types: bool,
}

impl Default for PrinterFeatures {
    fn default() -> Self {
        Self { return_types: true }
    }
}

/// Source printer for generated declarations
#[derive(Debug, Clone, Default)]
pub struct Printer {
    config: PrinterConfig,
}

impl Printer {
    /// Create a printer with the given settings
    pub fn new(config: PrinterConfig) -> Self {
        Self { config }
    }

    /// What this printer is able to emit
    pub fn features(&self) -> PrinterFeatures {
        PrinterFeatures {
            return_types: self.config.return_types,
        }
    }

    /// Render the signature line, e.g. `public function run($a, $b = null) : array`
    pub fn print_signature(&self, method: &MethodDeclaration) -> String {
        let params: Vec<String> = method.params.iter().map(|p| self.print_parameter(p)).collect();
        let mut line = format!("public function {}({})", method.name, params.join(", "));
        if let Some(ret) = method.return_type.as_ref().filter(|_| self.config.return_types) {
            line.push_str(" : ");
            line.push_str(ret);
        }
        line
    }

    /// Render one parameter
    pub fn print_parameter(&self, param: &ParameterDeclaration) -> String {
        param.to_string()
    }

    /// Render a full method: doc comment, signature and body
    pub fn print_method(&self, method: &MethodDeclaration) -> String {
        let mut output = String::new();

        if let Some(doc) = &method.doc_comment {
            output.push_str(doc);
            output.push('\n');
        }

        output.push_str(&self.print_signature(method));
        output.push_str("\n{\n");

        for stmt in method.body.statements() {
            for (i, line) in stmt.lines().enumerate() {
                if !line.is_empty() && !stmt.is_verbatim_line(i) {
                    output.push_str(&self.config.indent);
                    output.push_str(line);
                }
                output.push('\n');
            }
        }

        output.push_str("}\n");
        output
    }

    /// Render a sequence of methods separated by blank lines
    pub fn print_methods(&self, methods: &[MethodDeclaration]) -> String {
        methods
            .iter()
            .map(|m| self.print_method(m))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
