//! Proxy method set generation
//!
//! Walks a class's methods in declaration order and emits a stub for every
//! public method that has interceptors bound to it.
//!
//! ## Usage
//!
//! ```ignore
//! let mut bindings = BindingTable::new();
//! bindings.bind("run", ["LoggingInterceptor"]);
//!
//! let generator = ProxyMethodGenerator::new(CapabilityFlags::unified());
//! let source = generator.generate_source(&class, &bindings)?;
//! ```

use std::sync::Arc;

use tracing::{debug, trace};
use weaver_syntax::{MethodDeclaration, Printer};

use crate::assisted::{AnnotationAssistedReader, AssistedReader};
use crate::bind::BindingTable;
use crate::capabilities::CapabilityFlags;
use crate::config::CodeGenConfig;
use crate::error::CodeGenResult;
use crate::metadata::ClassMetadata;
use crate::method::MethodDeclarationBuilder;
use crate::template::BodyTemplateProvider;

/// Generates proxy stub declarations for a class
pub struct ProxyMethodGenerator {
    flags: CapabilityFlags,
    printer: Printer,
    reader: Box<dyn AssistedReader>,
    template: Arc<BodyTemplateProvider>,
}

impl ProxyMethodGenerator {
    /// Generator with the built-in template, default printer and `Assisted` annotation
    pub fn new(flags: CapabilityFlags) -> Self {
        Self {
            flags,
            printer: Printer::default(),
            reader: Box::new(AnnotationAssistedReader::default()),
            template: BodyTemplateProvider::shared_default(),
        }
    }

    /// Generator configured from a [`CodeGenConfig`]
    pub fn from_config(config: &CodeGenConfig) -> CodeGenResult<Self> {
        let template = match &config.template.path {
            Some(path) => Arc::new(BodyTemplateProvider::from_file(path)),
            None => BodyTemplateProvider::shared_default(),
        };

        Ok(Self {
            flags: config.capability_flags()?,
            printer: Printer::new(config.printer.clone()),
            reader: Box::new(AnnotationAssistedReader::new(config.assisted.annotation.clone())),
            template,
        })
    }

    /// Replace the assisted parameter reader
    pub fn with_reader(mut self, reader: impl AssistedReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    /// Replace the body template provider
    pub fn with_template(mut self, template: Arc<BodyTemplateProvider>) -> Self {
        self.template = template;
        self
    }

    /// Replace the printer
    pub fn with_printer(mut self, printer: Printer) -> Self {
        self.printer = printer;
        self
    }

    /// Capability flags in effect
    pub fn flags(&self) -> CapabilityFlags {
        self.flags
    }

    /// The printer used by [`ProxyMethodGenerator::generate_source`]
    pub fn printer(&self) -> &Printer {
        &self.printer
    }

    /// Generate stub declarations in the class's method order.
    ///
    /// Unbound and non-public methods are skipped. Fails only when the
    /// dispatch body template cannot be loaded.
    pub fn generate(&self, class: &ClassMetadata, bindings: &BindingTable) -> CodeGenResult<Vec<MethodDeclaration>> {
        let body = self.template.get_body()?;
        let builder = MethodDeclarationBuilder::new(self.flags, self.printer.features(), body);
        let bound = bindings.bound_methods();

        let mut stmts = Vec::new();
        for method in class.methods() {
            if !bound.contains(method.name.as_str()) {
                trace!(class = class.name(), method = %method.name, "not bound; skipping");
                continue;
            }
            if !method.is_public() {
                trace!(class = class.name(), method = %method.name, visibility = ?method.visibility, "not public; skipping");
                continue;
            }

            let assisted = self.reader.read(method);
            stmts.push(builder.build(method, &assisted));
        }

        debug!(
            class = class.name(),
            methods = class.methods().len(),
            generated = stmts.len(),
            "generated proxy methods"
        );
        Ok(stmts)
    }

    /// Generate and print the stubs, separated by blank lines
    pub fn generate_source(&self, class: &ClassMetadata, bindings: &BindingTable) -> CodeGenResult<String> {
        let methods = self.generate(class, bindings)?;
        Ok(self.printer.print_methods(&methods))
    }
}
