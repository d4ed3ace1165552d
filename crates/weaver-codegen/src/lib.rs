//! Weaver Code Generation
//!
//! Synthesizes proxy method stubs from class metadata and an interceptor
//! binding table. Each stub keeps the original method's calling convention
//! (name, parameter order and names, type constraints, defaults, return type)
//! and replaces the body with a shared interception-dispatch template.
//!
//! - **Metadata**: validated class/method/parameter snapshots (`metadata`)
//! - **Bindings**: method name to interceptor lists (`bind`)
//! - **Assisted**: parameters given a `null` default for runtime injection (`assisted`)
//! - **Template**: the once-loaded dispatch body (`template`)
//! - **Generation**: parameter resolution, method building, method set generation
//!
//! # Example
//!
//! ```rust,ignore
//! use weaver_codegen::{BindingTable, CapabilityFlags, ClassMetadata, ProxyMethodGenerator};
//!
//! let class = ClassMetadata::from_json(&json)?;
//! let mut bindings = BindingTable::new();
//! bindings.bind("run", ["LoggingInterceptor"]);
//!
//! let generator = ProxyMethodGenerator::new(CapabilityFlags::unified());
//! println!("{}", generator.generate_source(&class, &bindings)?);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod assisted;
pub mod bind;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod generator;
pub mod metadata;
pub mod method;
pub mod resolve;
pub mod template;

pub use assisted::{AnnotationAssistedReader, AssistedReader, AssistedSet};
pub use bind::{BindingTable, InterceptorId};
pub use capabilities::CapabilityFlags;
pub use config::{CodeGenConfig, ConfigError};
pub use error::{CodeGenError, CodeGenResult};
pub use generator::ProxyMethodGenerator;
pub use metadata::{
    Annotation, ClassMetadata, MetadataError, MethodMetadata, ParameterMetadata, TypeDescriptor,
    TypeKind, Visibility,
};
pub use method::MethodDeclarationBuilder;
pub use resolve::resolve_parameter;
pub use template::{BodyTemplateProvider, TemplateError, TemplateSource};

// Re-export output types for convenience
pub use weaver_syntax::{Body, Literal, MethodDeclaration, ParameterDeclaration, Printer, PrinterConfig};
