//! Class metadata
//!
//! Read-only snapshots of a class's methods and their signatures, produced by
//! whatever introspection facility the caller has. Construction validates the
//! snapshot so the generator never sees malformed metadata.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use weaver_syntax::Literal;

/// Errors for metadata rejected at construction
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Two methods share a name
    #[error("Class {class} declares method `{method}` more than once")]
    DuplicateMethod {
        /// Class name
        class: String,
        /// Method name
        method: String,
    },

    /// Two parameters of one method share a name
    #[error("Method {class}::{method} declares parameter `{param}` more than once")]
    DuplicateParameter {
        /// Class name
        class: String,
        /// Method name
        method: String,
        /// Parameter name
        param: String,
    },

    /// A parameter's position disagrees with its place in the list
    #[error("Parameter `{param}` of {class}::{method} is listed at {index} but claims position {position}")]
    ParameterPosition {
        /// Class name
        class: String,
        /// Method name
        method: String,
        /// Parameter name
        param: String,
        /// Index in the parameter list
        index: usize,
        /// Position recorded on the parameter
        position: usize,
    },

    /// JSON could not be decoded
    #[error("Failed to parse class metadata: {0}")]
    Json(#[from] serde_json::Error),
}

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Callable from anywhere
    Public,
    /// Callable from the class and subclasses
    Protected,
    /// Callable from the class only
    Private,
}

/// Type kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// A class or interface name
    Class,
    /// `array`
    Array,
    /// `callable`
    Callable,
    /// A builtin scalar or pseudo type (`int`, `string`, `bool`, `mixed`, ...)
    Scalar,
    /// A union; `name` holds the full textual form
    Union,
}

/// Declared type of a parameter or return value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Type kind
    pub kind: TypeKind,
    /// Type name as reported by the introspection source
    pub name: String,
    /// Whether `null` is also accepted
    #[serde(default)]
    pub allows_null: bool,
}

impl TypeDescriptor {
    fn with_kind(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            allows_null: false,
        }
    }

    /// A class type
    pub fn class(name: impl Into<String>) -> Self {
        Self::with_kind(TypeKind::Class, name)
    }

    /// The `array` type
    pub fn array() -> Self {
        Self::with_kind(TypeKind::Array, "array")
    }

    /// The `callable` type
    pub fn callable() -> Self {
        Self::with_kind(TypeKind::Callable, "callable")
    }

    /// A scalar or pseudo type
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::with_kind(TypeKind::Scalar, name)
    }

    /// A union type from its members
    pub fn union<S: AsRef<str>>(members: &[S]) -> Self {
        let name = members.iter().map(|m| m.as_ref()).collect::<Vec<_>>().join("|");
        Self::with_kind(TypeKind::Union, name)
    }

    /// Mark the type as also accepting `null`
    pub fn nullable(mut self) -> Self {
        self.allows_null = true;
        self
    }

    /// Class name, if this is a class type
    pub fn class_name(&self) -> Option<&str> {
        (self.kind == TypeKind::Class).then_some(self.name.as_str())
    }

    /// Check if only array values are accepted
    pub fn is_array_only(&self) -> bool {
        self.kind == TypeKind::Array
    }

    /// Check if only callables are accepted
    pub fn is_callable_only(&self) -> bool {
        self.kind == TypeKind::Callable
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Unions spell out `null` as a member instead
        if self.allows_null && self.kind != TypeKind::Union && !self.name.starts_with('?') {
            write!(f, "?")?;
        }
        write!(f, "{}", self.name)
    }
}

/// An annotation attached to a method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation class name
    pub name: String,
    /// Listed values
    #[serde(default)]
    pub values: Vec<String>,
}

impl Annotation {
    /// Create an annotation
    pub fn new<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parameter metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterMetadata {
    /// Parameter name
    pub name: String,
    /// Zero-based position
    pub position: usize,
    /// Declared type
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<TypeDescriptor>,
    /// Default value, present only if the parameter has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
}

impl ParameterMetadata {
    /// Create a required, untyped parameter
    pub fn new(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            position,
            declared_type: None,
            default: None,
        }
    }

    /// Set the declared type
    pub fn with_type(mut self, ty: TypeDescriptor) -> Self {
        self.declared_type = Some(ty);
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: Literal) -> Self {
        self.default = Some(value);
        self
    }

    /// Check if a default value is available
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Method metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodMetadata {
    /// Method name
    pub name: String,
    /// Visibility
    pub visibility: Visibility,
    /// Parameters in declaration order
    #[serde(default)]
    pub parameters: Vec<ParameterMetadata>,
    /// Declared return type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeDescriptor>,
    /// Doc comment text, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,
    /// Annotations on the method
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl MethodMetadata {
    /// Create a method with no parameters
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            visibility,
            parameters: Vec::new(),
            return_type: None,
            doc_comment: None,
            annotations: Vec::new(),
        }
    }

    /// Create a public method
    pub fn public(name: impl Into<String>) -> Self {
        Self::new(name, Visibility::Public)
    }

    /// Append a parameter; its position is taken from the list length
    pub fn param(mut self, name: impl Into<String>, configure: impl FnOnce(ParameterMetadata) -> ParameterMetadata) -> Self {
        let position = self.parameters.len();
        self.parameters.push(configure(ParameterMetadata::new(name, position)));
        self
    }

    /// Set the return type
    pub fn returns(mut self, ty: TypeDescriptor) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Set the doc comment
    pub fn with_doc_comment(mut self, doc: impl Into<String>) -> Self {
        self.doc_comment = Some(doc.into());
        self
    }

    /// Attach an annotation
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Check if the method is public
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// Class metadata: a validated, ordered list of methods
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetadata {
    name: String,
    methods: Vec<MethodMetadata>,
}

#[derive(Deserialize)]
struct RawClassMetadata {
    name: String,
    #[serde(default)]
    methods: Vec<MethodMetadata>,
}

impl ClassMetadata {
    /// Create class metadata, rejecting duplicate or misnumbered members
    pub fn new(name: impl Into<String>, methods: Vec<MethodMetadata>) -> Result<Self, MetadataError> {
        let name = name.into();
        let mut seen_methods = FxHashSet::default();

        for method in &methods {
            if !seen_methods.insert(method.name.as_str()) {
                return Err(MetadataError::DuplicateMethod {
                    class: name,
                    method: method.name.clone(),
                });
            }

            let mut seen_params = FxHashSet::default();
            for (index, param) in method.parameters.iter().enumerate() {
                if !seen_params.insert(param.name.as_str()) {
                    return Err(MetadataError::DuplicateParameter {
                        class: name,
                        method: method.name.clone(),
                        param: param.name.clone(),
                    });
                }
                if param.position != index {
                    return Err(MetadataError::ParameterPosition {
                        class: name,
                        method: method.name.clone(),
                        param: param.name.clone(),
                        index,
                        position: param.position,
                    });
                }
            }
        }

        Ok(Self { name, methods })
    }

    /// Decode and validate metadata from JSON
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        let raw: RawClassMetadata = serde_json::from_str(json)?;
        Self::new(raw.name, raw.methods)
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Methods in declaration order
    pub fn methods(&self) -> &[MethodMetadata] {
        &self.methods
    }

    /// Look up a method by name
    pub fn method(&self, name: &str) -> Option<&MethodMetadata> {
        self.methods.iter().find(|m| m.name == name)
    }
}
