//! Interceptor binding table
//!
//! Maps method names to the interceptors applied to them. Only membership is
//! consulted during generation; the interceptor lists are carried for the
//! runtime that dispatches them.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

/// Identifier of an interceptor (typically its class name)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterceptorId(String);

impl InterceptorId {
    /// Create an identifier
    pub fn new(id: impl Into<String>) -> Self {
        InterceptorId(id.into())
    }

    /// Identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InterceptorId {
    fn from(id: &str) -> Self {
        InterceptorId::new(id)
    }
}

impl From<String> for InterceptorId {
    fn from(id: String) -> Self {
        InterceptorId(id)
    }
}

impl fmt::Display for InterceptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Method name to interceptor list mapping
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    bindings: FxHashMap<String, Vec<InterceptorId>>,
}

impl BindingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind interceptors to a method, replacing any previous list
    pub fn bind<I, T>(&mut self, method: impl Into<String>, interceptors: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<InterceptorId>,
    {
        self.bindings
            .insert(method.into(), interceptors.into_iter().map(Into::into).collect());
        self
    }

    /// Bound method names
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Bound method names as a set
    pub fn bound_methods(&self) -> FxHashSet<&str> {
        self.keys().collect()
    }

    /// Check if a method is bound
    pub fn is_bound(&self, method: &str) -> bool {
        self.bindings.contains_key(method)
    }

    /// Interceptors bound to a method, in order
    pub fn interceptors(&self, method: &str) -> Option<&[InterceptorId]> {
        self.bindings.get(method).map(Vec::as_slice)
    }

    /// Number of bound methods
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if no method is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
