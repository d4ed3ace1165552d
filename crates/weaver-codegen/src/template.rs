//! Dispatch body template loading
//!
//! The dispatch body is read and parsed at most once per provider and then
//! shared by every generated stub. The default provider is process-wide, so
//! the built-in template is parsed at most once per process.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use thiserror::Error;
use tracing::trace;
use weaver_syntax::{parse_body, Body, TemplateParseError};

/// Built-in dispatch template, embedded at compile time
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/dispatch.php");

static DEFAULT_PROVIDER: Lazy<Arc<BodyTemplateProvider>> =
    Lazy::new(|| Arc::new(BodyTemplateProvider::inline(DEFAULT_TEMPLATE)));

/// Errors loading the dispatch body template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template file could not be read
    #[error("Failed to read template {path}: {source}")]
    Io {
        /// Template path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Template text could not be parsed
    #[error("Failed to parse template {origin}: {source}")]
    Parse {
        /// Template path, or `<inline>`
        origin: String,
        /// Underlying error
        source: TemplateParseError,
    },
}

/// Where the template text comes from
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// A file read on first use
    File(PathBuf),
    /// Template text held in memory
    Inline(Cow<'static, str>),
}

impl TemplateSource {
    fn origin(&self) -> String {
        match self {
            TemplateSource::File(path) => path.display().to_string(),
            TemplateSource::Inline(_) => "<inline>".to_string(),
        }
    }

    fn read(&self) -> Result<Cow<'_, str>, TemplateError> {
        match self {
            TemplateSource::File(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| TemplateError::Io {
                    path: path.clone(),
                    source,
                }),
            TemplateSource::Inline(text) => Ok(Cow::Borrowed(&**text)),
        }
    }
}

/// Loads the dispatch body once and hands out shared copies
#[derive(Debug)]
pub struct BodyTemplateProvider {
    source: TemplateSource,
    body: OnceCell<Body>,
}

impl BodyTemplateProvider {
    /// Provider for a template source
    pub fn new(source: TemplateSource) -> Self {
        Self {
            source,
            body: OnceCell::new(),
        }
    }

    /// Provider reading a template file
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self::new(TemplateSource::File(path.as_ref().to_path_buf()))
    }

    /// Provider for in-memory template text
    pub fn inline(text: impl Into<Cow<'static, str>>) -> Self {
        Self::new(TemplateSource::Inline(text.into()))
    }

    /// The process-wide provider for the built-in template
    pub fn shared_default() -> Arc<BodyTemplateProvider> {
        Arc::clone(&DEFAULT_PROVIDER)
    }

    /// Template source
    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Get the dispatch body, loading it on first call.
    ///
    /// Every successful call returns a clone sharing the same statements.
    /// A failed load is not cached; the error is returned to the caller.
    pub fn get_body(&self) -> Result<Body, TemplateError> {
        self.body.get_or_try_init(|| self.load()).cloned()
    }

    /// Check if the body has already been loaded
    pub fn is_loaded(&self) -> bool {
        self.body.get().is_some()
    }

    fn load(&self) -> Result<Body, TemplateError> {
        let origin = self.source.origin();
        trace!(template = %origin, "loading dispatch body template");

        let text = self.source.read()?;
        let body = parse_body(&text).map_err(|source| TemplateError::Parse { origin, source })?;

        trace!(statements = body.len(), "dispatch body template parsed");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_parses() {
        let provider = BodyTemplateProvider::shared_default();
        let body = provider.get_body().unwrap();

        assert_eq!(body.len(), 5);
        assert!(body.statements()[0].source().starts_with("if (! isset($this->bindings[__FUNCTION__]))"));
        assert_eq!(body.statements()[4].source(), "return $result;");
        assert!(provider.is_loaded());
    }

    #[test]
    fn test_default_template_is_embedded() {
        let provider = BodyTemplateProvider::shared_default();
        assert!(matches!(provider.source(), TemplateSource::Inline(text) if &**text == DEFAULT_TEMPLATE));
        assert!(DEFAULT_TEMPLATE.contains("public function dispatch()"));
    }

    #[test]
    fn test_shared_default_is_one_provider() {
        let a = BodyTemplateProvider::shared_default();
        let b = BodyTemplateProvider::shared_default();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.get_body().unwrap().ptr_eq(&b.get_body().unwrap()));
    }

    #[test]
    fn test_body_is_loaded_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.php");
        std::fs::write(&path, "<?php function t() { return 1; }").unwrap();

        let provider = BodyTemplateProvider::from_file(&path);
        assert!(!provider.is_loaded());
        let first = provider.get_body().unwrap();

        // Later changes to the file are not observed
        std::fs::remove_file(&path).unwrap();
        let second = provider.get_body().unwrap();
        assert!(first.ptr_eq(&second));
    }

    #[test]
    fn test_missing_file() {
        let provider = BodyTemplateProvider::from_file("/nonexistent/dispatch.php");
        let err = provider.get_body().unwrap_err();
        assert!(matches!(err, TemplateError::Io { .. }));
        assert!(!provider.is_loaded());
    }

    #[test]
    fn test_unparseable_template() {
        let provider = BodyTemplateProvider::inline("<?php $a = 1;");
        let err = provider.get_body().unwrap_err();
        assert!(matches!(
            err,
            TemplateError::Parse { ref origin, source: TemplateParseError::MissingMethod } if origin == "<inline>"
        ));
    }

    #[test]
    fn test_concurrent_first_use() {
        let provider = Arc::new(BodyTemplateProvider::inline("function t() { a(); b(); }"));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let provider = Arc::clone(&provider);
                std::thread::spawn(move || provider.get_body().unwrap())
            })
            .collect();

        let bodies: Vec<Body> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(bodies.iter().all(|b| b.ptr_eq(&bodies[0])));
        assert_eq!(bodies[0].len(), 2);
    }
}
