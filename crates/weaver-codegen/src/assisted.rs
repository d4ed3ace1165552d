//! Assisted parameter annotations
//!
//! An assisted parameter is supplied at runtime by an injection mechanism
//! rather than by the caller. Generated stubs give such parameters a `null`
//! default so callers may omit them.

use rustc_hash::FxHashSet;

use crate::metadata::MethodMetadata;

/// Default annotation name marking assisted parameters
pub const DEFAULT_ASSISTED_ANNOTATION: &str = "Assisted";

/// Parameter names marked assisted on one method
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistedSet {
    names: FxHashSet<String>,
}

impl AssistedSet {
    /// The empty set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if a parameter name is assisted
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no names are assisted
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AssistedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Source of assisted parameter sets
pub trait AssistedReader: Send + Sync {
    /// Read the assisted set of a method; empty when not annotated
    fn read(&self, method: &MethodMetadata) -> AssistedSet;
}

/// Reads assisted names from a method annotation by name.
///
/// Matches either the exact annotation name or a namespaced name ending in
/// `\<name>`. Values from every matching annotation are merged.
#[derive(Debug, Clone)]
pub struct AnnotationAssistedReader {
    annotation: String,
}

impl AnnotationAssistedReader {
    /// Create a reader for the given annotation name
    pub fn new(annotation: impl Into<String>) -> Self {
        Self {
            annotation: annotation.into(),
        }
    }

    /// Annotation name this reader matches
    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    fn matches(&self, name: &str) -> bool {
        name == self.annotation
            || name
                .strip_suffix(self.annotation.as_str())
                .is_some_and(|prefix| prefix.ends_with('\\'))
    }
}

impl Default for AnnotationAssistedReader {
    fn default() -> Self {
        Self::new(DEFAULT_ASSISTED_ANNOTATION)
    }
}

impl AssistedReader for AnnotationAssistedReader {
    fn read(&self, method: &MethodMetadata) -> AssistedSet {
        method
            .annotations
            .iter()
            .filter(|a| self.matches(&a.name))
            .flat_map(|a| a.values.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Annotation;

    #[test]
    fn test_no_annotation_is_empty() {
        let method = MethodMetadata::public("run").param("a", |p| p);
        assert!(AnnotationAssistedReader::default().read(&method).is_empty());
    }

    #[test]
    fn test_reads_listed_names() {
        let method = MethodMetadata::public("run")
            .param("a", |p| p)
            .annotate(Annotation::new("Assisted", ["b", "c"]));
        let set = AnnotationAssistedReader::default().read(&method);

        assert_eq!(set.len(), 2);
        assert!(set.contains("b"));
        assert!(set.contains("c"));
        assert!(!set.contains("a"));
    }

    #[test]
    fn test_namespaced_annotation() {
        let method = MethodMetadata::public("run")
            .annotate(Annotation::new("Ray\\Di\\Di\\Assisted", ["db"]))
            .annotate(Annotation::new("NotAssisted", ["x"]));
        let set = AnnotationAssistedReader::default().read(&method);

        assert!(set.contains("db"));
        assert!(!set.contains("x"));
    }

    #[test]
    fn test_custom_annotation_name() {
        let method = MethodMetadata::public("run")
            .annotate(Annotation::new("Assisted", ["a"]))
            .annotate(Annotation::new("Inject", ["b"]));
        let set = AnnotationAssistedReader::new("Inject").read(&method);

        assert!(set.contains("b"));
        assert!(!set.contains("a"));
    }
}
