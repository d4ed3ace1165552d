//! Method declaration building

use tracing::debug;
use weaver_syntax::{Body, MethodDeclaration, PrinterFeatures};

use crate::assisted::AssistedSet;
use crate::capabilities::CapabilityFlags;
use crate::metadata::MethodMetadata;
use crate::resolve::resolve_parameter;

/// Builds proxy stub declarations for single methods.
///
/// Holds the run-wide settings; [`MethodDeclarationBuilder::build`] is pure.
#[derive(Debug, Clone)]
pub struct MethodDeclarationBuilder {
    flags: CapabilityFlags,
    features: PrinterFeatures,
    body: Body,
}

impl MethodDeclarationBuilder {
    /// Create a builder for one generation run
    pub fn new(flags: CapabilityFlags, features: PrinterFeatures, body: Body) -> Self {
        Self { flags, features, body }
    }

    /// Capability flags in effect
    pub fn flags(&self) -> CapabilityFlags {
        self.flags
    }

    /// Build the stub declaration for a method.
    ///
    /// Capability flags are the ones passed to [`MethodDeclarationBuilder::new`].
    pub fn build(&self, method: &MethodMetadata, assisted: &AssistedSet) -> MethodDeclaration {
        let params = method
            .parameters
            .iter()
            .map(|p| resolve_parameter(p, assisted, self.flags))
            .collect();

        MethodDeclaration {
            name: method.name.clone(),
            params,
            return_type: self.return_type(method),
            body: self.body.clone(),
            doc_comment: method.doc_comment.clone(),
        }
    }

    fn return_type(&self, method: &MethodMetadata) -> Option<String> {
        if !self.flags.supports_return_type {
            return None;
        }
        let ty = method.return_type.as_ref()?;
        if !self.features.return_types {
            debug!(method = %method.name, return_type = %ty, "printer cannot emit return types; omitting");
            return None;
        }
        Some(ty.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{TypeDescriptor, Visibility};
    use weaver_syntax::{Literal, Stmt};

    fn body() -> Body {
        Body::new(vec![Stmt::new("return 1;")])
    }

    fn builder(flags: CapabilityFlags, return_types: bool) -> MethodDeclarationBuilder {
        MethodDeclarationBuilder::new(flags, PrinterFeatures { return_types }, body())
    }

    fn typed_run() -> MethodMetadata {
        MethodMetadata::public("run")
            .param("a", |p| p.with_type(TypeDescriptor::scalar("string")))
            .param("b", |p| p.with_type(TypeDescriptor::scalar("int")))
            .returns(TypeDescriptor::array())
    }

    #[test]
    fn test_parameters_keep_order() {
        let method = MethodMetadata::new("run", Visibility::Public)
            .param("z", |p| p)
            .param("a", |p| p.with_default(Literal::Int(0)))
            .param("m", |p| p);
        let decl = builder(CapabilityFlags::unified(), true).build(&method, &AssistedSet::empty());

        assert_eq!(decl.name, "run");
        assert_eq!(decl.param_names().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_return_type_when_supported() {
        let decl = builder(CapabilityFlags::unified(), true).build(&typed_run(), &AssistedSet::empty());
        assert_eq!(decl.return_type.as_deref(), Some("array"));
    }

    #[test]
    fn test_return_type_omitted_by_flags() {
        let flags = CapabilityFlags {
            supports_typed_parameters: true,
            supports_return_type: false,
        };
        let decl = builder(flags, true).build(&typed_run(), &AssistedSet::empty());
        assert_eq!(decl.return_type, None);
        assert_eq!(decl.params[0].type_hint.as_deref(), Some("string"));
    }

    #[test]
    fn test_return_type_omitted_when_printer_lacks_support() {
        let decl = builder(CapabilityFlags::unified(), false).build(&typed_run(), &AssistedSet::empty());
        assert_eq!(decl.return_type, None);
    }

    #[test]
    fn test_return_type_for_method_without_parameters() {
        let method = MethodMetadata::public("count").returns(TypeDescriptor::scalar("int"));
        let decl = builder(CapabilityFlags::unified(), true).build(&method, &AssistedSet::empty());
        assert!(decl.params.is_empty());
        assert_eq!(decl.return_type.as_deref(), Some("int"));
    }

    #[test]
    fn test_doc_comment_copied_verbatim() {
        let doc = "/**\n     * Sends   the mail.\n     *\n     * @param string $to\n     */";
        let method = MethodMetadata::public("send").with_doc_comment(doc);
        let b = builder(CapabilityFlags::unified(), true);

        assert_eq!(b.build(&method, &AssistedSet::empty()).doc_comment.as_deref(), Some(doc));
        assert_eq!(b.build(&typed_run(), &AssistedSet::empty()).doc_comment, None);
    }

    #[test]
    fn test_body_is_shared() {
        let b = builder(CapabilityFlags::unified(), true);
        let first = b.build(&typed_run(), &AssistedSet::empty());
        let second = b.build(&MethodMetadata::public("other"), &AssistedSet::empty());
        assert!(first.body.ptr_eq(&second.body));
    }
}
