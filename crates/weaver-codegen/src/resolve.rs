//! Parameter declaration resolution

use weaver_syntax::{Literal, ParameterDeclaration};

use crate::assisted::AssistedSet;
use crate::capabilities::CapabilityFlags;
use crate::metadata::ParameterMetadata;

/// Resolve the declaration of one parameter.
///
/// With typed parameters the declared type is copied verbatim. Without them
/// only class names, `array` and `callable` can be expressed.
///
/// An explicit default always wins; otherwise an assisted parameter becomes
/// optional with a `null` default, and anything else stays required.
pub fn resolve_parameter(
    param: &ParameterMetadata,
    assisted: &AssistedSet,
    flags: CapabilityFlags,
) -> ParameterDeclaration {
    let type_hint = if flags.supports_typed_parameters {
        param.declared_type.as_ref().map(|ty| ty.to_string())
    } else {
        legacy_type_hint(param)
    };

    let default = match &param.default {
        Some(value) => Some(value.clone()),
        None if assisted.contains(&param.name) => Some(Literal::Null),
        None => None,
    };

    ParameterDeclaration {
        name: param.name.clone(),
        type_hint,
        default,
    }
}

fn legacy_type_hint(param: &ParameterMetadata) -> Option<String> {
    let ty = param.declared_type.as_ref()?;
    if let Some(class) = ty.class_name() {
        Some(class.to_string())
    } else if ty.is_array_only() {
        Some("array".to_string())
    } else if ty.is_callable_only() {
        Some("callable".to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::TypeDescriptor;
    use weaver_syntax::ArrayItem;

    const UNIFIED: CapabilityFlags = CapabilityFlags::unified();
    const LEGACY: CapabilityFlags = CapabilityFlags::legacy();

    fn param(name: &str) -> ParameterMetadata {
        ParameterMetadata::new(name, 0)
    }

    #[test]
    fn test_unified_copies_declared_type() {
        let none = AssistedSet::empty();
        let cases = [
            (TypeDescriptor::scalar("string"), "string"),
            (TypeDescriptor::class("App\\Logger"), "App\\Logger"),
            (TypeDescriptor::scalar("int").nullable(), "?int"),
            (TypeDescriptor::union(&["int", "float"]), "int|float"),
            (TypeDescriptor::array(), "array"),
        ];
        for (ty, expected) in cases {
            let decl = resolve_parameter(&param("x").with_type(ty), &none, UNIFIED);
            assert_eq!(decl.type_hint.as_deref(), Some(expected));
        }

        let decl = resolve_parameter(&param("x"), &none, UNIFIED);
        assert_eq!(decl.type_hint, None);
    }

    #[test]
    fn test_legacy_type_hints() {
        let none = AssistedSet::empty();

        let decl = resolve_parameter(&param("x").with_type(TypeDescriptor::class("Foo").nullable()), &none, LEGACY);
        assert_eq!(decl.type_hint.as_deref(), Some("Foo"));

        let decl = resolve_parameter(&param("x").with_type(TypeDescriptor::array()), &none, LEGACY);
        assert_eq!(decl.type_hint.as_deref(), Some("array"));

        let decl = resolve_parameter(&param("x").with_type(TypeDescriptor::callable()), &none, LEGACY);
        assert_eq!(decl.type_hint.as_deref(), Some("callable"));

        for ty in [TypeDescriptor::scalar("int"), TypeDescriptor::union(&["int", "string"])] {
            let decl = resolve_parameter(&param("x").with_type(ty), &none, LEGACY);
            assert_eq!(decl.type_hint, None);
        }

        let decl = resolve_parameter(&param("x"), &none, LEGACY);
        assert_eq!(decl.type_hint, None);
    }

    #[test]
    fn test_explicit_default_wins_over_assisted() {
        let assisted: AssistedSet = ["x"].into_iter().collect();
        let value = Literal::Array(vec![ArrayItem::new(Literal::Int(1))]);

        for flags in [UNIFIED, LEGACY] {
            let decl = resolve_parameter(&param("x").with_default(value.clone()), &assisted, flags);
            assert_eq!(decl.default, Some(value.clone()));
        }
    }

    #[test]
    fn test_assisted_gets_null_default() {
        let assisted: AssistedSet = ["x"].into_iter().collect();
        for flags in [UNIFIED, LEGACY] {
            let decl = resolve_parameter(&param("x"), &assisted, flags);
            assert_eq!(decl.default, Some(Literal::Null));
        }
    }

    #[test]
    fn test_plain_parameter_stays_required() {
        let assisted: AssistedSet = ["other"].into_iter().collect();
        let decl = resolve_parameter(&param("x"), &assisted, UNIFIED);
        assert_eq!(decl.default, None);
        assert!(!decl.is_optional());
        assert_eq!(decl.name, "x");
    }

    #[test]
    fn test_constant_default_preserved() {
        let decl = resolve_parameter(
            &param("mode").with_default(Literal::constant("self::MODE_FAST")),
            &AssistedSet::empty(),
            UNIFIED,
        );
        assert_eq!(decl.to_string(), "$mode = self::MODE_FAST");
    }
}
