//! Target capability flags

/// What the target declaration format can express.
///
/// Fixed for a whole generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityFlags {
    /// Parameter types can be declared with a single type descriptor
    pub supports_typed_parameters: bool,
    /// Return types can be declared
    pub supports_return_type: bool,
}

impl CapabilityFlags {
    /// Both parameter and return types available
    pub const fn unified() -> Self {
        Self {
            supports_typed_parameters: true,
            supports_return_type: true,
        }
    }

    /// Only class, `array` and `callable` parameter hints; no return types
    pub const fn legacy() -> Self {
        Self {
            supports_typed_parameters: false,
            supports_return_type: false,
        }
    }

    /// Flags for a target language version (`major.minor`).
    ///
    /// Scalar parameter types and return types arrived together in 7.0.
    pub const fn for_version(major: u32, _minor: u32) -> Self {
        if major >= 7 {
            Self::unified()
        } else {
            Self::legacy()
        }
    }
}

impl Default for CapabilityFlags {
    fn default() -> Self {
        Self::unified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_version() {
        assert_eq!(CapabilityFlags::for_version(5, 6), CapabilityFlags::legacy());
        assert_eq!(CapabilityFlags::for_version(7, 0), CapabilityFlags::unified());
        assert_eq!(CapabilityFlags::for_version(8, 3), CapabilityFlags::unified());
    }

    #[test]
    fn test_default_is_unified() {
        let flags = CapabilityFlags::default();
        assert!(flags.supports_typed_parameters);
        assert!(flags.supports_return_type);
    }
}
