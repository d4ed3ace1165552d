//! Generator configuration (`weaver.toml`)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use weaver_syntax::PrinterConfig;

use crate::assisted::DEFAULT_ASSISTED_ANNOTATION;
use crate::capabilities::CapabilityFlags;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Target version is not `major` or `major.minor`
    #[error("Invalid target version `{0}`, expected `major.minor`")]
    InvalidTarget(String),
}

/// Top-level generator configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CodeGenConfig {
    /// Target capabilities
    #[serde(default)]
    pub capabilities: CapabilitiesConfig,

    /// Assisted parameter annotation
    #[serde(default)]
    pub assisted: AssistedConfig,

    /// Dispatch body template
    #[serde(default)]
    pub template: TemplateConfig,

    /// Output printer
    #[serde(default)]
    pub printer: PrinterConfig,
}

/// `[capabilities]` section
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CapabilitiesConfig {
    /// Target language version, e.g. `"5.6"` or `"7.4"`
    #[serde(default)]
    pub target: Option<String>,

    /// Explicit override for typed parameters
    #[serde(default)]
    pub typed_parameters: Option<bool>,

    /// Explicit override for return types
    #[serde(default)]
    pub return_types: Option<bool>,
}

/// `[assisted]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AssistedConfig {
    /// Annotation name marking assisted parameters
    #[serde(default = "default_assisted_annotation")]
    pub annotation: String,
}

fn default_assisted_annotation() -> String {
    DEFAULT_ASSISTED_ANNOTATION.to_string()
}

impl Default for AssistedConfig {
    fn default() -> Self {
        Self {
            annotation: default_assisted_annotation(),
        }
    }
}

/// `[template]` section
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TemplateConfig {
    /// Template file; the built-in dispatch template when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl CodeGenConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a file.
    ///
    /// A relative template path is resolved against the config file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;

        if let (Some(template), Some(dir)) = (config.template.path.as_mut(), path.parent()) {
            if template.is_relative() {
                *template = dir.join(&*template);
            }
        }

        Ok(config)
    }

    /// Resolve capability flags: target version first, explicit overrides last
    pub fn capability_flags(&self) -> Result<CapabilityFlags, ConfigError> {
        let caps = &self.capabilities;
        let mut flags = match &caps.target {
            Some(target) => {
                let (major, minor) = parse_target(target)?;
                CapabilityFlags::for_version(major, minor)
            }
            None => CapabilityFlags::default(),
        };

        if let Some(typed) = caps.typed_parameters {
            flags.supports_typed_parameters = typed;
        }
        if let Some(ret) = caps.return_types {
            flags.supports_return_type = ret;
        }

        Ok(flags)
    }
}

fn parse_target(target: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = || ConfigError::InvalidTarget(target.to_string());
    let mut parts = target.trim().split('.');

    let major = parts
        .next()
        .and_then(|p| p.parse::<u32>().ok())
        .ok_or_else(invalid)?;
    let minor = match parts.next() {
        Some(p) => p.parse::<u32>().map_err(|_| invalid())?,
        None => 0,
    };
    // Patch level is accepted and ignored
    if let Some(p) = parts.next() {
        p.parse::<u32>().map_err(|_| invalid())?;
    }
    if parts.next().is_some() {
        return Err(invalid());
    }

    Ok((major, minor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        let config = CodeGenConfig::from_toml_str("").unwrap();
        assert_eq!(config, CodeGenConfig::default());
        assert_eq!(config.capability_flags().unwrap(), CapabilityFlags::unified());
        assert_eq!(config.assisted.annotation, "Assisted");
        assert_eq!(config.printer.indent, "    ");
        assert!(config.template.path.is_none());
    }

    #[test]
    fn test_target_version() {
        let config = CodeGenConfig::from_toml_str("[capabilities]\ntarget = \"5.6\"\n").unwrap();
        assert_eq!(config.capability_flags().unwrap(), CapabilityFlags::legacy());

        let config = CodeGenConfig::from_toml_str("[capabilities]\ntarget = \"7.4.33\"\n").unwrap();
        assert_eq!(config.capability_flags().unwrap(), CapabilityFlags::unified());
    }

    #[test]
    fn test_explicit_flags_override_target() {
        let config = CodeGenConfig::from_toml_str(
            "[capabilities]\ntarget = \"7.0\"\nreturn-types = false\n",
        )
        .unwrap();
        let flags = config.capability_flags().unwrap();
        assert!(flags.supports_typed_parameters);
        assert!(!flags.supports_return_type);
    }

    #[test]
    fn test_invalid_target() {
        for target in ["seven", "7.x", "7.0.1.2", ""] {
            let config = CodeGenConfig {
                capabilities: CapabilitiesConfig {
                    target: Some(target.to_string()),
                    ..CapabilitiesConfig::default()
                },
                ..CodeGenConfig::default()
            };
            assert!(matches!(config.capability_flags(), Err(ConfigError::InvalidTarget(_))), "{target}");
        }
    }

    #[test]
    fn test_full_config() {
        let config = CodeGenConfig::from_toml_str(
            r#"
            [assisted]
            annotation = "Inject"

            [template]
            path = "/opt/weaver/dispatch.php"

            [printer]
            indent = "  "
            return-types = false
            "#,
        )
        .unwrap();
        assert_eq!(config.assisted.annotation, "Inject");
        assert_eq!(config.template.path, Some(PathBuf::from("/opt/weaver/dispatch.php")));
        assert_eq!(config.printer.indent, "  ");
        assert!(!config.printer.return_types);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = CodeGenConfig::from_toml_str("[capabilities]\nscalar-types = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file_resolves_template_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weaver.toml");
        std::fs::write(&path, "[template]\npath = \"tpl/body.php\"\n").unwrap();

        let config = CodeGenConfig::from_file(&path).unwrap();
        assert_eq!(config.template.path, Some(dir.path().join("tpl/body.php")));
    }

    #[test]
    fn test_from_missing_file() {
        let err = CodeGenConfig::from_file(Path::new("/nonexistent/weaver.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
