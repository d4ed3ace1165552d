//! Code generation errors

use thiserror::Error;

use crate::config::ConfigError;
use crate::metadata::MetadataError;
use crate::template::TemplateError;

/// Result alias for generator operations
pub type CodeGenResult<T> = Result<T, CodeGenError>;

/// Errors that abort a generation run
#[derive(Debug, Error)]
pub enum CodeGenError {
    /// The dispatch body template could not be loaded
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Class metadata was rejected
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Configuration was invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}
