//! Error taxonomy shared by the resource model and the registry.

use thiserror::Error;

/// Raised when a resource cannot be built from the supplied fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The code was missing, empty or whitespace only.
    #[error("code must not be empty")]
    BlankCode,

    /// The name was missing, empty or whitespace only.
    #[error("name must not be empty")]
    BlankName,
}

/// Errors returned by [`Registry`](crate::resource::Registry) mutations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Another resource already uses this code.
    #[error("a resource with code {0} already exists")]
    DuplicateCode(String),

    /// The replacement passed to an update carries a different code than the one being updated.
    #[error("replacement code {found} does not match {expected}")]
    CodeMismatch {
        /// Code the caller asked to update.
        expected: String,
        /// Code carried by the replacement resource.
        found: String,
    },
}
