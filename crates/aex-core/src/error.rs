//! Error types for the codec.

use crate::scene::SceneError;
use thiserror::Error;

/// Main error type for read and write calls.
#[derive(Error, Debug)]
pub enum AexError {
    /// A scene object or document tag outside the known kinds
    #[error("Unrecognized type: {0}")]
    UnrecognizedType(String),

    /// A property whose value category has no document form
    #[error("Property '{match_name}' of type {value_type} is not supported.")]
    UnsupportedProperty {
        match_name: String,
        value_type: String,
    },

    /// A create/update combination that is not implemented
    #[error("{0}")]
    NotSupportedOperation(String),

    /// A required argument was missing
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// The host rejected a read or write
    #[error("Host error: {0}")]
    Host(#[from] SceneError),

    /// A document property has no live counterpart
    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    /// Malformed document payload
    #[error("Invalid document: {0}")]
    Json(#[from] serde_json::Error),
}

impl AexError {
    /// `Creating a '<node>' under a '<parent>' is not supported`.
    pub fn cannot_create(parent: &str, node: &str) -> Self {
        AexError::NotSupportedOperation(format!(
            "Creating a '{node}' under a '{parent}' is not supported"
        ))
    }

    /// `Updating a '<target>' from a '<node>' is not supported`.
    pub fn cannot_update(target: &str, node: &str) -> Self {
        AexError::NotSupportedOperation(format!(
            "Updating a '{target}' from a '{node}' is not supported"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_supported_messages_name_both_kinds() {
        let create = AexError::cannot_create("aex:layer:av", "aex:item:av:comp");
        assert_eq!(
            create.to_string(),
            "Creating a 'aex:item:av:comp' under a 'aex:layer:av' is not supported"
        );

        let update = AexError::cannot_update("aex:layer:null", "aex:layer:camera");
        assert_eq!(
            update.to_string(),
            "Updating a 'aex:layer:null' from a 'aex:layer:camera' is not supported"
        );
    }
}
