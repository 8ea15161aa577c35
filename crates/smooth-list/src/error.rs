//! Error types for the list component.

use std::fmt;

use crate::view::ControllerState;

/// Result type alias for list operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which identity keyspace a duplicate was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityScope {
    /// Two sections share an identity.
    Section,
    /// Two items share an identity, in the same section or across sections.
    Item,
}

impl fmt::Display for IdentityScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Section => f.write_str("section"),
            Self::Item => f.write_str("item"),
        }
    }
}

/// What an out-of-range index was pointing at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    /// A section index.
    Section,
    /// A row index inside the given section.
    Row {
        /// The section the row index was resolved against.
        section: usize,
    },
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Section => f.write_str("section"),
            Self::Row { section } => write!(f, "row in section {section}"),
        }
    }
}

/// Errors that can occur while diffing, applying or driving a list.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A snapshot repeats a section or item identity.
    #[error("duplicate {scope} identity {identity}")]
    DuplicateIdentity {
        scope: IdentityScope,
        identity: String,
    },

    /// A changeset references an index the live surface does not have.
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: IndexKind,
        index: usize,
        len: usize,
    },

    /// The surface rejected a transaction because its post-update shape
    /// does not match the data source.
    #[error("inconsistent batch update: {message}")]
    Inconsistent { message: String },

    /// The controller is not in a state that allows the operation.
    #[error("cannot {operation} while controller is {state}")]
    InvalidState {
        state: ControllerState,
        operation: &'static str,
    },

    /// A list configuration document failed to parse.
    #[error("invalid list configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    /// Create a duplicate identity error from any debuggable identity.
    pub fn duplicate(scope: IdentityScope, identity: &impl fmt::Debug) -> Self {
        Self::DuplicateIdentity {
            scope,
            identity: format!("{identity:?}"),
        }
    }

    /// Create an inconsistency error.
    pub fn inconsistent(message: impl Into<String>) -> Self {
        Self::Inconsistent {
            message: message.into(),
        }
    }

    /// Returns `true` for errors that mean the live surface and the retained
    /// snapshot drifted apart.
    pub fn is_desync(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. } | Self::Inconsistent { .. })
    }
}
