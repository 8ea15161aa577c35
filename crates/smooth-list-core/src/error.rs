//! Error types for smooth-list core infrastructure.

/// Errors raised by the core infrastructure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The receiving side of an update channel no longer exists.
    #[error("update queue disconnected: the receiving list has been torn down")]
    Disconnected,
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
