//! Error types for the profile layer.

/// Errors that can occur while reading or writing durable profile data.
///
/// Note the asymmetry with the store's public contract: `load` never
/// returns these (missing/corrupt records degrade to a default profile);
/// only `save` and `open` surface them, and callers log rather than
/// propagate.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// Filesystem access failed (create dir, write temp file, rename).
    #[error("profile storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a profile to JSON failed.
    #[error("profile encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}
