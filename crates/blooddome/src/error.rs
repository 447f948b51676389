//! Unified error type for the facade.

use blooddome_profile::ProfileError;

/// Top-level error for core construction and explicit persistence.
///
/// Command-surface operations never return this — they signal refusal
/// through [`crate::OpOutcome`] instead. `CoreError` only surfaces from
/// calls where an I/O failure is actionable by the host, like opening
/// the data directory at startup.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A profile store error (open, read, write).
    #[error(transparent)]
    Profile(#[from] ProfileError),
}
