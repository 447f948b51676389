//! Why a wager was refused.

use thiserror::Error;

/// A dice wager that never ran. Nothing was deducted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WagerDenied {
    /// The player has no session (not connected).
    #[error("player is not connected")]
    NotConnected,

    /// The bet is outside the configured range.
    #[error("bet must be between {min} and {max} tokens")]
    BetOutOfRange { min: u64, max: u64 },

    /// The per-player cooldown since the last wager has not elapsed.
    #[error("wager cooldown active, {remaining_secs}s remaining")]
    Cooldown { remaining_secs: u64 },

    /// The player cannot cover the bet.
    #[error("insufficient tokens to cover the bet")]
    InsufficientTokens,
}
