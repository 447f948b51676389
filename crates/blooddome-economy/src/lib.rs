//! The token economy for Blooddome.
//!
//! Two pieces:
//!
//! - [`TokenLedger`] — a view over the session table that awards,
//!   spends, and sets token balances with underflow made impossible
//!   (balances are `u64` and a spend is refused before it would dip
//!   below zero)
//! - [`DiceWager`] — the dice mini-game: bet tokens against the house,
//!   double-or-nothing with a refund on a tie, behind a per-player
//!   cooldown
//!
//! # How it fits in the stack
//!
//! ```text
//!   blooddome (facade)
//!        │ calls
//!        ▼
//!   TokenLedger / DiceWager ──── mutate ───→ blooddome-session
//! ```
//!
//! All operations target connected players only; the ledger never
//! touches disk itself. Persisting a changed balance is the caller's
//! job (the facade saves after every successful mutation).

mod error;
mod ledger;
mod wager;

pub use error::WagerDenied;
pub use ledger::TokenLedger;
pub use wager::{DiceRoll, DiceWager, WagerOutcome};
