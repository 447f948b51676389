//! Token balance operations over the session table.

use blooddome_profile::PlayerId;
use blooddome_session::SessionTable;

/// A short-lived view over the session table for balance changes.
///
/// Borrow one where tokens change hands, mutate, drop it. Balances are
/// `u64`, so a negative balance cannot be represented; [`spend`] checks
/// the balance first and refuses rather than underflow, and [`award`]
/// saturates at `u64::MAX` rather than wrap.
///
/// Every mutating method returns `false` without side effects when the
/// player is not connected — offline players' balances live on disk and
/// are not reachable through the ledger.
///
/// [`spend`]: TokenLedger::spend
/// [`award`]: TokenLedger::award
pub struct TokenLedger<'a> {
    table: &'a mut SessionTable,
}

impl<'a> TokenLedger<'a> {
    pub fn new(table: &'a mut SessionTable) -> Self {
        Self { table }
    }

    /// The player's current balance, or 0 if they are not connected.
    pub fn balance(&self, player_id: PlayerId) -> u64 {
        self.table
            .get(player_id)
            .map(|s| s.profile.tokens)
            .unwrap_or(0)
    }

    /// Adds tokens to a connected player's balance.
    pub fn award(&mut self, player_id: PlayerId, amount: u64) -> bool {
        let Some(session) = self.table.get_mut(player_id) else {
            return false;
        };
        session.profile.tokens = session.profile.tokens.saturating_add(amount);
        tracing::debug!(%player_id, amount, balance = session.profile.tokens, "tokens awarded");
        true
    }

    /// Deducts tokens if the player can cover the full amount.
    ///
    /// Returns `false` (deducting nothing) when the balance is short;
    /// there are no partial spends.
    pub fn spend(&mut self, player_id: PlayerId, amount: u64) -> bool {
        let Some(session) = self.table.get_mut(player_id) else {
            return false;
        };
        if session.profile.tokens < amount {
            return false;
        }
        session.profile.tokens -= amount;
        tracing::debug!(%player_id, amount, balance = session.profile.tokens, "tokens spent");
        true
    }

    /// Sets a connected player's balance outright (admin command).
    pub fn set_balance(&mut self, player_id: PlayerId, amount: u64) -> bool {
        let Some(session) = self.table.get_mut(player_id) else {
            return false;
        };
        session.profile.tokens = amount;
        tracing::info!(%player_id, amount, "token balance set");
        true
    }
}

// =========================================================================
// Tests
// =========================================================================
