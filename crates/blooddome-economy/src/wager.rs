//! The dice mini-game: wager tokens against the house.

use std::time::{Duration, Instant};

use blooddome_profile::PlayerId;
use blooddome_session::SessionTable;
use rand::Rng;

use crate::{TokenLedger, WagerDenied};

/// How a resolved wager went for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WagerOutcome {
    /// Player rolled higher: bet paid back double.
    Won,
    /// House rolled higher: bet is gone.
    Lost,
    /// Tie: bet refunded.
    Push,
}

/// The result of a wager that actually ran.
#[derive(Debug, Clone, Copy)]
pub struct DiceRoll {
    pub player_roll: u8,
    pub house_roll: u8,
    pub bet: u64,
    /// Tokens credited back after the roll: `2 * bet` on a win, `bet`
    /// on a push, 0 on a loss.
    pub payout: u64,
    pub outcome: WagerOutcome,
}

/// Rules of the dice game.
///
/// One six-sided die each for the player and the house; higher roll
/// wins. The bet is taken up front and the payout credited after the
/// roll, so a win nets `+bet` and a push nets zero.
#[derive(Debug, Clone)]
pub struct DiceWager {
    pub min_bet: u64,
    pub max_bet: u64,
    /// Minimum time between accepted wagers, per player. Denied wagers
    /// do not start or extend the cooldown.
    pub cooldown: Duration,
}

impl Default for DiceWager {
    fn default() -> Self {
        Self {
            min_bet: 10,
            max_bet: 100,
            cooldown: Duration::from_secs(30),
        }
    }
}

impl DiceWager {
    /// Runs one wager for a connected player.
    ///
    /// Checks run in order: connection, bet range, cooldown, balance.
    /// Any failure returns [`WagerDenied`] with nothing deducted and
    /// the cooldown untouched.
    pub fn play(
        &self,
        table: &mut SessionTable,
        player_id: PlayerId,
        bet: u64,
        rng: &mut impl Rng,
    ) -> Result<DiceRoll, WagerDenied> {
        let now = Instant::now();

        let session = table.get_mut(player_id).ok_or(WagerDenied::NotConnected)?;

        if bet < self.min_bet || bet > self.max_bet {
            return Err(WagerDenied::BetOutOfRange {
                min: self.min_bet,
                max: self.max_bet,
            });
        }

        if let Some(last) = session.last_wager {
            let elapsed = now.duration_since(last);
            if elapsed < self.cooldown {
                let remaining = self.cooldown - elapsed;
                return Err(WagerDenied::Cooldown {
                    remaining_secs: remaining.as_secs().max(1),
                });
            }
        }

        let mut ledger = TokenLedger::new(table);
        if !ledger.spend(player_id, bet) {
            return Err(WagerDenied::InsufficientTokens);
        }

        let player_roll: u8 = rng.random_range(1..=6);
        let house_roll: u8 = rng.random_range(1..=6);

        let (outcome, payout) = match player_roll.cmp(&house_roll) {
            std::cmp::Ordering::Greater => (WagerOutcome::Won, bet * 2),
            std::cmp::Ordering::Less => (WagerOutcome::Lost, 0),
            std::cmp::Ordering::Equal => (WagerOutcome::Push, bet),
        };

        if payout > 0 {
            ledger.award(player_id, payout);
        }

        // The spend above proved the session exists.
        let session = table.get_mut(player_id).expect("session checked above");
        session.last_wager = Some(now);

        tracing::info!(
            %player_id,
            bet,
            player_roll,
            house_roll,
            payout,
            "dice wager resolved"
        );

        Ok(DiceRoll {
            player_roll,
            house_roll,
            bet,
            payout,
            outcome,
        })
    }
}

// =========================================================================
// Tests
// =========================================================================
