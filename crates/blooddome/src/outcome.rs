//! Operation outcomes crossing the presentation boundary.

/// Why a command-surface operation succeeded or was refused.
///
/// A refused operation changed nothing, in memory or on disk. The
/// variants distinguish failure causes so the presentation layer can
/// show a useful message instead of a bare "failed"; [`is_ok`] bridges
/// callers that only care about success.
///
/// This is deliberately not a `Result`: refusal is a normal answer, not
/// an error, and nothing may panic or propagate across this boundary.
///
/// [`is_ok`]: OpOutcome::is_ok
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpOutcome {
    /// The operation ran and any change was persisted.
    Ok,
    /// The player has no session (not connected).
    NoSession,
    /// The player's balance cannot cover the cost.
    InsufficientTokens,
    /// The item is not in the player's owned set.
    NotOwned,
    /// The item is already in the player's owned set.
    AlreadyOwned,
    /// The item is already at its level cap.
    MaxLevel,
    /// The identifier matches nothing in the catalogs.
    UnknownItem,
    /// The per-player command budget is exhausted.
    RateLimited,
}

impl OpOutcome {
    pub fn is_ok(self) -> bool {
        matches!(self, OpOutcome::Ok)
    }
}

impl std::fmt::Display for OpOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            OpOutcome::Ok => "ok",
            OpOutcome::NoSession => "no session",
            OpOutcome::InsufficientTokens => "insufficient tokens",
            OpOutcome::NotOwned => "not owned",
            OpOutcome::AlreadyOwned => "already owned",
            OpOutcome::MaxLevel => "already at max level",
            OpOutcome::UnknownItem => "unknown item",
            OpOutcome::RateLimited => "rate limited",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ok_true_only_for_ok() {
        assert!(OpOutcome::Ok.is_ok());
        assert!(!OpOutcome::NoSession.is_ok());
        assert!(!OpOutcome::InsufficientTokens.is_ok());
        assert!(!OpOutcome::RateLimited.is_ok());
    }
}
