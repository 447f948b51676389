//! The match queue: who is waiting for the next round.

use blooddome_profile::PlayerId;

/// One started match: a monotonic id and who went in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub id: u64,
    pub participants: Vec<PlayerId>,
}

/// Order-preserving dedup queue of players waiting for a match.
///
/// The queue only tracks identities; marking sessions in-match and
/// bumping `matches_played` is the facade's job when it starts and ends
/// matches.
#[derive(Debug, Default)]
pub struct MatchQueue {
    waiting: Vec<PlayerId>,
    next_match_id: u64,
}

impl MatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a player to the back of the queue. Returns `false` if they
    /// are already queued.
    pub fn enqueue(&mut self, player_id: PlayerId) -> bool {
        if self.waiting.contains(&player_id) {
            return false;
        }
        self.waiting.push(player_id);
        tracing::debug!(%player_id, waiting = self.waiting.len(), "player queued");
        true
    }

    /// Drops a player from the queue (disconnect). `false` if absent.
    pub fn remove(&mut self, player_id: PlayerId) -> bool {
        let before = self.waiting.len();
        self.waiting.retain(|p| *p != player_id);
        self.waiting.len() != before
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.waiting.contains(&player_id)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    /// Drains everyone waiting into a new match. `None` when nobody is
    /// queued; match ids are monotonic and never reused.
    pub fn start_match(&mut self) -> Option<MatchRecord> {
        if self.waiting.is_empty() {
            return None;
        }
        self.next_match_id += 1;
        let record = MatchRecord {
            id: self.next_match_id,
            participants: std::mem::take(&mut self.waiting),
        };
        tracing::info!(
            match_id = record.id,
            participants = record.participants.len(),
            "match started"
        );
        Some(record)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: u64) -> PlayerId {
        PlayerId(id)
    }

    #[test]
    fn test_enqueue_duplicate_rejected() {
        let mut queue = MatchQueue::new();
        assert!(queue.enqueue(pid(1)));
        assert!(!queue.enqueue(pid(1)));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_start_match_drains_queue_in_order() {
        let mut queue = MatchQueue::new();
        queue.enqueue(pid(3));
        queue.enqueue(pid(1));
        queue.enqueue(pid(2));

        let record = queue.start_match().expect("queue was not empty");

        assert_eq!(record.participants, vec![pid(3), pid(1), pid(2)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_start_match_empty_queue_returns_none() {
        let mut queue = MatchQueue::new();
        assert!(queue.start_match().is_none());
    }

    #[test]
    fn test_start_match_ids_are_monotonic() {
        let mut queue = MatchQueue::new();
        queue.enqueue(pid(1));
        let first = queue.start_match().unwrap();
        queue.enqueue(pid(1));
        let second = queue.start_match().unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn test_remove_unqueues_player() {
        let mut queue = MatchQueue::new();
        queue.enqueue(pid(1));
        queue.enqueue(pid(2));

        assert!(queue.remove(pid(1)));
        assert!(!queue.remove(pid(1)));
        assert!(!queue.contains(pid(1)));
        assert_eq!(queue.len(), 1);
    }
}
