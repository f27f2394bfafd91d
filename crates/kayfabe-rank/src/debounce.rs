//! Cancel-and-restart bookkeeping for debounced input.
//!
//! The event loop owns the actual delay.  A [`Debouncer`] only remembers the
//! newest pending value and which schedule call produced it, so when a delay
//! elapses the caller can ask whether it is still the latest one.  Superseded
//! delays may still fire; their tickets just redeem to nothing.

use std::time::Duration;

/// Delay used for the gimmick search.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Proof of one [`Debouncer::schedule`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Last-write-wins holder for a delayed value.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer for the given delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    /// How long the caller should wait before redeeming a ticket.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending value, invalidating every earlier ticket.
    pub fn schedule(&mut self, value: T) -> Ticket {
        self.generation += 1;
        self.pending = Some(value);
        Ticket(self.generation)
    }

    /// Take the pending value if `ticket` came from the latest schedule call.
    pub fn redeem(&mut self, ticket: Ticket) -> Option<T> {
        if ticket.0 == self.generation {
            self.pending.take()
        } else {
            None
        }
    }

    /// Drop the pending value and invalidate all outstanding tickets.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    /// Whether a value is waiting for its delay to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_redeems() {
        let mut d = Debouncer::default();
        let t1 = d.schedule("o");
        let t2 = d.schedule("ok");
        let t3 = d.schedule("oka");

        assert_eq!(d.redeem(t1), None);
        assert_eq!(d.redeem(t2), None);
        assert!(d.is_pending());
        assert_eq!(d.redeem(t3), Some("oka"));
        assert!(!d.is_pending());
    }

    #[test]
    fn ticket_redeems_once() {
        let mut d = Debouncer::default();
        let t = d.schedule(1);
        assert_eq!(d.redeem(t), Some(1));
        assert_eq!(d.redeem(t), None);
    }

    #[test]
    fn cancel_invalidates_pending() {
        let mut d = Debouncer::default();
        let t = d.schedule(1);
        d.cancel();
        assert!(!d.is_pending());
        assert_eq!(d.redeem(t), None);
    }

    #[test]
    fn schedule_after_redeem_starts_fresh() {
        let mut d = Debouncer::new(Duration::from_millis(10));
        let t1 = d.schedule('a');
        assert_eq!(d.redeem(t1), Some('a'));
        let t2 = d.schedule('b');
        assert_ne!(t1, t2);
        assert_eq!(d.redeem(t2), Some('b'));
        assert_eq!(d.delay(), Duration::from_millis(10));
    }
}
