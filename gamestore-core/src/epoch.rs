//! Stale-result guards for asynchronous view work.
//!
//! A view takes a ticket before it starts a request and checks it when the
//! result arrives. Re-entering or unmounting the view bumps the epoch, so
//! results issued by the previous instance are dropped instead of applied.
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Default)]
pub struct ViewEpoch {
    current: Rc<Cell<u64>>,
}

impl ViewEpoch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket for work started now; stays valid until the next `advance`.
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        Ticket(self.current.get())
    }

    /// Invalidate every ticket handed out so far.
    pub fn advance(&self) -> Ticket {
        let next = self.current.get().wrapping_add(1);
        self.current.set(next);
        Ticket(next)
    }

    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.get() == ticket.0
    }

    /// `Some(value)` if `ticket` is still current, logging and dropping it otherwise.
    pub fn accept<V>(&self, ticket: Ticket, value: V) -> Option<V> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            log::warn!("discarding stale result from an earlier view");
            None
        }
    }
}

/// Trailing-edge debounce: each keystroke supersedes the previous one and
/// only the last one's timer is allowed to fire.
#[derive(Debug, Clone, Default)]
pub struct Debounce {
    epoch: ViewEpoch,
}

impl Debounce {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a keystroke; the returned ticket is checked when its timer fires.
    pub fn touch(&self) -> Ticket {
        self.epoch.advance()
    }

    #[must_use]
    pub fn should_fire(&self, ticket: Ticket) -> bool {
        self.epoch.is_current(ticket)
    }

    /// Drop any pending timer.
    pub fn cancel(&self) {
        self.epoch.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_tickets_are_rejected() {
        let epoch = ViewEpoch::new();
        let first = epoch.ticket();
        assert_eq!(epoch.accept(first, 1), Some(1));
        epoch.advance();
        assert_eq!(epoch.accept(first, 2), None);
        let clone = epoch.clone();
        assert!(clone.is_current(epoch.ticket()));
    }

    #[test]
    fn only_last_keystroke_fires() {
        let debounce = Debounce::new();
        let a = debounce.touch();
        let b = debounce.touch();
        assert!(!debounce.should_fire(a));
        assert!(debounce.should_fire(b));
        debounce.cancel();
        assert!(!debounce.should_fire(b));
    }
}
