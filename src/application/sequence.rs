//! Stale-response guard shared by every stateful view controller.
//!
//! Each fetch takes a [`Ticket`]; only the most recently issued ticket may
//! write its response into view state, and nothing may after the view detaches.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Current,
    Stale,
    Detached,
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
    detached: AtomicBool,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn admit(&self, ticket: Ticket, view: &'static str) -> Admission {
        if self.detached.load(Ordering::SeqCst) {
            debug!(view, ticket = ticket.0, "dropping response for detached view");
            return Admission::Detached;
        }
        let latest = self.latest.load(Ordering::SeqCst);
        if ticket.0 == latest {
            Admission::Current
        } else {
            metrics::counter!("clubsite_stale_responses_total", "view" => view).increment(1);
            debug!(view, ticket = ticket.0, latest, "discarding stale response");
            Admission::Stale
        }
    }

    /// Marks the owning view as torn down; in-flight responses are dropped.
    pub fn detach(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }

    pub fn attach(&self) {
        self.detached.store(false, Ordering::SeqCst);
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::SeqCst)
    }
}

/// What a fetch did to view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { count: usize },
    /// The fetch failed and the view fell back to an empty collection.
    Degraded,
    Stale,
    Detached,
}

impl LoadOutcome {
    pub fn from_admission(admission: Admission) -> Option<Self> {
        match admission {
            Admission::Current => None,
            Admission::Stale => Some(LoadOutcome::Stale),
            Admission::Detached => Some(LoadOutcome::Detached),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let seq = RequestSequencer::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(second > first);
        assert_eq!(seq.admit(first, "test"), Admission::Stale);
        assert_eq!(seq.admit(second, "test"), Admission::Current);
    }

    #[test]
    fn detach_drops_everything() {
        let seq = RequestSequencer::new();
        let ticket = seq.issue();
        seq.detach();
        assert_eq!(seq.admit(ticket, "test"), Admission::Detached);
        seq.attach();
        assert_eq!(seq.admit(ticket, "test"), Admission::Current);
    }
}
