//! Request slots: one current request per kind.
//!
//! Starting a request in a slot cancels whatever was in flight there and
//! bumps the slot's generation. A completion is only applied if its
//! generation is still the slot's current one, so a slow, superseded request
//! can never overwrite the effects of a newer one.

use tokio_util::sync::CancellationToken;

/// Handle given to a request task when it starts.
#[derive(Debug, Clone)]
pub struct RequestTicket {
    /// Generation of this request within its slot.
    pub generation: u64,
    /// Cancelled when a newer request takes the slot.
    pub token: CancellationToken,
}

/// Tracks the current request of one kind.
#[derive(Debug, Default)]
pub struct RequestSlot {
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl RequestSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding any request still in flight.
    pub fn begin(&mut self) -> RequestTicket {
        self.cancel();
        self.generation += 1;
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        RequestTicket {
            generation: self.generation,
            token,
        }
    }

    /// Record the completion of `generation`.
    ///
    /// Returns `true` when the completion belongs to the current request and
    /// should be applied, `false` when it is stale.
    pub fn finish(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.in_flight.is_none() {
            return false;
        }
        self.in_flight = None;
        true
    }

    /// Cancel the in-flight request, if any. Its completion becomes stale.
    pub fn cancel(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }

    /// Whether a request is currently outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_and_finish() {
        let mut slot = RequestSlot::new();
        assert!(!slot.is_in_flight());

        let ticket = slot.begin();
        assert_eq!(ticket.generation, 1);
        assert!(slot.is_in_flight());

        assert!(slot.finish(ticket.generation));
        assert!(!slot.is_in_flight());
    }

    #[test]
    fn test_newer_request_supersedes_older() {
        let mut slot = RequestSlot::new();
        let first = slot.begin();
        let second = slot.begin();

        assert!(first.token.is_cancelled());
        assert!(!second.token.is_cancelled());

        // The late completion of the first request is discarded.
        assert!(!slot.finish(first.generation));
        assert!(slot.is_in_flight());
        assert!(slot.finish(second.generation));
    }

    #[test]
    fn test_completion_applied_once() {
        let mut slot = RequestSlot::new();
        let ticket = slot.begin();
        assert!(slot.finish(ticket.generation));
        assert!(!slot.finish(ticket.generation));
    }

    #[test]
    fn test_cancel_makes_completion_stale() {
        let mut slot = RequestSlot::new();
        let ticket = slot.begin();
        slot.cancel();

        assert!(ticket.token.is_cancelled());
        assert!(!slot.finish(ticket.generation));

        // The next request still gets a fresh generation.
        assert_eq!(slot.begin().generation, 2);
    }
}
