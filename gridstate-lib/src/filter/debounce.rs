//! Filter input debouncing.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Last-write-wins single-shot timer for filter evaluation.
///
/// Every call to [`schedule`](Self::schedule) cancels the pending ticket and
/// hands out a new one. Only the newest ticket is honoured by
/// [`take`](Self::take), so a burst of edits collapses into one evaluation.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use gridstate_lib::filter::FilterDebounce;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut debounce = FilterDebounce::new(Duration::from_millis(1));
/// let first = debounce.schedule();
/// let second = debounce.schedule();
///
/// assert!(!first.fired().await);
/// assert!(second.fired().await);
/// assert!(debounce.take(&second));
/// # }
/// ```
#[derive(Debug)]
pub struct FilterDebounce {
    delay: Duration,
    generation: u64,
    pending: Option<DebounceTicket>,
}

impl FilterDebounce {
    /// Creates a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    /// Returns the quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns `true` when filters are evaluated without waiting.
    pub fn is_immediate(&self) -> bool {
        self.delay.is_zero()
    }

    /// Cancels the pending ticket and schedules a new one at
    /// `now + delay`.
    pub fn schedule(&mut self) -> DebounceTicket {
        self.cancel();
        self.generation += 1;
        let ticket = DebounceTicket {
            generation: self.generation,
            deadline: Instant::now() + self.delay,
            token: CancellationToken::new(),
        };
        log::trace!(
            "[filter] debounce #{} scheduled in {:?}",
            ticket.generation,
            self.delay
        );
        self.pending = Some(ticket.clone());
        ticket
    }

    /// Returns the pending ticket, if any.
    pub fn pending(&self) -> Option<&DebounceTicket> {
        self.pending.as_ref()
    }

    /// Returns `true` if an evaluation is scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consumes `ticket` if it is still the newest one.
    ///
    /// Returns `false` for superseded or already consumed tickets.
    pub fn take(&mut self, ticket: &DebounceTicket) -> bool {
        match &self.pending {
            Some(pending) if pending.generation == ticket.generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Consumes the pending ticket without waiting for its deadline.
    pub fn take_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(ticket) => {
                ticket.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancels the pending ticket.
    pub fn cancel(&mut self) {
        if let Some(ticket) = self.pending.take() {
            log::trace!("[filter] debounce #{} cancelled", ticket.generation);
            ticket.token.cancel();
        }
    }
}

impl Default for FilterDebounce {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

/// A scheduled filter evaluation.
#[derive(Debug, Clone)]
pub struct DebounceTicket {
    generation: u64,
    deadline: Instant,
    token: CancellationToken,
}

impl DebounceTicket {
    /// Sequence number of this ticket.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// When the evaluation is due.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Returns `true` if a newer edit superseded this ticket.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits until the deadline.
    ///
    /// Resolves to `true` when the deadline passed and `false` as soon as the
    /// ticket is cancelled.
    pub async fn fired(&self) -> bool {
        tokio::select! {
            _ = self.token.cancelled() => false,
            _ = tokio::time::sleep_until(self.deadline) => !self.token.is_cancelled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_newest_ticket_wins() {
        let mut debounce = FilterDebounce::new(Duration::from_millis(300));
        let first = debounce.schedule();
        tokio::time::advance(Duration::from_millis(100)).await;
        let second = debounce.schedule();

        assert!(first.is_cancelled());
        assert!(!first.fired().await);
        assert!(!debounce.take(&first));

        let start = Instant::now();
        assert!(second.fired().await);
        assert!(Instant::now() - start >= Duration::from_millis(300));
        assert!(debounce.take(&second));
        assert!(!debounce.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_take_pending_cancels_waiters() {
        let mut debounce = FilterDebounce::default();
        let ticket = debounce.schedule();
        assert!(debounce.take_pending());
        assert!(!ticket.fired().await);
        assert!(!debounce.take_pending());
        assert!(!debounce.take(&ticket));
    }

    #[test]
    fn test_zero_delay_is_immediate() {
        assert!(FilterDebounce::new(Duration::ZERO).is_immediate());
        assert!(!FilterDebounce::default().is_immediate());
    }
}
