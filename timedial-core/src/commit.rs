//! Commit bookkeeping for the host bridge
//!
//! What is shown is event driven; what is committed is polled. On every
//! commit tick the control loop asks [`CommitTracker::pending`] whether the
//! displayed date differs from the last one the host accepted.

use chrono::NaiveDate;

/// Tracks the last date the host accepted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitTracker {
    last_sent: Option<NaiveDate>,
}

impl CommitTracker {
    /// Nothing committed yet, so the first tick always sends
    pub fn new() -> Self {
        Self { last_sent: None }
    }

    /// Date to send, if it differs from the last accepted one
    pub fn pending(&self, current: NaiveDate) -> Option<NaiveDate> {
        (self.last_sent != Some(current)).then_some(current)
    }

    /// Record a successful commit
    ///
    /// Failed commits are not recorded, so the next tick retries.
    pub fn mark_sent(&mut self, date: NaiveDate) {
        self.last_sent = Some(date);
    }

    /// Last accepted date
    pub fn last_sent(&self) -> Option<NaiveDate> {
        self.last_sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_tick_sends_initial_date() {
        let tracker = CommitTracker::new();
        assert_eq!(tracker.pending(ymd(1997, 1, 1)), Some(ymd(1997, 1, 1)));
    }

    #[test]
    fn test_no_change_sends_nothing() {
        let mut tracker = CommitTracker::new();
        tracker.mark_sent(ymd(1997, 1, 1));
        assert_eq!(tracker.pending(ymd(1997, 1, 1)), None);
        assert_eq!(tracker.pending(ymd(1997, 2, 1)), Some(ymd(1997, 2, 1)));
    }

    #[test]
    fn test_failed_commit_retries_next_tick() {
        let mut tracker = CommitTracker::new();
        tracker.mark_sent(ymd(1997, 1, 1));
        let date = ymd(1998, 1, 1);
        assert_eq!(tracker.pending(date), Some(date));
        // Send failed: nothing recorded
        assert_eq!(tracker.pending(date), Some(date));
        tracker.mark_sent(date);
        assert_eq!(tracker.pending(date), None);
        assert_eq!(tracker.last_sent(), Some(date));
    }
}
