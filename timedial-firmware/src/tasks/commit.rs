//! Date commit task
//!
//! Every commit interval, sends the displayed date to the host bridge if it
//! differs from the last one accepted. Runs on its own schedule so a slow
//! bridge never holds up the dial.

use defmt::*;
use embassy_time::{Duration, Ticker};

use timedial_core::{date, CommitTracker};

use crate::channels::DISPLAYED_DATE;
use crate::link::HostLink;

/// Commit task
#[embassy_executor::task]
pub async fn commit_task(mut link: HostLink, interval_ms: u64) {
    info!("Commit task started");

    let mut tracker = CommitTracker::new();
    let mut ticker = Ticker::every(Duration::from_millis(interval_ms));

    loop {
        // The first pass runs immediately and commits the initial date
        let shown = DISPLAYED_DATE.lock(|d| d.get());
        if let Some(pending) = shown.and_then(|d| tracker.pending(d)) {
            match link.commit(pending).await {
                Ok(()) => {
                    tracker.mark_sent(pending);
                    info!("New archive date: {}", date::as_u32(pending));
                }
                Err(e) => warn!(
                    "Commit of {} failed: {:?}, retrying next tick",
                    date::as_u32(pending),
                    e
                ),
            }
        }

        ticker.next().await;
    }
}
