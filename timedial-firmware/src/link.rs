//! Host bridge link
//!
//! Request/response helpers over the UART. Replies arrive through the RX
//! task and the signals in [`crate::channels`].

use chrono::NaiveDate;
use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{with_timeout, Duration};
use embedded_io_async::Write;

use timedial_core::date;
use timedial_core::startup::{COMMIT_TIMEOUT_MS, STARTUP_ATTEMPTS, STARTUP_TIMEOUT_MS};
use timedial_protocol::{DialMessage, FrameError, HostMessage, MAX_FRAME_SIZE};

use crate::channels::{COMMIT_RESULT, HOST_READY};

/// Host link errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum LinkError {
    /// The message did not fit a frame
    Encode(FrameError),
    /// UART write failed
    Write,
    /// No reply in time
    Timeout,
    /// The bridge answered but refused
    Rejected,
    /// The date has no `YYYYMMDD` form
    DateOutOfRange,
}

/// Sending half of the host link
pub struct HostLink {
    tx: BufferedUartTx,
    seq: u8,
}

impl HostLink {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self { tx, seq: 0 }
    }

    /// Encode and send one message, returning its sequence number
    async fn send(&mut self, msg: DialMessage) -> Result<u8, LinkError> {
        let seq = self.seq;
        self.seq = self.seq.wrapping_add(1);

        let frame = msg.to_frame(seq).map_err(LinkError::Encode)?;
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = frame.encode(&mut buf).map_err(LinkError::Encode)?;
        self.tx
            .write_all(&buf[..len])
            .await
            .map_err(|_| LinkError::Write)?;

        trace!("TX: {:?} seq={}", msg, seq);
        Ok(seq)
    }

    /// Ask the bridge for proxy status
    ///
    /// Returns the first `Ready`, or `None` once every attempt has timed out.
    pub async fn handshake(&mut self) -> Option<HostMessage> {
        for attempt in 1..=STARTUP_ATTEMPTS {
            HOST_READY.reset();
            if let Err(e) = self.send(DialMessage::Hello).await {
                warn!("Failed to send hello: {:?}", e);
            }

            match with_timeout(Duration::from_millis(STARTUP_TIMEOUT_MS), HOST_READY.wait()).await
            {
                Ok(reply) => return Some(reply),
                Err(_) => warn!(
                    "No answer from host (attempt {}/{})",
                    attempt, STARTUP_ATTEMPTS
                ),
            }
        }
        None
    }

    /// Ask the bridge to apply `date`
    pub async fn commit(&mut self, date: NaiveDate) -> Result<(), LinkError> {
        let wire = date::to_wire(date).ok_or(LinkError::DateOutOfRange)?;

        COMMIT_RESULT.reset();
        let seq = self.send(DialMessage::CommitDate { date: wire }).await?;

        let ok = with_timeout(Duration::from_millis(COMMIT_TIMEOUT_MS), result_for(seq))
            .await
            .map_err(|_| LinkError::Timeout)?;
        if ok {
            Ok(())
        } else {
            Err(LinkError::Rejected)
        }
    }
}

/// Wait for the result matching `seq`, skipping stale ones
async fn result_for(seq: u8) -> bool {
    loop {
        let (got, ok) = COMMIT_RESULT.wait().await;
        if got == seq {
            return ok;
        }
        trace!("Stale commit result seq={} (want {})", got, seq);
    }
}
