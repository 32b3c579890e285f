//! Host link receive task
//!
//! Receives frames from the host bridge and dispatches replies.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use timedial_protocol::{FrameParser, HostMessage};

use crate::channels::{COMMIT_RESULT, HOST_READY};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives and parses frames from the host bridge
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match HostMessage::from_frame(&frame) {
                            Ok(msg) => handle_host_message(msg, frame.seq),
                            Err(e) => warn!("Failed to parse host message: {:?}", e),
                        },
                        Ok(None) => {}
                        Err(e) => warn!("Frame parse error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => warn!("UART read error: {:?}", e),
        }
    }
}

fn handle_host_message(msg: HostMessage, seq: u8) {
    match msg {
        HostMessage::Ready { proxy_ok, .. } => {
            debug!("Ready received (proxy_ok={})", proxy_ok);
            HOST_READY.signal(msg);
        }
        HostMessage::CommitResult { ok } => {
            trace!("Commit result seq={} ok={}", seq, ok);
            COMMIT_RESULT.signal((seq, ok));
        }
    }
}
