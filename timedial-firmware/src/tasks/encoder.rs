//! Rotary encoder edge task
//!
//! Waits for an edge on either phase line and forwards the level change
//! with its timestamp. If both lines moved before the task woke up, one
//! `Levels` sample is sent so the decoder can reject the jump. Decoding and
//! debounce happen in the controller.

use defmt::*;
use embassy_futures::select::select;
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use timedial_core::{InputEvent, Line};

use crate::channels::INPUT_CHANNEL;

/// Encoder task
#[embassy_executor::task]
pub async fn encoder_task(mut a: Input<'static>, mut b: Input<'static>) {
    info!("Encoder task started");

    let mut last_a = a.is_high();
    let mut last_b = b.is_high();

    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;

        let at_ms = Instant::now().as_millis();
        let level_a = a.is_high();
        let level_b = b.is_high();

        let event = match (level_a != last_a, level_b != last_b) {
            (false, false) => continue,
            (true, false) => InputEvent::LineChange {
                line: Line::A,
                level: level_a,
                at_ms,
            },
            (false, true) => InputEvent::LineChange {
                line: Line::B,
                level: level_b,
                at_ms,
            },
            // Both moved between wakeups: the order is unknown
            (true, true) => InputEvent::Levels {
                a: level_a,
                b: level_b,
                at_ms,
            },
        };
        last_a = level_a;
        last_b = level_b;
        forward(event);
    }
}

fn forward(event: InputEvent) {
    // Never block the edge handler; drop if the controller is behind
    if INPUT_CHANNEL.try_send(event).is_err() {
        warn!("Input channel full, dropping {:?}", event);
    }
}
