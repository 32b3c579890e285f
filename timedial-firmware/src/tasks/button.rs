//! Button press task
//!
//! One `ButtonPress` per physical press: falling edge, confirmed low after
//! a short debounce, then wait for release and let the contacts settle.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use timedial_core::InputEvent;

use crate::channels::INPUT_CHANNEL;

/// Time the line must stay low to count as a press
const PRESS_DEBOUNCE_MS: u64 = 20;

/// Quiet time after release
const RELEASE_SETTLE_MS: u64 = 50;

/// Button task
#[embassy_executor::task]
pub async fn button_task(mut btn: Input<'static>) {
    info!("Button task started");

    loop {
        btn.wait_for_falling_edge().await;
        Timer::after_millis(PRESS_DEBOUNCE_MS).await;

        if btn.is_low() {
            debug!("Button pressed");
            if INPUT_CHANNEL.try_send(InputEvent::ButtonPress).is_err() {
                warn!("Input channel full, dropping button press");
            }

            btn.wait_for_rising_edge().await;
            Timer::after_millis(RELEASE_SETTLE_MS).await;
        }
    }
}
