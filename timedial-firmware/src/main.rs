//! Timedial - Dial-to-Date Controller Firmware
//!
//! A rotary encoder scrolls an archive date by month or by year, the button
//! commits the dialled offset and switches unit, a 128x32 OLED shows the
//! result, and a host bridge applies the date to the archive proxy.
//!
//! Startup refuses to run the dial unless the bridge reports a healthy
//! proxy.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use timedial_core::{date, startup, DialConfig, DialController};

use crate::board::Board;
use crate::link::HostLink;

mod board;
mod channels;
mod link;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Timedial firmware starting...");

    let config = DialConfig::default();
    if let Err(e) = config.validate() {
        defmt::panic!("Invalid configuration: {:?}", e);
    }
    let default_date = unwrap!(config.parsed_default_date());

    let p = embassy_rp::init(Default::default());
    let board = Board::init(p);
    info!("Peripherals initialized");

    // Sample the phase lines before anything can move them
    let levels = (board.encoder_a.is_high(), board.encoder_b.is_high());

    spawner.spawn(unwrap!(tasks::link_rx_task(board.host_rx)));
    let mut link = HostLink::new(board.host_tx);

    let reply = link.handshake().await;
    let base_date = match startup::evaluate(reply.as_ref(), default_date) {
        Ok(d) => d,
        Err(e) => {
            match e {
                startup::StartupError::HostUnreachable => {
                    error!("Host bridge not answering. Please start it first.")
                }
                startup::StartupError::ProxyNotReady => {
                    error!("Archive proxy is not running. Please start it first.")
                }
            }
            park().await
        }
    };
    info!("Starting at {}", date::as_u32(base_date));

    let controller = DialController::new(config.encoder, levels, base_date);

    spawner.spawn(unwrap!(tasks::display_task(board.display)));
    spawner.spawn(unwrap!(tasks::controller_task(controller)));
    spawner.spawn(unwrap!(tasks::encoder_task(board.encoder_a, board.encoder_b)));
    spawner.spawn(unwrap!(tasks::button_task(board.button)));
    spawner.spawn(unwrap!(tasks::commit_task(link, config.commit_interval_ms)));

    info!("All tasks spawned, dial running");
}

/// Stay idle without entering the dial loop
async fn park() -> ! {
    loop {
        Timer::after_secs(60).await;
        trace!("Parked");
    }
}
