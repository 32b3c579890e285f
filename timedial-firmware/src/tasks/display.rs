//! Display update task
//!
//! Paints the status screen whenever the controller publishes a new view.
//! Bus faults are retried; a run of them means the panel is gone.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::Timer;

use timedial_core::fault::MAX_CONSECUTIVE_BUS_FAULTS;
use timedial_core::{BusFaultMonitor, DialView, FaultStatus};
use timedial_display::{DisplayError, StatusScreen};

use crate::board::Display;
use crate::channels::DISPLAY_REFRESH;

/// Pause before retrying after a bus fault
const RETRY_DELAY_MS: u64 = 100;

/// Display task
#[embassy_executor::task]
pub async fn display_task(mut display: Display) {
    info!("Display task started");

    let mut faults = BusFaultMonitor::new();

    while let Err(e) = display.init().await {
        warn!("Display init failed: {:?}", e);
        record_fault(&mut faults);
        Timer::after_millis(RETRY_DELAY_MS).await;
    }
    faults.record_success();
    info!("OLED initialized");

    let mut view = DISPLAY_REFRESH.wait().await;
    loop {
        match StatusScreen::new(&view).render(&mut display).await {
            Ok(()) => {
                faults.record_success();
                trace!("Rendered {:?}", view);
                view = DISPLAY_REFRESH.wait().await;
            }
            Err(DisplayError::UnsupportedGlyph(ch)) => {
                error!("No glyph for {:?}, screen not drawn", ch);
                view = DISPLAY_REFRESH.wait().await;
            }
            Err(DisplayError::Bus(e)) => {
                warn!("Display refresh failed: {:?}", e);
                record_fault(&mut faults);
                view = newer_or_same(view).await;
            }
        }
    }
}

/// After a failed refresh: retry the same view, unless a newer one arrives
async fn newer_or_same(view: DialView) -> DialView {
    match select(DISPLAY_REFRESH.wait(), Timer::after_millis(RETRY_DELAY_MS)).await {
        Either::First(newer) => newer,
        Either::Second(()) => view,
    }
}

fn record_fault(faults: &mut BusFaultMonitor) {
    let status = faults.record_failure();
    debug!(
        "Bus faults: {} in a row, {} since boot",
        faults.consecutive_faults(),
        faults.total_faults()
    );
    if status == FaultStatus::Fatal {
        error!(
            "Display unusable after {} consecutive bus faults",
            MAX_CONSECUTIVE_BUS_FAULTS
        );
        defmt::panic!("display bus failed");
    }
}
