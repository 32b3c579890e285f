//! Dial controller task
//!
//! Sole owner of the encoder value and the dial state machine. Applies
//! input events in arrival order and publishes every visible change.

use defmt::*;

use timedial_core::{date, DialController, DialView, InputEvent};

use crate::channels::{DISPLAYED_DATE, DISPLAY_REFRESH, INPUT_CHANNEL};

/// Controller task
#[embassy_executor::task]
pub async fn controller_task(mut controller: DialController) {
    info!("Controller task started");

    publish(controller.view());

    loop {
        let event = INPUT_CHANNEL.receive().await;
        let Some(view) = controller.handle(event) else {
            if let InputEvent::Levels { .. } = event {
                debug!("Encoder jumped two states, resynchronised");
            }
            continue;
        };

        match event {
            InputEvent::ButtonPress => info!(
                "Committed {}, now dialling by {}",
                date::as_u32(controller.dial().base_date()),
                view.mode
            ),
            InputEvent::LineChange { .. } | InputEvent::Levels { .. } => debug!(
                "Dial value: {} ({} rotations)",
                view.dial_value,
                controller.encoder().rotations()
            ),
        }
        publish(view);
    }
}

fn publish(view: DialView) {
    DISPLAYED_DATE.lock(|d| d.set(Some(view.date)));
    DISPLAY_REFRESH.signal(view);
}
