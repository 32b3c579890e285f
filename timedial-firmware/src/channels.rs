//! Inter-task communication channels
//!
//! Edge handlers only enqueue events; the controller task is the sole owner
//! of the dial state and publishes what the other tasks need.

use core::cell::Cell;

use chrono::NaiveDate;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use timedial_core::{DialView, InputEvent};
use timedial_protocol::HostMessage;

/// Channel capacity for encoder and button events
const INPUT_CHANNEL_SIZE: usize = 32;

/// Encoder edges and button presses, in arrival order
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Latest view to paint; a burst of changes collapses into the last one
pub static DISPLAY_REFRESH: Signal<CriticalSectionRawMutex, DialView> = Signal::new();

/// Date currently shown, read by the commit task on its own schedule
pub static DISPLAYED_DATE: Mutex<CriticalSectionRawMutex, Cell<Option<NaiveDate>>> =
    Mutex::new(Cell::new(None));

/// `Ready` answer from the host bridge
pub static HOST_READY: Signal<CriticalSectionRawMutex, HostMessage> = Signal::new();

/// `CommitResult` from the host bridge as `(seq, ok)`
pub static COMMIT_RESULT: Signal<CriticalSectionRawMutex, (u8, bool)> = Signal::new();
