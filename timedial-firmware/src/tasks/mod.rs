//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod button;
pub mod commit;
pub mod controller;
pub mod display;
pub mod encoder;
pub mod link_rx;

pub use button::button_task;
pub use commit::commit_task;
pub use controller::controller_task;
pub use display::display_task;
pub use encoder::encoder_task;
pub use link_rx::link_rx_task;
