//! Dial state machine and the event controller that drives it
//!
//! The machine is explicit, finite and deterministic: two modes, one
//! transition (button press), and a pure function from
//! `(base date, mode, dial value)` to the displayed date.

pub mod controller;
pub mod machine;

pub use controller::{DialController, DialView, InputEvent};
pub use machine::{DialMode, DialStateMachine};
