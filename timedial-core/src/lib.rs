//! Board-agnostic core logic for the dial-to-date controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Quadrature decoding and the debounced, clamped dial value
//! - The Month/Year dial state machine and the event controller on top
//! - Commit bookkeeping for the host bridge
//! - Display bus fault tracking
//! - Startup evaluation of the host's status reply
//! - Configuration type definitions
//!
//! Time is passed in as milliseconds since boot so every piece can be driven
//! from host tests.

#![no_std]
#![deny(unsafe_code)]

pub mod commit;
pub mod config;
pub mod date;
pub mod dial;
pub mod encoder;
pub mod fault;
pub mod startup;

pub use commit::CommitTracker;
pub use config::{ConfigError, DialConfig, EncoderConfig};
pub use dial::{DialController, DialMode, DialStateMachine, DialView, InputEvent};
pub use encoder::{Line, Pulse, QuadratureDecoder, ScaledEncoder};
pub use fault::{BusFaultMonitor, FaultStatus};
pub use startup::StartupError;
