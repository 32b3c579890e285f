//! Rotary encoder decoding
//!
//! [`QuadratureDecoder`] turns line transitions into unit pulses;
//! [`ScaledEncoder`] debounces those pulses and integrates them into the
//! bounded dial value.

pub mod quadrature;
pub mod scaled;

pub use quadrature::{Line, Pulse, QuadratureDecoder};
pub use scaled::ScaledEncoder;
