//! Timedial Hardware Abstraction Layer
//!
//! Defines the bus traits the display driver is written against, so the same
//! driver code runs on the RP2040 board and against host-side test doubles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  timedial-display (SSD1306 driver)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  timedial-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal- │       │ test doubles  │
//! │ async (RP2040)│       │ (host tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - write-only addressed bus

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

// Re-export key traits at crate root for convenience
pub use i2c::{EmbeddedHalBus, I2cBus, I2cBusError, I2cConfig};
