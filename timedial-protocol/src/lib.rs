//! Timedial Host Link Protocol
//!
//! This crate defines the UART protocol between the dial (RP2040) and the
//! host bridge that owns the archive proxy. The dial asks the bridge whether
//! the proxy is up and which date it is serving, then pushes every newly
//! dialled date to it.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────┬────────────┬──────┐
//! │ START │ LENGTH │ TYPE │ SEQ │ PAYLOAD    │ CRC8 │
//! │ 1B    │ 1B     │ 1B   │ 1B  │ 0–64B      │ 1B   │
//! └───────┴────────┴──────┴─────┴────────────┴──────┘
//! ```
//!
//! The bridge echoes SEQ in its replies so a commit result can be matched to
//! the request that caused it.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{DialMessage, HostMessage, WireDate};
