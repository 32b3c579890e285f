//! Message types for the host link
//!
//! Message types are divided into two categories:
//! - Dial → Host: startup hello, date commits
//! - Host → Dial: proxy status with the initial date, commit results

use crate::frame::{Frame, FrameError};

// Message type IDs: Dial → Host
pub const MSG_HELLO: u8 = 0x01;
pub const MSG_COMMIT_DATE: u8 = 0x02;

// Message type IDs: Host → Dial
pub const MSG_READY: u8 = 0x20;
pub const MSG_COMMIT_RESULT: u8 = 0x21;

/// Length of a `YYYYMMDD` date on the wire
pub const WIRE_DATE_LEN: usize = 8;

/// A calendar date as the eight ASCII digits `YYYYMMDD`
///
/// The protocol only checks that all eight bytes are digits; calendar
/// validation is left to the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireDate([u8; WIRE_DATE_LEN]);

impl WireDate {
    /// Build from raw bytes, rejecting anything that is not eight ASCII digits
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let digits: [u8; WIRE_DATE_LEN] = bytes.try_into().ok()?;
        digits
            .iter()
            .all(u8::is_ascii_digit)
            .then_some(Self(digits))
    }

    /// Build from year, month and day
    ///
    /// Returns `None` for years outside `0..=9999` or fields that do not fit
    /// two digits.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(0..=9999).contains(&year) || month > 99 || day > 99 {
            return None;
        }
        let y = year as u32;
        let digit = |v: u32| b'0' + (v % 10) as u8;
        Some(Self([
            digit(y / 1000),
            digit(y / 100),
            digit(y / 10),
            digit(y),
            digit(month / 10),
            digit(month),
            digit(day / 10),
            digit(day),
        ]))
    }

    /// The raw ASCII bytes
    pub fn as_bytes(&self) -> &[u8; WIRE_DATE_LEN] {
        &self.0
    }

    /// The date as a string slice
    pub fn as_str(&self) -> &str {
        // All bytes are ASCII digits by construction
        core::str::from_utf8(&self.0).unwrap_or("")
    }

    /// The date as the number `YYYYMMDD`, handy for logging
    pub fn as_u32(&self) -> u32 {
        self.0
            .iter()
            .fold(0u32, |acc, &b| acc * 10 + u32::from(b - b'0'))
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for WireDate {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.as_str());
    }
}

/// Messages from the dial to the host bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DialMessage {
    /// Startup request for proxy status and the current archive date
    Hello,
    /// Apply a new archive date
    CommitDate { date: WireDate },
}

impl DialMessage {
    /// Encode this message into a frame
    pub fn to_frame(&self, seq: u8) -> Result<Frame, FrameError> {
        match self {
            DialMessage::Hello => Ok(Frame::empty(MSG_HELLO, seq)),
            DialMessage::CommitDate { date } => Frame::new(MSG_COMMIT_DATE, seq, date.as_bytes()),
        }
    }

    /// Parse a message from a frame (bridge side and tests)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_HELLO => Ok(DialMessage::Hello),
            MSG_COMMIT_DATE => {
                let date = WireDate::from_bytes(&frame.payload).ok_or(FrameError::InvalidFrame)?;
                Ok(DialMessage::CommitDate { date })
            }
            other => Err(FrameError::UnknownMessage(other)),
        }
    }
}

/// Messages from the host bridge to the dial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostMessage {
    /// Answer to `Hello`
    ///
    /// `initial_date` is whatever the proxy is configured with; `None` if the
    /// bridge could not read it.
    Ready {
        proxy_ok: bool,
        initial_date: Option<WireDate>,
    },
    /// Outcome of a `CommitDate` carrying the same sequence number
    CommitResult { ok: bool },
}

impl HostMessage {
    /// Parse a message from a frame
    ///
    /// A `Ready` whose date bytes are not digits is still accepted, with the
    /// date dropped; the dial falls back to its default date in that case.
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_READY => {
                let (&flag, rest) = frame
                    .payload
                    .split_first()
                    .ok_or(FrameError::InvalidFrame)?;
                Ok(HostMessage::Ready {
                    proxy_ok: flag != 0,
                    initial_date: WireDate::from_bytes(rest),
                })
            }
            MSG_COMMIT_RESULT => {
                let &flag = frame.payload.first().ok_or(FrameError::InvalidFrame)?;
                Ok(HostMessage::CommitResult { ok: flag != 0 })
            }
            other => Err(FrameError::UnknownMessage(other)),
        }
    }

    /// Encode this message into a frame (bridge side and tests)
    pub fn to_frame(&self, seq: u8) -> Result<Frame, FrameError> {
        match self {
            HostMessage::Ready {
                proxy_ok,
                initial_date,
            } => {
                let mut payload = [0u8; 1 + WIRE_DATE_LEN];
                payload[0] = u8::from(*proxy_ok);
                let len = match initial_date {
                    Some(date) => {
                        payload[1..].copy_from_slice(date.as_bytes());
                        payload.len()
                    }
                    None => 1,
                };
                Frame::new(MSG_READY, seq, &payload[..len])
            }
            HostMessage::CommitResult { ok } => {
                Frame::new(MSG_COMMIT_RESULT, seq, &[u8::from(*ok)])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_date_from_ymd() {
        let date = WireDate::from_ymd(2024, 6, 5).unwrap();
        assert_eq!(date.as_str(), "20240605");
        assert_eq!(date.as_u32(), 20240605);
    }

    #[test]
    fn test_wire_date_rejects_non_digits() {
        assert!(WireDate::from_bytes(b"2024-6-5").is_none());
        assert!(WireDate::from_bytes(b"2024060").is_none());
        assert!(WireDate::from_bytes(b"19970101").is_some());
    }

    #[test]
    fn test_wire_date_rejects_out_of_range_year() {
        assert!(WireDate::from_ymd(-1, 1, 1).is_none());
        assert!(WireDate::from_ymd(10_000, 1, 1).is_none());
    }

    #[test]
    fn test_commit_date_frame() {
        let date = WireDate::from_ymd(1997, 1, 1).unwrap();
        let frame = DialMessage::CommitDate { date }.to_frame(9).unwrap();
        assert_eq!(frame.msg_type, MSG_COMMIT_DATE);
        assert_eq!(frame.seq, 9);
        assert_eq!(&frame.payload[..], b"19970101");
        assert_eq!(
            DialMessage::from_frame(&frame).unwrap(),
            DialMessage::CommitDate { date }
        );
    }

    #[test]
    fn test_ready_without_date() {
        let frame = Frame::new(MSG_READY, 0, &[1]).unwrap();
        assert_eq!(
            HostMessage::from_frame(&frame).unwrap(),
            HostMessage::Ready {
                proxy_ok: true,
                initial_date: None
            }
        );
    }

    #[test]
    fn test_ready_with_garbled_date_drops_it() {
        let frame = Frame::new(MSG_READY, 0, b"\x01garbage!").unwrap();
        assert_eq!(
            HostMessage::from_frame(&frame).unwrap(),
            HostMessage::Ready {
                proxy_ok: true,
                initial_date: None
            }
        );
    }

    #[test]
    fn test_ready_with_date() {
        let msg = HostMessage::Ready {
            proxy_ok: false,
            initial_date: WireDate::from_bytes(b"20010911"),
        };
        let frame = msg.to_frame(0).unwrap();
        assert_eq!(frame.payload.len(), 9);
        assert_eq!(HostMessage::from_frame(&frame).unwrap(), msg);
    }

    #[test]
    fn test_empty_ready_is_invalid() {
        let frame = Frame::empty(MSG_READY, 0);
        assert_eq!(
            HostMessage::from_frame(&frame),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn test_unknown_message() {
        let frame = Frame::empty(0x7F, 0);
        assert_eq!(
            HostMessage::from_frame(&frame),
            Err(FrameError::UnknownMessage(0x7F))
        );
    }
}
