//! Frame encoding and decoding for the host link.
//!
//! Frame format:
//! - START (1 byte): 0x7E synchronization byte
//! - LENGTH (1 byte): payload length (0-64)
//! - TYPE (1 byte): message type identifier
//! - SEQ (1 byte): sequence number, echoed by replies
//! - PAYLOAD (0-64 bytes): type-specific data
//! - CRC8 (1 byte): CRC-8/SMBUS (poly 0x07) over LENGTH, TYPE, SEQ and PAYLOAD

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0x7E;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 64;

/// Bytes around the payload (START + LENGTH + TYPE + SEQ + CRC8)
const OVERHEAD: usize = 5;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = OVERHEAD + MAX_PAYLOAD_SIZE;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// CRC mismatch
    InvalidChecksum,
    /// Invalid frame structure or payload layout
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
    /// Message type not known to this side of the link
    UnknownMessage(u8),
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Sequence number
    pub seq: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

/// Running CRC-8 with polynomial 0x07
fn crc8_update(mut crc: u8, byte: u8) -> u8 {
    crc ^= byte;
    for _ in 0..8 {
        crc = if crc & 0x80 != 0 {
            (crc << 1) ^ 0x07
        } else {
            crc << 1
        };
    }
    crc
}

fn crc8(length: u8, msg_type: u8, seq: u8, payload: &[u8]) -> u8 {
    let header = [length, msg_type, seq];
    header
        .iter()
        .chain(payload.iter())
        .fold(0u8, |crc, &b| crc8_update(crc, b))
}

impl Frame {
    /// Create a new frame with the given message type, sequence and payload
    pub fn new(msg_type: u8, seq: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self {
            msg_type,
            seq,
            payload,
        })
    }

    /// Create a frame with no payload
    pub fn empty(msg_type: u8, seq: u8) -> Self {
        Self {
            msg_type,
            seq,
            payload: Vec::new(),
        }
    }

    /// Number of bytes this frame occupies on the wire
    pub fn encoded_len(&self) -> usize {
        OVERHEAD + self.payload.len()
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        let out = buffer
            .get_mut(..frame_len)
            .ok_or(FrameError::BufferTooSmall)?;

        let length = self.payload.len() as u8;
        let (head, rest) = out.split_at_mut(4);
        head.copy_from_slice(&[FRAME_START, length, self.msg_type, self.seq]);
        let (body, tail) = rest.split_at_mut(self.payload.len());
        body.copy_from_slice(&self.payload);
        tail[0] = crc8(length, self.msg_type, self.seq, &self.payload);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for START byte
    Sync,
    /// Got START, waiting for LENGTH
    Length,
    /// Got LENGTH, waiting for TYPE
    Type,
    /// Got TYPE, waiting for SEQ
    Seq,
    /// Reading payload bytes
    Payload,
    /// Waiting for CRC8
    Crc,
}

/// Byte-at-a-time frame parser
///
/// Anything before a START byte is skipped, so the parser resynchronises on
/// its own after line noise or a corrupted frame.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    length: u8,
    msg_type: u8,
    seq: u8,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::Sync,
            length: 0,
            msg_type: 0,
            seq: 0,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame and wait for the next START byte
    pub fn reset(&mut self) {
        self.state = ParseState::Sync;
        self.length = 0;
        self.msg_type = 0;
        self.seq = 0;
        self.payload.clear();
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::Sync => {
                if byte == FRAME_START {
                    self.state = ParseState::Length;
                }
                Ok(None)
            }
            ParseState::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidFrame);
                }
                self.length = byte;
                self.state = ParseState::Type;
                Ok(None)
            }
            ParseState::Type => {
                self.msg_type = byte;
                self.state = ParseState::Seq;
                Ok(None)
            }
            ParseState::Seq => {
                self.seq = byte;
                self.payload.clear();
                self.state = if self.length == 0 {
                    ParseState::Crc
                } else {
                    ParseState::Payload
                };
                Ok(None)
            }
            ParseState::Payload => {
                // Capacity is guaranteed by the LENGTH check above
                let _ = self.payload.push(byte);
                if self.payload.len() == self.length as usize {
                    self.state = ParseState::Crc;
                }
                Ok(None)
            }
            ParseState::Crc => {
                let expected = crc8(self.length, self.msg_type, self.seq, &self.payload);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }

                let frame = Frame {
                    msg_type: self.msg_type,
                    seq: self.seq,
                    payload: self.payload.clone(),
                };
                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc8_check_value() {
        // CRC-8/SMBUS check value for "123456789"
        let crc = b"123456789".iter().fold(0u8, |c, &b| crc8_update(c, b));
        assert_eq!(crc, 0xF4);
    }

    #[test]
    fn test_encode_empty_payload() {
        let frame = Frame::empty(0x01, 7);
        let mut buffer = [0u8; 8];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 5);
        assert_eq!(&buffer[..4], &[FRAME_START, 0, 0x01, 7]);
        assert_eq!(buffer[4], crc8(0, 0x01, 7, &[]));
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let frame = Frame::new(0x02, 0, b"19970101").unwrap();
        let mut buffer = [0u8; 12];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_parse_encoded_frame() {
        let original = Frame::new(0x02, 42, b"20240615").unwrap();
        let encoded = original.encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&encoded).unwrap().unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parser_invalid_checksum_then_resync() {
        let frame = Frame::new(0x21, 3, &[1]).unwrap();
        let mut corrupted = frame.encode_to_vec().unwrap();
        let last = corrupted.len() - 1;
        corrupted[last] ^= 0xFF;

        let mut parser = FrameParser::new();
        assert_eq!(
            parser.feed_bytes(&corrupted),
            Err(FrameError::InvalidChecksum)
        );

        // The next good frame parses normally
        let good = frame.encode_to_vec().unwrap();
        assert_eq!(parser.feed_bytes(&good).unwrap(), Some(frame));
    }

    #[test]
    fn test_parser_skips_garbage() {
        let frame = Frame::empty(0x20, 1);
        let encoded = frame.encode_to_vec().unwrap();

        let mut data = Vec::<u8, 16>::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x12]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&data).unwrap(), Some(frame));
    }

    #[test]
    fn test_parser_rejects_oversized_length() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed(FRAME_START), Ok(None));
        assert_eq!(
            parser.feed(MAX_PAYLOAD_SIZE as u8 + 1),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn test_payload_too_large() {
        let large = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Frame::new(0x02, 0, &large), Err(FrameError::PayloadTooLarge));
    }
}
