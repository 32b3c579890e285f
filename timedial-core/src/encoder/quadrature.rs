//! Quadrature decoder
//!
//! The two phase lines form a 2-bit gray code `(A << 1) | B`. Turning the
//! knob forward walks `00 -> 10 -> 11 -> 01 -> 00` (A leads B), backward
//! walks the same cycle in reverse. Every single-step move along the cycle
//! is one pulse; anything else (no change, or a jump across the cycle) is
//! contact bounce and is ignored.

/// One of the two phase lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    A,
    B,
}

/// Direction of a decoded step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pulse {
    /// A leads B
    Forward,
    /// B leads A
    Reverse,
}

impl Pulse {
    /// `+1` for forward, `-1` for reverse
    pub fn sign(self) -> i32 {
        match self {
            Pulse::Forward => 1,
            Pulse::Reverse => -1,
        }
    }
}

/// Direction lookup indexed by `(previous_state << 2) | next_state`
const TRANSITIONS: [i8; 16] = [
    0, -1, 1, 0, // from 00
    1, 0, 0, -1, // from 01
    -1, 0, 0, 1, // from 10
    0, 1, -1, 0, // from 11
];

/// Quadrature decoder state
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    level_a: bool,
    level_b: bool,
    /// Net accepted pulses since construction
    position: i64,
    /// Timestamp of the last accepted transition
    last_transition_ms: Option<u64>,
}

impl QuadratureDecoder {
    /// Create a decoder seeded with the current line levels
    pub fn new(level_a: bool, level_b: bool) -> Self {
        Self {
            level_a,
            level_b,
            position: 0,
            last_transition_ms: None,
        }
    }

    /// Handle a level change on one line
    ///
    /// Returns the decoded pulse, or `None` if the transition is noise.
    pub fn on_line_change(&mut self, line: Line, level: bool, now_ms: u64) -> Option<Pulse> {
        match line {
            Line::A => self.on_levels(level, self.level_b, now_ms),
            Line::B => self.on_levels(self.level_a, level, now_ms),
        }
    }

    /// Handle a fresh sample of both lines
    ///
    /// When both lines moved since the previous sample the intermediate
    /// state was missed and the direction is unknown, so nothing is emitted
    /// and the decoder resynchronises on the new levels.
    pub fn on_levels(&mut self, a: bool, b: bool, now_ms: u64) -> Option<Pulse> {
        let index = (Self::state(self.level_a, self.level_b) << 2) | Self::state(a, b);
        self.level_a = a;
        self.level_b = b;

        let pulse = match TRANSITIONS[index] {
            1 => Pulse::Forward,
            -1 => Pulse::Reverse,
            _ => return None,
        };

        self.position += i64::from(pulse.sign());
        self.last_transition_ms = Some(now_ms);
        Some(pulse)
    }

    fn state(a: bool, b: bool) -> usize {
        (usize::from(a) << 1) | usize::from(b)
    }

    /// Current `(A, B)` levels
    pub fn levels(&self) -> (bool, bool) {
        (self.level_a, self.level_b)
    }

    /// Net accepted pulses
    pub fn position(&self) -> i64 {
        self.position
    }

    /// When the last pulse was decoded
    pub fn last_transition_ms(&self) -> Option<u64> {
        self.last_transition_ms
    }
}
