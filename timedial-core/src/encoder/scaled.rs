//! Debounced, clamped dial value
//!
//! Mechanical encoders emit irregular bursts of edges per detent, so pulses
//! are filtered by time since the last accepted pulse rather than by count.

use super::quadrature::{Line, Pulse, QuadratureDecoder};
use crate::config::EncoderConfig;

/// Scaled quadrature encoder
#[derive(Debug, Clone)]
pub struct ScaledEncoder {
    decoder: QuadratureDecoder,
    config: EncoderConfig,
    value: i32,
    /// Accepted pulses, including those absorbed by clamping
    pulse_count: i64,
    last_pulse_ms: Option<u64>,
}

impl ScaledEncoder {
    /// Create an encoder at `initial` (clamped into range)
    ///
    /// `levels` are the `(A, B)` line levels sampled at startup.
    pub fn new(config: EncoderConfig, levels: (bool, bool), initial: i32) -> Self {
        Self {
            decoder: QuadratureDecoder::new(levels.0, levels.1),
            config,
            value: initial.clamp(config.range_min, config.range_max),
            pulse_count: 0,
            last_pulse_ms: None,
        }
    }

    /// Feed a raw line change through the decoder
    ///
    /// Returns the new value if it changed.
    pub fn on_line_change(&mut self, line: Line, level: bool, now_ms: u64) -> Option<i32> {
        let pulse = self.decoder.on_line_change(line, level, now_ms)?;
        self.apply_pulse(pulse, now_ms)
    }

    /// Feed a sample of both lines through the decoder
    ///
    /// Returns the new value if it changed.
    pub fn on_levels(&mut self, a: bool, b: bool, now_ms: u64) -> Option<i32> {
        let pulse = self.decoder.on_levels(a, b, now_ms)?;
        self.apply_pulse(pulse, now_ms)
    }

    /// Apply one decoded pulse
    ///
    /// Pulses inside the debounce window of the previous accepted pulse are
    /// dropped. Returns the new value if it changed; a pulse pushing against
    /// a range bound is accepted but leaves the value where it is.
    pub fn apply_pulse(&mut self, pulse: Pulse, now_ms: u64) -> Option<i32> {
        if let Some(last) = self.last_pulse_ms {
            if now_ms.saturating_sub(last) < self.config.debounce_ms {
                return None;
            }
        }
        self.last_pulse_ms = Some(now_ms);
        self.pulse_count += i64::from(pulse.sign());

        let step = pulse.sign().saturating_mul(self.config.pulse_increment);
        let next = self
            .value
            .saturating_add(step)
            .clamp(self.config.range_min, self.config.range_max);

        if next == self.value {
            return None;
        }
        self.value = next;
        Some(next)
    }

    /// Overwrite the value
    ///
    /// Always reports the stored value, even when it did not change, so the
    /// caller can refresh unconditionally.
    pub fn set_value(&mut self, value: i32) -> i32 {
        self.value = value.clamp(self.config.range_min, self.config.range_max);
        self.value
    }

    /// Current dial value
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Accepted pulses since startup
    pub fn pulse_count(&self) -> i64 {
        self.pulse_count
    }

    /// Accepted pulses expressed in knob rotations
    pub fn rotations(&self) -> f32 {
        self.pulse_count as f32 / f32::from(self.config.pulses_per_rotation)
    }

    /// The underlying decoder
    pub fn decoder(&self) -> &QuadratureDecoder {
        &self.decoder
    }

    /// Active configuration
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}
