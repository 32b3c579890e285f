//! Configuration type definitions
//!
//! There is no config file: the values below are compiled in and checked
//! once at startup with [`DialConfig::validate`].

use chrono::NaiveDate;

/// Archive date used when the host has none to offer
pub const DEFAULT_ARCHIVE_DATE: &str = "19970101";

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `range_min` is greater than `range_max`
    InvertedRange,
    /// The range does not contain zero, so the dial cannot be re-centred
    RangeExcludesZero,
    /// A pulse would not move the value
    ZeroIncrement,
    /// Rotation scale must be positive
    ZeroPulsesPerRotation,
    /// Commit interval must be positive
    ZeroCommitInterval,
    /// Default date is not a valid `YYYYMMDD` date
    InvalidDefaultDate,
}

/// Rotary encoder scaling and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    /// Decoder pulses per physical rotation of the knob
    pub pulses_per_rotation: u16,
    /// Value change per accepted pulse
    pub pulse_increment: i32,
    /// Lowest dial value (inclusive)
    pub range_min: i32,
    /// Highest dial value (inclusive)
    pub range_max: i32,
    /// Pulses closer than this to the previous accepted pulse are dropped
    pub debounce_ms: u64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            pulses_per_rotation: 30,
            pulse_increment: 1,
            range_min: -200,
            range_max: 200,
            debounce_ms: 100,
        }
    }
}

impl EncoderConfig {
    /// Check the encoder settings for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.range_min > self.range_max {
            return Err(ConfigError::InvertedRange);
        }
        if !(self.range_min..=self.range_max).contains(&0) {
            return Err(ConfigError::RangeExcludesZero);
        }
        if self.pulse_increment == 0 {
            return Err(ConfigError::ZeroIncrement);
        }
        if self.pulses_per_rotation == 0 {
            return Err(ConfigError::ZeroPulsesPerRotation);
        }
        Ok(())
    }
}

/// Top-level dial configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DialConfig {
    /// Encoder scaling and filtering
    pub encoder: EncoderConfig,
    /// How often the displayed date is compared against the last commit
    pub commit_interval_ms: u64,
    /// Fallback archive date, `YYYYMMDD`
    pub default_date: &'static str,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            encoder: EncoderConfig::default(),
            commit_interval_ms: 1000,
            default_date: DEFAULT_ARCHIVE_DATE,
        }
    }
}

impl DialConfig {
    /// Check the whole configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.encoder.validate()?;
        if self.commit_interval_ms == 0 {
            return Err(ConfigError::ZeroCommitInterval);
        }
        self.parsed_default_date()?;
        Ok(())
    }

    /// The fallback archive date as a calendar date
    pub fn parsed_default_date(&self) -> Result<NaiveDate, ConfigError> {
        crate::date::parse_yyyymmdd(self.default_date).ok_or(ConfigError::InvalidDefaultDate)
    }
}
