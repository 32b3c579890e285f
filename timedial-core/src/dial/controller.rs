//! Event controller
//!
//! Sole owner of the encoder value and the dial state machine. Hardware
//! callbacks only enqueue [`InputEvent`]s; the control loop feeds them here
//! one at a time, so no state is shared between contexts.

use chrono::NaiveDate;

use super::machine::{DialMode, DialStateMachine};
use crate::config::EncoderConfig;
use crate::encoder::{Line, ScaledEncoder};

/// Events delivered by the hardware edge handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// A phase line changed level
    LineChange { line: Line, level: bool, at_ms: u64 },
    /// Both phase lines changed since the previous sample
    Levels { a: bool, b: bool, at_ms: u64 },
    /// The button was pressed (one event per physical press)
    ButtonPress,
}

/// Everything the panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialView {
    /// Date derived from base date, mode and dial value
    pub date: NaiveDate,
    pub mode: DialMode,
    pub dial_value: i32,
}

#[cfg(feature = "defmt")]
impl defmt::Format for DialView {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "DialView {{ date: {}, mode: {}, value: {} }}",
            crate::date::as_u32(self.date),
            self.mode,
            self.dial_value
        );
    }
}

/// Binds encoder motion and button presses to the dial state machine
#[derive(Debug, Clone)]
pub struct DialController {
    encoder: ScaledEncoder,
    dial: DialStateMachine,
}

impl DialController {
    /// Create a controller at `base_date`, Month mode, dial value 0
    pub fn new(config: EncoderConfig, levels: (bool, bool), base_date: NaiveDate) -> Self {
        Self {
            encoder: ScaledEncoder::new(config, levels, 0),
            dial: DialStateMachine::new(base_date),
        }
    }

    /// Process one event
    ///
    /// Returns the view to render when something visible changed.
    pub fn handle(&mut self, event: InputEvent) -> Option<DialView> {
        match event {
            InputEvent::LineChange { line, level, at_ms } => {
                self.encoder.on_line_change(line, level, at_ms)?;
                Some(self.view())
            }
            InputEvent::Levels { a, b, at_ms } => {
                self.encoder.on_levels(a, b, at_ms)?;
                Some(self.view())
            }
            InputEvent::ButtonPress => {
                self.press();
                Some(self.view())
            }
        }
    }

    /// Commit the current dial position and re-centre for the other mode
    fn press(&mut self) {
        self.dial.commit(self.encoder.value());
        self.encoder.set_value(0);
    }

    /// Current view
    pub fn view(&self) -> DialView {
        let dial_value = self.encoder.value();
        DialView {
            date: self.dial.displayed_date(dial_value),
            mode: self.dial.mode(),
            dial_value,
        }
    }

    /// The scaled encoder
    pub fn encoder(&self) -> &ScaledEncoder {
        &self.encoder
    }

    /// The dial state machine
    pub fn dial(&self) -> &DialStateMachine {
        &self.dial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn controller() -> DialController {
        let cfg = EncoderConfig {
            debounce_ms: 0,
            ..Default::default()
        };
        DialController::new(cfg, (false, false), ymd(2024, 6, 15))
    }

    fn edge(line: Line, level: bool, at_ms: u64) -> InputEvent {
        InputEvent::LineChange { line, level, at_ms }
    }

    #[test]
    fn test_initial_view() {
        let ctl = controller();
        let view = ctl.view();
        assert_eq!(view.date, ymd(2024, 6, 15));
        assert_eq!(view.mode, DialMode::Month);
        assert_eq!(view.dial_value, 0);
    }

    #[test]
    fn test_encoder_change_yields_view() {
        let mut ctl = controller();
        let view = ctl.handle(edge(Line::A, true, 0)).unwrap();
        assert_eq!(view.dial_value, 1);
        assert_eq!(view.date, ymd(2024, 5, 15));
        assert_eq!(view.mode, DialMode::Month);
    }

    #[test]
    fn test_noise_yields_nothing() {
        let mut ctl = controller();
        assert_eq!(ctl.handle(edge(Line::A, false, 0)), None);
    }

    #[test]
    fn test_missed_middle_edge_is_not_a_step() {
        // Reverse 00 -> 01 -> 11 seen as one sample
        let mut ctl = controller();
        let jump = InputEvent::Levels {
            a: true,
            b: true,
            at_ms: 0,
        };
        assert_eq!(ctl.handle(jump), None);
        assert_eq!(ctl.view().dial_value, 0);

        // Forward 01 -> 00 -> 10 seen as one sample
        let cfg = EncoderConfig {
            debounce_ms: 0,
            ..Default::default()
        };
        let mut ctl = DialController::new(cfg, (false, true), ymd(2024, 6, 15));
        let jump = InputEvent::Levels {
            a: true,
            b: false,
            at_ms: 0,
        };
        assert_eq!(ctl.handle(jump), None);
        assert_eq!(ctl.view().date, ymd(2024, 6, 15));
    }

    #[test]
    fn test_button_commits_and_recentres() {
        let mut ctl = controller();
        ctl.handle(edge(Line::A, true, 0));
        ctl.handle(edge(Line::B, true, 1));
        ctl.handle(edge(Line::A, false, 2));

        let view = ctl.handle(InputEvent::ButtonPress).unwrap();
        assert_eq!(view.date, ymd(2024, 3, 15));
        assert_eq!(view.mode, DialMode::Year);
        assert_eq!(view.dial_value, 0);
        assert_eq!(ctl.dial().base_date(), ymd(2024, 3, 15));
        assert_eq!(ctl.encoder().value(), 0);
    }

    #[test]
    fn test_button_without_motion_still_refreshes() {
        let mut ctl = controller();
        let first = ctl.handle(InputEvent::ButtonPress).unwrap();
        let second = ctl.handle(InputEvent::ButtonPress).unwrap();
        assert_eq!(first.mode, DialMode::Year);
        assert_eq!(second.mode, DialMode::Month);
        assert_eq!(second.date, ymd(2024, 6, 15));
    }

    #[test]
    fn test_year_mode_after_press() {
        let mut ctl = controller();
        ctl.handle(InputEvent::ButtonPress);
        // Reverse step: B leads A
        let view = ctl.handle(edge(Line::B, true, 0)).unwrap();
        assert_eq!(view.dial_value, -1);
        assert_eq!(view.date, ymd(2025, 6, 15));
    }
}
