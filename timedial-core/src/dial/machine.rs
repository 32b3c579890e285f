//! Dial state machine
//!
//! Two modes, no intermediate states. The displayed date is never stored:
//! it is always recomputed from the base date, the mode and the dial value.

use chrono::NaiveDate;

use crate::date;

/// Unit the dial value is counted in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DialMode {
    Month,
    Year,
}

impl DialMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            DialMode::Month => DialMode::Year,
            DialMode::Year => DialMode::Month,
        }
    }

    /// Label shown on the panel
    pub fn label(self) -> &'static str {
        match self {
            DialMode::Month => "Month",
            DialMode::Year => "Year",
        }
    }
}

/// Month/Year dial state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialStateMachine {
    mode: DialMode,
    base_date: NaiveDate,
}

impl DialStateMachine {
    /// Start in Month mode at `base_date`
    pub fn new(base_date: NaiveDate) -> Self {
        Self {
            mode: DialMode::Month,
            base_date,
        }
    }

    /// Date shown for a given dial value
    ///
    /// The encoder counts up when the knob turns counter-clockwise, so the
    /// value is negated: turning clockwise moves forward in time.
    pub fn displayed_date(&self, dial_value: i32) -> NaiveDate {
        let offset = -i64::from(dial_value);
        match self.mode {
            DialMode::Month => date::add_months(self.base_date, offset),
            DialMode::Year => date::add_years(self.base_date, offset),
        }
    }

    /// Button press: fold the dial offset into the base date and switch mode
    ///
    /// Returns the new base date. The caller must re-centre the dial to 0.
    pub fn commit(&mut self, dial_value: i32) -> NaiveDate {
        self.base_date = self.displayed_date(dial_value);
        self.mode = self.mode.toggled();
        self.base_date
    }

    /// Current mode
    pub fn mode(&self) -> DialMode {
        self.mode
    }

    /// Last committed date
    pub fn base_date(&self) -> NaiveDate {
        self.base_date
    }
}
