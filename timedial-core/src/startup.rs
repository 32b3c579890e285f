//! Startup precondition
//!
//! The dial only runs against a healthy proxy. The host bridge answers the
//! startup `Hello` with the proxy status and the proxy's current archive
//! date; anything short of a positive answer keeps the control loop from
//! starting.

use chrono::NaiveDate;
use timedial_protocol::HostMessage;

use crate::date;

/// `Hello` attempts before giving up on the host
pub const STARTUP_ATTEMPTS: u8 = 3;

/// How long each `Hello` waits for `Ready`
pub const STARTUP_TIMEOUT_MS: u64 = 2000;

/// How long a `CommitDate` waits for its `CommitResult`
pub const COMMIT_TIMEOUT_MS: u64 = 1500;

/// Reasons the control loop is not entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupError {
    /// No `Ready` after all attempts
    HostUnreachable,
    /// The host answered but the proxy is not running
    ProxyNotReady,
}

/// Decide the initial base date from the host's answer
///
/// `reply` is the first `Ready` received, or `None` if every attempt timed
/// out. Messages other than `Ready` count as no answer. The proxy's date is
/// used when it is a real calendar date, otherwise `default_date`.
pub fn evaluate(
    reply: Option<&HostMessage>,
    default_date: NaiveDate,
) -> Result<NaiveDate, StartupError> {
    match reply {
        Some(HostMessage::Ready {
            proxy_ok: true,
            initial_date,
        }) => Ok(initial_date
            .as_ref()
            .and_then(date::from_wire)
            .unwrap_or(default_date)),
        Some(HostMessage::Ready {
            proxy_ok: false, ..
        }) => Err(StartupError::ProxyNotReady),
        _ => Err(StartupError::HostUnreachable),
    }
}
