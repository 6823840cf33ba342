//! Request-window computation.
//!
//! The provider never has same-day or yesterday data available, so the
//! window always closes at the end of the day two calendar days before
//! "now". Both bounds are canonical `23:59:59` instants; the provider treats
//! them as inclusive.

use chrono::{DateTime, Duration, Local, NaiveTime};

/// Date format the provider expects for window bounds.
pub const PROVIDER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Inputs for the window computation, fixed at configuration load.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// How far back to request, measured from the window end. Values below
    /// 24h behave exactly like 24h.
    pub history_interval: Duration,
    /// Explicit window start, used verbatim when set; `history_interval`
    /// then has no effect on the start bound.
    pub start_date: Option<String>,
}

impl WindowConfig {
    pub fn new(history_interval: Duration, start_date: Option<String>) -> Self {
        Self {
            history_interval,
            start_date,
        }
    }
}

/// A `(start, end)` pair formatted for the usage request body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestWindow {
    pub start: String,
    pub end: String,
}

/// Derives the request window for one collection cycle.
///
/// Pure function of its inputs; no failure modes.
pub fn compute_window(now: DateTime<Local>, config: &WindowConfig) -> RequestWindow {
    let one_day = Duration::hours(24);

    let end = end_of_previous_day(now - one_day);

    let start = match config.start_date.as_deref() {
        Some(date) if !date.is_empty() => date.to_string(),
        _ => {
            let effective = if config.history_interval < one_day {
                one_day
            } else {
                config.history_interval
            };
            end_of_previous_day(now - effective - one_day)
                .format(PROVIDER_DATE_FORMAT)
                .to_string()
        }
    };

    RequestWindow {
        start,
        end: end.format(PROVIDER_DATE_FORMAT).to_string(),
    }
}

/// The canonical `23:59:59.000` that closes the day before `instant`'s
/// calendar day.
fn end_of_previous_day(instant: DateTime<Local>) -> DateTime<Local> {
    start_of_day(instant) - Duration::seconds(1)
}

/// Normalizes a DateTime to the beginning of its day (00:00:00).
///
/// The unwrap is safe for any timezone where midnight exists; `with_time`
/// only returns `None` when the resulting instant would be out of range.
fn start_of_day(instant: DateTime<Local>) -> DateTime<Local> {
    instant.with_time(NaiveTime::default()).unwrap()
}
