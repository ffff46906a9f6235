// Calendar-date plumbing shared by the engine and the snapshot decoder.
// All dates are date-only (no time component), wire form "YYYY-MM-DD".

use chrono::NaiveDate;
use thiserror::Error;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// Raised when a date string cannot be parsed into a calendar date.
// Propagated to the caller, never swallowed.
#[derive(Error, Debug)]
#[error("invalid calendar date {input:?}: {source}")]
pub struct InvalidDateError {
    pub input: String,
    #[source]
    pub source: chrono::ParseError,
}

// Parse a "YYYY-MM-DD" string into a calendar date
pub fn parse_day(input: &str) -> Result<NaiveDate, InvalidDateError> {
    NaiveDate::parse_from_str(input, ISO_DATE_FORMAT).map_err(|source| InvalidDateError {
        input: input.to_string(),
        source,
    })
}

// Expand a closed interval [check_in, check_out] into the inclusive list of
// calendar days. An inverted interval yields an empty list, not an error.
pub fn expand_range(check_in: NaiveDate, check_out: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = check_in;
    while day <= check_out {
        days.push(day);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break, // end of the calendar
        }
    }
    days
}

// The nights a booking actually occupies: half-open [check_in, check_out),
// so the checkout day stays free for the next guest. A same-day booking
// (check_in == check_out) occupies exactly that one day.
pub fn booking_nights(check_in: NaiveDate, check_out: NaiveDate) -> Vec<NaiveDate> {
    if check_in == check_out {
        return vec![check_in];
    }
    match check_out.pred_opt() {
        Some(last_night) => expand_range(check_in, last_night),
        None => Vec::new(),
    }
}
