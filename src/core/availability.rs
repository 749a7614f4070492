//! Open/closed/available evaluation and free slot enumeration.
//!
//! All functions are pure: same inputs, same output, no state kept
//! between calls.

use crate::models::resource::Resource;
use crate::models::status::AvailabilityStatus;
use crate::models::working_hours::WorkingHours;
use crate::utils::time::minute_of_day;
use chrono::{NaiveDate, Timelike};

/// Distance between two offered start times, independent of duration.
pub const SLOT_STEP_MINUTES: u16 = 30;

/// True when `at` falls in `[start, end]`.
///
/// Both bounds are inclusive, so a resource closing at 17:00 still reads
/// as open at 17:00 exactly. Slot generation uses a half-open window.
pub fn is_open_at<T: Timelike>(hours: &WorkingHours, at: &T) -> bool {
    let m = minute_of_day(at);
    m >= hours.start() && m <= hours.end()
}

pub fn is_available_at<T: Timelike>(resource: &Resource, at: &T) -> bool {
    resource.manually_available && is_open_at(&resource.hours, at)
}

pub fn classify<T: Timelike>(
    hours: &WorkingHours,
    manually_available: bool,
    at: &T,
) -> AvailabilityStatus {
    match (is_open_at(hours, at), manually_available) {
        (false, _) => AvailabilityStatus::Closed,
        (true, true) => AvailabilityStatus::Available,
        (true, false) => AvailabilityStatus::Occupied,
    }
}

pub fn status_of<T: Timelike>(resource: &Resource, at: &T) -> AvailabilityStatus {
    classify(&resource.hours, resource.manually_available, at)
}

/// Start times (minute of day, ascending) still bookable on `date`.
///
/// Starts at opening time and steps by [`SLOT_STEP_MINUTES`] while the
/// whole duration fits before closing. Starts inside the break and starts
/// already booked on `date` are skipped. Only exact start matches count
/// as booked: a 60 minute booking at 10:00 does not hide 10:30.
pub fn free_slots(resource: &Resource, date: NaiveDate) -> Vec<u16> {
    let hours = &resource.hours;
    let duration = u32::from(resource.duration_minutes.max(1));
    let end = u32::from(hours.end());

    let mut out = Vec::new();
    let mut t = hours.start();
    while u32::from(t) + duration <= end {
        if !hours.in_break(t) && !resource.is_booked(date, t) {
            out.push(t);
        }
        t += SLOT_STEP_MINUTES;
    }
    out
}

pub fn is_slot_free(resource: &Resource, date: NaiveDate, time: u16) -> bool {
    free_slots(resource, date).contains(&time)
}
