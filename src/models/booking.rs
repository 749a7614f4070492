use crate::utils::ids::next_sequential_id;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum BookingStatus {
    Pending,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether a booking in this status keeps its slot taken.
    pub fn holds_slot(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: String, // BKG001, BKG002, ...
    pub resource_id: String,
    pub customer: String,
    pub date: NaiveDate,
    pub time: u16, // minute of day
    pub duration_minutes: u16,
    pub status: BookingStatus,
    pub created_at: String,
}

const BOOKING_PREFIX: &str = "BKG";

impl Booking {
    /// Next id after the highest existing one, `BKG001` for the first.
    pub fn next_id<'a>(existing: impl IntoIterator<Item = &'a str>) -> String {
        next_sequential_id(BOOKING_PREFIX, existing)
    }
}
