/// ANSI color helper utilities for terminal output.
use crate::models::status::AvailabilityStatus;
use crate::models::transaction::TransactionKind;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Earned → green, Spent → red
pub fn color_for_kind(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Earned => GREEN,
        TransactionKind::Spent => RED,
    }
}

/// Available → green, Occupied → yellow, Closed → grey
pub fn color_for_status(status: AvailabilityStatus) -> &'static str {
    match status {
        AvailabilityStatus::Available => GREEN,
        AvailabilityStatus::Occupied => YELLOW,
        AvailabilityStatus::Closed => GREY,
    }
}

/// Greys out empty placeholders such as `--` or `--:--`.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--" || v == "--:--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
