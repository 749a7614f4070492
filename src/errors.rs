//! Unified application error type.
//! Every module (db, core, cli, export) returns AppError so the binary can
//! print a single consistent message and exit.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing / validation
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid working hours: {0}")]
    InvalidWorkingHours(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ---------------------------
    // Ledger
    // ---------------------------
    #[error("Points amount must be positive (got {0})")]
    InvalidAmount(i64),

    #[error("Not enough GreenPoints: requested {requested}, available {available}")]
    InsufficientBalance { requested: i64, available: i64 },

    #[error("GreenPoints overflow: {0}")]
    PointsOverflow(String),

    // ---------------------------
    // Resources and bookings
    // ---------------------------
    #[error("{kind} not found: {id}")]
    ResourceNotFound { kind: &'static str, id: String },

    #[error("Slot {time} on {date} is not available for {resource}")]
    SlotUnavailable {
        resource: String,
        date: String,
        time: String,
    },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

impl AppError {
    pub fn resource_not_found(id: impl Into<String>) -> Self {
        AppError::ResourceNotFound {
            kind: "Resource",
            id: id.into(),
        }
    }

    pub fn booking_not_found(id: impl Into<String>) -> Self {
        AppError::ResourceNotFound {
            kind: "Booking",
            id: id.into(),
        }
    }

    pub fn vehicle_not_found(id: impl Into<String>) -> Self {
        AppError::ResourceNotFound {
            kind: "Vehicle",
            id: id.into(),
        }
    }

    pub fn promotion_not_found(id: impl Into<String>) -> Self {
        AppError::ResourceNotFound {
            kind: "Promotion",
            id: id.into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
