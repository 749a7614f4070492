pub mod book;
pub mod bookings;
pub mod config;
pub mod db;
pub mod init;
pub mod log;
pub mod map;
pub mod points;
pub mod promotion;
pub mod resource;
pub mod slots;
pub mod vehicle;

use crate::core::clock::{Clock, SystemClock};
use crate::core::ledger::PointsLedger;
use crate::core::notify::ConsoleNotifier;
use crate::db::ledger_store::SqliteTransactionStore;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_time;
use chrono::NaiveTime;

/// The ledger of the user behind this database, printing to the terminal.
pub(crate) fn open_ledger(pool: &DbPool) -> AppResult<PointsLedger<SqliteTransactionStore<'_>>> {
    PointsLedger::open(
        SqliteTransactionStore::new(&pool.conn),
        Box::new(SystemClock),
        Box::new(ConsoleNotifier),
    )
}

/// `--at HH:MM` override, or the current local time.
pub(crate) fn evaluation_time(at: Option<&str>) -> AppResult<NaiveTime> {
    match at {
        Some(s) => parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string())),
        None => Ok(SystemClock.now().time()),
    }
}
