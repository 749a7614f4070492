use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Initialize the database.
/// All schema creation goes through the migration runner.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    migrate(conn)?;
    Ok(())
}

/// Apply pending migrations, returning how many ran.
pub fn migrate(conn: &Connection) -> AppResult<usize> {
    run_pending_migrations(conn).map_err(|e| AppError::Migration(e.to_string()))
}
