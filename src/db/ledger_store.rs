//! SQLite backed [`TransactionStore`].

use crate::core::ledger::TransactionStore;
use crate::errors::{AppError, AppResult};
use crate::models::transaction::{Transaction, TransactionKind};
use chrono::DateTime;
use rusqlite::{Connection, Row, params};

pub struct SqliteTransactionStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteTransactionStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

fn map_row(row: &Row) -> rusqlite::Result<Transaction> {
    let kind_str: String = row.get("kind")?;
    let kind = TransactionKind::from_db_str(&kind_str).ok_or_else(|| {
        conversion_error(AppError::InvalidInput(format!(
            "unknown transaction kind: {}",
            kind_str
        )))
    })?;

    let ts_str: String = row.get("timestamp")?;
    let timestamp = DateTime::parse_from_rfc3339(&ts_str)
        .map_err(|_| conversion_error(AppError::InvalidDate(ts_str.clone())))?;

    Ok(Transaction {
        id: row.get("id")?,
        kind,
        amount: row.get("amount")?,
        description: row.get("description")?,
        timestamp,
    })
}

impl TransactionStore for SqliteTransactionStore<'_> {
    fn load(&self) -> AppResult<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, kind, amount, description, timestamp
             FROM transactions
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], map_row)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Transactions are immutable, so rows already stored are left alone.
    fn save(&mut self, transactions: &[Transaction]) -> AppResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR IGNORE INTO transactions (id, kind, amount, description, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for t in transactions {
                stmt.execute(params![
                    t.id,
                    t.kind.to_db_str(),
                    t.amount,
                    t.description,
                    t.timestamp_str(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::{Clock, FixedClock};
    use crate::core::ledger::PointsLedger;
    use crate::core::notify::RecordingNotifier;
    use crate::db::pool::DbPool;

    fn open<'c>(conn: &'c Connection, clock: &FixedClock) -> PointsLedger<SqliteTransactionStore<'c>> {
        PointsLedger::open(
            SqliteTransactionStore::new(conn),
            Box::new(clock.clone()),
            Box::new(RecordingNotifier::default()),
        )
        .unwrap()
    }

    #[test]
    fn reopened_ledger_sees_the_same_history() {
        let pool = DbPool::in_memory().unwrap();
        let clock = FixedClock::new(DateTime::parse_from_rfc3339("2025-06-11T01:11:00+04:00").unwrap());

        {
            let mut ledger = open(&pool.conn, &clock);
            ledger.earn(200, "Welcome Bonus").unwrap();
            ledger.spend(50, "Redeemed for $5.00 charging discount").unwrap();
        }

        let ledger = open(&pool.conn, &clock);
        assert_eq!(ledger.current_balance(), 150);
        assert_eq!(ledger.transactions().len(), 2);
        assert_eq!(ledger.transactions()[1].kind, TransactionKind::Spent);
        assert_eq!(ledger.transactions()[0].timestamp, clock.now());
    }

    #[test]
    fn saving_twice_does_not_duplicate_rows() {
        let pool = DbPool::in_memory().unwrap();
        let clock = FixedClock::new(DateTime::parse_from_rfc3339("2025-06-11T01:11:00+04:00").unwrap());
        let mut ledger = open(&pool.conn, &clock);
        ledger.earn(10, "a").unwrap();
        ledger.earn(10, "b").unwrap();

        let count: i64 = pool
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }
}
