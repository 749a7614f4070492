use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Applied migrations are recorded there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250611_0001_create_transactions",
        description: "Created GreenPoints transactions table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS transactions (
                id          INTEGER PRIMARY KEY,
                kind        TEXT NOT NULL CHECK(kind IN ('earned','spent')),
                amount      INTEGER NOT NULL CHECK(amount > 0),
                description TEXT NOT NULL DEFAULT '',
                timestamp   TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_transactions_timestamp ON transactions(timestamp);
        "#,
    },
    Migration {
        version: "20250611_0002_create_resources",
        description: "Created resources and booked_slots tables",
        sql: r#"
            CREATE TABLE IF NOT EXISTS resources (
                id                 TEXT PRIMARY KEY,
                name               TEXT NOT NULL,
                kind               TEXT NOT NULL CHECK(kind IN ('charger','service')),
                open_time          TEXT NOT NULL,
                close_time         TEXT NOT NULL,
                break_start        TEXT,
                break_end          TEXT,
                duration           INTEGER NOT NULL CHECK(duration > 0),
                manually_available INTEGER NOT NULL DEFAULT 1,
                charger_type       TEXT,
                connector          TEXT,
                price              REAL NOT NULL DEFAULT 0,
                free               INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS booked_slots (
                resource_id TEXT NOT NULL,
                date        TEXT NOT NULL,
                time        TEXT NOT NULL,
                PRIMARY KEY (resource_id, date, time)
            );
        "#,
    },
    Migration {
        version: "20250611_0003_create_bookings",
        description: "Created bookings table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id          TEXT PRIMARY KEY,
                resource_id TEXT NOT NULL,
                customer    TEXT NOT NULL,
                date        TEXT NOT NULL,
                time        TEXT NOT NULL,
                duration    INTEGER NOT NULL,
                status      TEXT NOT NULL DEFAULT 'pending'
                            CHECK(status IN ('pending','completed','cancelled')),
                created_at  TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_bookings_resource_date ON bookings(resource_id, date);
        "#,
    },
    Migration {
        version: "20250612_0004_create_vehicles",
        description: "Created vehicles table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS vehicles (
                id      TEXT PRIMARY KEY,
                make    TEXT NOT NULL,
                model   TEXT NOT NULL,
                year    INTEGER NOT NULL,
                battery INTEGER NOT NULL CHECK(battery > 0),
                plate   TEXT NOT NULL
            );
        "#,
    },
    Migration {
        version: "20250612_0005_create_promotions",
        description: "Created promotions table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS promotions (
                id          TEXT PRIMARY KEY,
                code        TEXT NOT NULL UNIQUE,
                description TEXT NOT NULL DEFAULT '',
                kind        TEXT NOT NULL CHECK(kind IN ('percentage','fixed')),
                value       REAL NOT NULL CHECK(value > 0),
                expiry      TEXT,
                usage_limit INTEGER CHECK(usage_limit IS NULL OR usage_limit > 0)
            );
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;
    tx.commit()?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Public entry point: run all pending migrations, in order.
/// Returns how many were applied.
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
            applied += 1;
        }
    }

    Ok(applied)
}
