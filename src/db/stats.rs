use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, table: &str) -> rusqlite::Result<i64> {
    pool.conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) ROW COUNTS
    //
    for (label, table) in [
        ("Transactions", "transactions"),
        ("Resources", "resources"),
        ("Bookings", "bookings"),
        ("Booked slots", "booked_slots"),
        ("Vehicles", "vehicles"),
        ("Promotions", "promotions"),
    ] {
        println!(
            "{}• {}:{} {}{}{}",
            CYAN,
            label,
            RESET,
            GREEN,
            count(pool, table)?,
            RESET
        );
    }

    //
    // 3) LEDGER RANGE
    //
    let range: Option<(String, String)> = pool
        .conn
        .query_row(
            "SELECT MIN(timestamp), MAX(timestamp) FROM transactions HAVING COUNT(*) > 0",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (first, last) = range.unwrap_or_else(|| (format!("{GREY}--{RESET}"), format!("{GREY}--{RESET}")));
    println!("{}• Ledger range:{}", CYAN, RESET);
    println!("    from: {}", first);
    println!("    to:   {}", last);

    println!();
    Ok(())
}
