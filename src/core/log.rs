use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::visible_width;
use ansi_term::Colour;

const OP_MAX_WIDTH: usize = 60;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "earn" | "book" => Colour::Green,
        "spend" | "redeem" => Colour::Yellow,
        "resource_add" | "vehicle_add" | "promotion_add" => Colour::Cyan,
        "resource_toggle" | "booking_status" | "vehicle_edit" | "export" => Colour::Blue,
        "resource_del" | "booking_del" | "vehicle_del" | "promotion_del" => Colour::Red,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(102, 187, 106),
        _ => Colour::White,
    }
}

fn display_date(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%FT%T%:z").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// "operation (target)" with the operation coloured, cut to `max` visible chars.
fn render_op_target(entry: &LogEntry, max: usize) -> String {
    let color = color_for_operation(&entry.operation);
    let plain = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let visible = if plain.chars().count() > max {
        let mut s: String = plain.chars().take(max.saturating_sub(3)).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|e| e.operation.len() + e.target.len() + 3)
            .max()
            .unwrap_or(10)
            .min(OP_MAX_WIDTH);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let dates: Vec<String> = entries.iter().map(|e| display_date(&e.date)).collect();
        let date_w = dates.iter().map(String::len).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for (entry, date) in entries.iter().zip(dates) {
            let op_target = render_op_target(entry, OP_MAX_WIDTH);
            let padding = " ".repeat(op_w.saturating_sub(visible_width(&op_target)));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id,
                date,
                op_target,
                padding,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
