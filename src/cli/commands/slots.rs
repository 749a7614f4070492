use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::availability::free_slots;
use crate::db::pool::DbPool;
use crate::db::queries::load_resource;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::date::{format_date, parse_date_arg};
use crate::utils::time::format_minute_of_day;

const SLOTS_PER_LINE: usize = 8;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Slots { resource, date } = cmd {
        let date = parse_date_arg(date)?;
        let pool = DbPool::new(&cfg.database)?;
        let r = load_resource(&pool.conn, resource)?;

        header(format!("{} ({}) on {}", r.name, r.hours, format_date(&date)));

        if !r.manually_available {
            info("This resource is currently offline.");
        }

        let booked: Vec<String> = r
            .booked_on(date)
            .map(|s| format_minute_of_day(s.time))
            .collect();
        if booked.is_empty() {
            println!("No bookings yet for this date.\n");
        } else {
            println!("Booked: {}\n", booked.join(", "));
        }

        let slots = free_slots(&r, date);
        if slots.is_empty() {
            info("No free slots for this date.");
            return Ok(());
        }

        let labels: Vec<String> = slots.iter().map(|m| format_minute_of_day(*m)).collect();
        for chunk in labels.chunks(SLOTS_PER_LINE) {
            println!("  {}", chunk.join("  "));
        }
        println!("\n{} free slot(s) of {} minutes", slots.len(), r.duration_minutes);
    }

    Ok(())
}
