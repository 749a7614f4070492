use crate::cli::parser::BookingsAction;
use crate::config::Config;
use crate::core::booking::BookingLogic;
use crate::db::pool::DbPool;
use crate::db::queries::load_bookings;
use crate::errors::AppResult;
use crate::models::booking::BookingStatus;
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREEN, GREY, RESET, YELLOW};
use crate::utils::date::format_date;
use crate::utils::table::Table;
use crate::utils::time::format_minute_of_day;

fn status_cell(status: BookingStatus) -> String {
    let color = match status {
        BookingStatus::Pending => YELLOW,
        BookingStatus::Completed => GREEN,
        BookingStatus::Cancelled => GREY,
    };
    format!("{}{}{}", color, status.to_db_str(), RESET)
}

pub fn handle(action: &BookingsAction, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match action {
        BookingsAction::List { resource } => {
            let bookings = load_bookings(&pool.conn, resource.as_deref())?;
            if bookings.is_empty() {
                info("No bookings found.");
                return Ok(());
            }

            let mut table = Table::with_headers(&[
                "ID", "Resource", "Customer", "Date", "Time", "Duration", "Status",
            ]);
            for b in &bookings {
                table.add_row(vec![
                    b.id.clone(),
                    b.resource_id.clone(),
                    b.customer.clone(),
                    format_date(&b.date),
                    format_minute_of_day(b.time),
                    format!("{}m", b.duration_minutes),
                    status_cell(b.status),
                ]);
            }
            print!("{}", table.render(&cfg.separator_char));
        }
        BookingsAction::Status { id, status } => {
            let b = BookingLogic::set_status(&pool, id, *status)?;
            success(format!("Booking {} is now {}", b.id, b.status.to_db_str()));
        }
        BookingsAction::Del { id } => {
            let b = BookingLogic::delete(&pool, id)?;
            success(format!("Booking {} deleted", b.id));
        }
    }

    Ok(())
}
