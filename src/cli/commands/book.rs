use crate::cli::commands::open_ledger;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::booking::{BookingLogic, BookingRequest};
use crate::core::clock::{Clock, SystemClock};
use crate::core::rewards::RewardsLogic;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::date::{format_date, parse_date_arg};
use crate::utils::time::{format_minute_of_day, parse_minute_of_day};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Book {
        resource,
        date,
        time,
        customer,
    } = cmd
    {
        let req = BookingRequest {
            resource_id: resource.clone(),
            customer: customer.clone(),
            date: parse_date_arg(date)?,
            time: parse_minute_of_day(time)?,
        };

        let pool = DbPool::new(&cfg.database)?;
        let booking = BookingLogic::create(&pool, &req, SystemClock.now())?;

        success(format!(
            "Booking {} confirmed: {} on {} at {} ({} min)",
            booking.id,
            booking.resource_id,
            format_date(&booking.date),
            format_minute_of_day(booking.time),
            booking.duration_minutes
        ));

        // The booking is committed: a reward failure must not report it as failed.
        let reward = open_ledger(&pool)
            .and_then(|mut ledger| RewardsLogic::earn_booking(&mut ledger, &cfg.points));
        match reward {
            Ok(Some(tx)) => audit(
                &pool.conn,
                "earn",
                &tx.id.to_string(),
                &format!("+{} {} ({})", tx.amount, tx.description, booking.id),
            ),
            Ok(None) => {}
            Err(e) => warning(format!("Booking points not credited: {}", e)),
        }
    }

    Ok(())
}
