use crate::core::availability::is_slot_free;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{
    booking_ids, delete_booking, insert_booking, load_booking, load_resource,
    update_booking_status,
};
use crate::errors::{AppError, AppResult};
use crate::models::booking::{Booking, BookingStatus};
use crate::models::resource::Resource;
use crate::utils::date::format_date;
use crate::utils::time::format_minute_of_day;
use chrono::{DateTime, FixedOffset, NaiveDate};

/// Validated input for a new booking.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub resource_id: String,
    pub customer: String,
    pub date: NaiveDate,
    pub time: u16,
}

impl BookingRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.customer.trim().is_empty() {
            return Err(AppError::InvalidInput("customer name is required".into()));
        }
        Ok(())
    }
}

fn slot_unavailable(resource: &Resource, date: NaiveDate, time: u16) -> AppError {
    AppError::SlotUnavailable {
        resource: resource.id.clone(),
        date: format_date(&date),
        time: format_minute_of_day(time),
    }
}

pub struct BookingLogic;

impl BookingLogic {
    /// Book a free slot. The slot must be one of the currently free ones.
    pub fn create(
        pool: &DbPool,
        req: &BookingRequest,
        now: DateTime<FixedOffset>,
    ) -> AppResult<Booking> {
        req.validate()?;

        let resource = load_resource(&pool.conn, &req.resource_id)?;
        if !is_slot_free(&resource, req.date, req.time) {
            return Err(slot_unavailable(&resource, req.date, req.time));
        }

        let ids = booking_ids(&pool.conn)?;
        let booking = Booking {
            id: Booking::next_id(ids.iter().map(String::as_str)),
            resource_id: resource.id.clone(),
            customer: req.customer.trim().to_string(),
            date: req.date,
            time: req.time,
            duration_minutes: resource.duration_minutes,
            status: BookingStatus::Pending,
            created_at: now.to_rfc3339(),
        };

        insert_booking(&pool.conn, &booking)?;
        audit(
            &pool.conn,
            "book",
            &booking.id,
            &format!(
                "{} booked {} on {} at {}",
                booking.customer,
                booking.resource_id,
                format_date(&booking.date),
                format_minute_of_day(booking.time)
            ),
        );
        Ok(booking)
    }

    /// Change status. Cancelling releases the slot; reopening a cancelled
    /// booking needs the slot to be free again.
    pub fn set_status(pool: &DbPool, id: &str, status: BookingStatus) -> AppResult<Booking> {
        let mut booking = load_booking(&pool.conn, id)?;
        if booking.status == status {
            return Ok(booking);
        }

        if !booking.status.holds_slot() && status.holds_slot() {
            let resource = load_resource(&pool.conn, &booking.resource_id)?;
            if !is_slot_free(&resource, booking.date, booking.time) {
                return Err(slot_unavailable(&resource, booking.date, booking.time));
            }
        }

        update_booking_status(&pool.conn, &booking, status)?;
        audit(
            &pool.conn,
            "booking_status",
            id,
            &format!("{} → {}", booking.status.to_db_str(), status.to_db_str()),
        );
        booking.status = status;
        Ok(booking)
    }

    pub fn delete(pool: &DbPool, id: &str) -> AppResult<Booking> {
        let booking = load_booking(&pool.conn, id)?;
        delete_booking(&pool.conn, &booking)?;
        audit(&pool.conn, "booking_del", id, "booking deleted");
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::availability::free_slots;
    use crate::core::resource::ResourceLogic;
    use crate::models::resource::ResourceKind;
    use crate::models::working_hours::WorkingHours;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-06-11T01:11:00+04:00").unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 12).unwrap()
    }

    fn setup() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        let hours = WorkingHours::parse("09:00", "17:00", Some("12:00"), Some("13:00")).unwrap();
        let svc = Resource::new("sv1", "Battery Diagnostic", ResourceKind::Service, hours, 60);
        ResourceLogic::add(&pool, &svc).unwrap();
        pool
    }

    fn request(time: u16) -> BookingRequest {
        BookingRequest {
            resource_id: "sv1".into(),
            customer: "John Doe".into(),
            date: date(),
            time,
        }
    }

    fn free(pool: &DbPool) -> Vec<u16> {
        free_slots(&load_resource(&pool.conn, "sv1").unwrap(), date())
    }

    #[test]
    fn booking_takes_the_slot() {
        let pool = setup();
        let b = BookingLogic::create(&pool, &request(600), now()).unwrap();
        assert_eq!(b.id, "BKG001");
        assert_eq!(b.status, BookingStatus::Pending);
        assert_eq!(b.duration_minutes, 60);
        assert!(!free(&pool).contains(&600));

        let b2 = BookingLogic::create(&pool, &request(630), now()).unwrap();
        assert_eq!(b2.id, "BKG002");
    }

    #[test]
    fn double_booking_the_same_start_fails() {
        let pool = setup();
        BookingLogic::create(&pool, &request(600), now()).unwrap();
        assert!(matches!(
            BookingLogic::create(&pool, &request(600), now()),
            Err(AppError::SlotUnavailable { .. })
        ));
    }

    #[test]
    fn slots_outside_the_offer_are_rejected() {
        let pool = setup();
        // break, misaligned, too late for a 60 minute service
        for t in [720, 605, 990] {
            assert!(matches!(
                BookingLogic::create(&pool, &request(t), now()),
                Err(AppError::SlotUnavailable { .. })
            ));
        }
    }

    #[test]
    fn unknown_resource_is_not_found() {
        let pool = setup();
        let mut req = request(600);
        req.resource_id = "ghost".into();
        assert!(matches!(
            BookingLogic::create(&pool, &req, now()),
            Err(AppError::ResourceNotFound { kind: "Resource", .. })
        ));
    }

    #[test]
    fn cancelling_releases_and_reopening_retakes() {
        let pool = setup();
        let b = BookingLogic::create(&pool, &request(600), now()).unwrap();

        BookingLogic::set_status(&pool, &b.id, BookingStatus::Cancelled).unwrap();
        assert!(free(&pool).contains(&600));

        BookingLogic::set_status(&pool, &b.id, BookingStatus::Pending).unwrap();
        assert!(!free(&pool).contains(&600));
    }

    #[test]
    fn reopening_fails_when_slot_was_rebooked() {
        let pool = setup();
        let b = BookingLogic::create(&pool, &request(600), now()).unwrap();
        BookingLogic::set_status(&pool, &b.id, BookingStatus::Cancelled).unwrap();
        BookingLogic::create(&pool, &request(600), now()).unwrap();

        assert!(matches!(
            BookingLogic::set_status(&pool, &b.id, BookingStatus::Pending),
            Err(AppError::SlotUnavailable { .. })
        ));
    }

    #[test]
    fn completed_keeps_the_slot() {
        let pool = setup();
        let b = BookingLogic::create(&pool, &request(600), now()).unwrap();
        let done = BookingLogic::set_status(&pool, &b.id, BookingStatus::Completed).unwrap();
        assert_eq!(done.status, BookingStatus::Completed);
        assert!(!free(&pool).contains(&600));
    }

    #[test]
    fn deleting_releases_the_slot() {
        let pool = setup();
        let b = BookingLogic::create(&pool, &request(600), now()).unwrap();
        BookingLogic::delete(&pool, &b.id).unwrap();
        assert!(free(&pool).contains(&600));
        assert!(matches!(
            BookingLogic::delete(&pool, &b.id),
            Err(AppError::ResourceNotFound { kind: "Booking", .. })
        ));
    }

    #[test]
    fn blank_customer_is_rejected() {
        let pool = setup();
        let mut req = request(600);
        req.customer = "  ".into();
        assert!(matches!(
            BookingLogic::create(&pool, &req, now()),
            Err(AppError::InvalidInput(_))
        ));
    }
}
