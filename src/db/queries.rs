use crate::errors::{AppError, AppResult};
use crate::models::booking::{Booking, BookingStatus};
use crate::models::promotion::{Promotion, PromotionKind};
use crate::models::resource::{
    BookedSlot, ChargerType, Connector, Resource, ResourceKind,
};
use crate::models::vehicle::Vehicle;
use crate::models::working_hours::WorkingHours;
use crate::utils::time::{format_minute_of_day, parse_minute_of_day};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_date_col(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| conversion_error(AppError::InvalidDate(s.to_string())))
}

fn parse_time_col(s: &str) -> Result<u16> {
    parse_minute_of_day(s).map_err(conversion_error)
}

fn date_str(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

// ------------------------------------------------
// Resources
// ------------------------------------------------

fn map_resource(row: &Row) -> Result<Resource> {
    let kind_str: String = row.get("kind")?;
    let kind = ResourceKind::from_db_str(&kind_str).ok_or_else(|| {
        conversion_error(AppError::InvalidInput(format!(
            "unknown resource kind: {}",
            kind_str
        )))
    })?;

    let open: String = row.get("open_time")?;
    let close: String = row.get("close_time")?;
    let break_start: Option<String> = row.get("break_start")?;
    let break_end: Option<String> = row.get("break_end")?;
    let hours = WorkingHours::parse(&open, &close, break_start.as_deref(), break_end.as_deref())
        .map_err(conversion_error)?;

    let charger_type: Option<String> = row.get("charger_type")?;
    let connector: Option<String> = row.get("connector")?;

    let mut r = Resource::new(
        row.get::<_, String>("id")?,
        row.get::<_, String>("name")?,
        kind,
        hours,
        row.get("duration")?,
    );
    r.manually_available = row.get::<_, i32>("manually_available")? == 1;
    r.charger_type = charger_type.as_deref().and_then(ChargerType::from_db_str);
    r.connector = connector.as_deref().and_then(Connector::from_db_str);
    r.price = row.get("price")?;
    r.free = row.get::<_, i32>("free")? == 1;
    Ok(r)
}

fn load_booked_slots(conn: &Connection, resource: &mut Resource) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "SELECT date, time FROM booked_slots WHERE resource_id = ?1 ORDER BY date, time",
    )?;
    let rows = stmt.query_map([&resource.id], |row| {
        let d: String = row.get(0)?;
        let t: String = row.get(1)?;
        Ok(BookedSlot {
            date: parse_date_col(&d)?,
            time: parse_time_col(&t)?,
        })
    })?;
    for r in rows {
        resource.booked_slots.insert(r?);
    }
    Ok(())
}

pub fn resource_exists(conn: &Connection, id: &str) -> AppResult<bool> {
    let found: Option<i32> = conn
        .query_row("SELECT 1 FROM resources WHERE id = ?1", [id], |r| r.get(0))
        .optional()?;
    Ok(found.is_some())
}

/// Load a resource with its booked slots.
pub fn load_resource(conn: &Connection, id: &str) -> AppResult<Resource> {
    let mut resource = conn
        .query_row("SELECT * FROM resources WHERE id = ?1", [id], map_resource)
        .optional()?
        .ok_or_else(|| AppError::resource_not_found(id))?;
    load_booked_slots(conn, &mut resource)?;
    Ok(resource)
}

pub fn load_resources(conn: &Connection) -> AppResult<Vec<Resource>> {
    let mut stmt = conn.prepare("SELECT * FROM resources ORDER BY kind, id")?;
    let rows = stmt.query_map([], map_resource)?;

    let mut out = Vec::new();
    for r in rows {
        let mut resource = r?;
        load_booked_slots(conn, &mut resource)?;
        out.push(resource);
    }
    Ok(out)
}

pub fn insert_resource(conn: &Connection, r: &Resource) -> AppResult<()> {
    let pause = r.hours.pause();
    conn.execute(
        "INSERT INTO resources (id, name, kind, open_time, close_time, break_start, break_end,
                                duration, manually_available, charger_type, connector, price, free)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            r.id,
            r.name,
            r.kind.to_db_str(),
            format_minute_of_day(r.hours.start()),
            format_minute_of_day(r.hours.end()),
            pause.map(|p| format_minute_of_day(p.start)),
            pause.map(|p| format_minute_of_day(p.end)),
            r.duration_minutes,
            if r.manually_available { 1 } else { 0 },
            r.charger_type.map(|t| t.to_db_str()),
            r.connector.map(|c| c.to_db_str()),
            r.price,
            if r.free { 1 } else { 0 },
        ],
    )?;
    Ok(())
}

pub fn set_manual_availability(conn: &Connection, id: &str, available: bool) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE resources SET manually_available = ?1 WHERE id = ?2",
        params![if available { 1 } else { 0 }, id],
    )?;
    if changed == 0 {
        return Err(AppError::resource_not_found(id));
    }
    Ok(())
}

/// Delete a resource together with its slots and bookings.
pub fn delete_resource(conn: &Connection, id: &str) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;
    let changed = tx.execute("DELETE FROM resources WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::resource_not_found(id));
    }
    tx.execute("DELETE FROM booked_slots WHERE resource_id = ?1", [id])?;
    tx.execute("DELETE FROM bookings WHERE resource_id = ?1", [id])?;
    tx.commit()?;
    Ok(())
}

// ------------------------------------------------
// Bookings
// ------------------------------------------------

fn map_booking(row: &Row) -> Result<Booking> {
    let d: String = row.get("date")?;
    let t: String = row.get("time")?;
    let status_str: String = row.get("status")?;
    let status = BookingStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(AppError::InvalidInput(format!(
            "unknown booking status: {}",
            status_str
        )))
    })?;

    Ok(Booking {
        id: row.get("id")?,
        resource_id: row.get("resource_id")?,
        customer: row.get("customer")?,
        date: parse_date_col(&d)?,
        time: parse_time_col(&t)?,
        duration_minutes: row.get("duration")?,
        status,
        created_at: row.get("created_at")?,
    })
}

pub fn load_booking(conn: &Connection, id: &str) -> AppResult<Booking> {
    conn.query_row("SELECT * FROM bookings WHERE id = ?1", [id], map_booking)
        .optional()?
        .ok_or_else(|| AppError::booking_not_found(id))
}

/// All bookings, optionally for one resource, by date and time.
pub fn load_bookings(conn: &Connection, resource_id: Option<&str>) -> AppResult<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM bookings
         WHERE (?1 IS NULL OR resource_id = ?1)
         ORDER BY date ASC, time ASC, id ASC",
    )?;
    let rows = stmt.query_map([resource_id], map_booking)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn booking_ids(conn: &Connection) -> AppResult<Vec<String>> {
    string_column(conn, "SELECT id FROM bookings")
}

/// Insert the booking and occupy its slot in one transaction.
pub fn insert_booking(conn: &Connection, b: &Booking) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO bookings (id, resource_id, customer, date, time, duration, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            b.id,
            b.resource_id,
            b.customer,
            date_str(&b.date),
            format_minute_of_day(b.time),
            b.duration_minutes,
            b.status.to_db_str(),
            b.created_at,
        ],
    )?;
    if b.status.holds_slot() {
        tx.execute(
            "INSERT INTO booked_slots (resource_id, date, time) VALUES (?1, ?2, ?3)",
            params![b.resource_id, date_str(&b.date), format_minute_of_day(b.time)],
        )?;
    }
    tx.commit()?;
    Ok(())
}

pub fn update_booking_status(conn: &Connection, b: &Booking, status: BookingStatus) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "UPDATE bookings SET status = ?1 WHERE id = ?2",
        params![status.to_db_str(), b.id],
    )?;

    let d = date_str(&b.date);
    let t = format_minute_of_day(b.time);
    match (b.status.holds_slot(), status.holds_slot()) {
        (true, false) => {
            tx.execute(
                "DELETE FROM booked_slots WHERE resource_id = ?1 AND date = ?2 AND time = ?3",
                params![b.resource_id, d, t],
            )?;
        }
        (false, true) => {
            tx.execute(
                "INSERT INTO booked_slots (resource_id, date, time) VALUES (?1, ?2, ?3)",
                params![b.resource_id, d, t],
            )?;
        }
        _ => {}
    }
    tx.commit()?;
    Ok(())
}

pub fn delete_booking(conn: &Connection, b: &Booking) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM bookings WHERE id = ?1", [&b.id])?;
    if b.status.holds_slot() {
        tx.execute(
            "DELETE FROM booked_slots WHERE resource_id = ?1 AND date = ?2 AND time = ?3",
            params![b.resource_id, date_str(&b.date), format_minute_of_day(b.time)],
        )?;
    }
    tx.commit()?;
    Ok(())
}

fn string_column(conn: &Connection, sql: &str) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ------------------------------------------------
// Vehicles
// ------------------------------------------------

fn map_vehicle(row: &Row) -> Result<Vehicle> {
    Ok(Vehicle {
        id: row.get("id")?,
        make: row.get("make")?,
        model: row.get("model")?,
        year: row.get("year")?,
        battery_kwh: row.get("battery")?,
        plate: row.get("plate")?,
    })
}

pub fn load_vehicle(conn: &Connection, id: &str) -> AppResult<Vehicle> {
    conn.query_row("SELECT * FROM vehicles WHERE id = ?1", [id], map_vehicle)
        .optional()?
        .ok_or_else(|| AppError::vehicle_not_found(id))
}

pub fn load_vehicles(conn: &Connection) -> AppResult<Vec<Vehicle>> {
    let mut stmt = conn.prepare("SELECT * FROM vehicles ORDER BY id")?;
    let rows = stmt.query_map([], map_vehicle)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn vehicle_ids(conn: &Connection) -> AppResult<Vec<String>> {
    string_column(conn, "SELECT id FROM vehicles")
}

pub fn insert_vehicle(conn: &Connection, v: &Vehicle) -> AppResult<()> {
    conn.execute(
        "INSERT INTO vehicles (id, make, model, year, battery, plate)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![v.id, v.make, v.model, v.year, v.battery_kwh, v.plate],
    )?;
    Ok(())
}

pub fn update_vehicle(conn: &Connection, v: &Vehicle) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE vehicles SET make = ?1, model = ?2, year = ?3, battery = ?4, plate = ?5
         WHERE id = ?6",
        params![v.make, v.model, v.year, v.battery_kwh, v.plate, v.id],
    )?;
    if changed == 0 {
        return Err(AppError::vehicle_not_found(&v.id));
    }
    Ok(())
}

pub fn delete_vehicle(conn: &Connection, id: &str) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM vehicles WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::vehicle_not_found(id));
    }
    Ok(())
}

// ------------------------------------------------
// Promotions
// ------------------------------------------------

fn map_promotion(row: &Row) -> Result<Promotion> {
    let kind_str: String = row.get("kind")?;
    let kind = PromotionKind::from_db_str(&kind_str).ok_or_else(|| {
        conversion_error(AppError::InvalidInput(format!(
            "unknown promotion kind: {}",
            kind_str
        )))
    })?;
    let expiry: Option<String> = row.get("expiry")?;

    Ok(Promotion {
        id: row.get("id")?,
        code: row.get("code")?,
        description: row.get("description")?,
        kind,
        value: row.get("value")?,
        expiry: expiry.as_deref().map(parse_date_col).transpose()?,
        usage_limit: row.get("usage_limit")?,
    })
}

pub fn load_promotions(conn: &Connection) -> AppResult<Vec<Promotion>> {
    let mut stmt = conn.prepare("SELECT * FROM promotions ORDER BY id")?;
    let rows = stmt.query_map([], map_promotion)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn promotion_ids(conn: &Connection) -> AppResult<Vec<String>> {
    string_column(conn, "SELECT id FROM promotions")
}

pub fn promotion_code_exists(conn: &Connection, code: &str) -> AppResult<bool> {
    let found: Option<i32> = conn
        .query_row("SELECT 1 FROM promotions WHERE code = ?1", [code], |r| r.get(0))
        .optional()?;
    Ok(found.is_some())
}

pub fn insert_promotion(conn: &Connection, p: &Promotion) -> AppResult<()> {
    conn.execute(
        "INSERT INTO promotions (id, code, description, kind, value, expiry, usage_limit)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            p.id,
            p.code,
            p.description,
            p.kind.to_db_str(),
            p.value,
            p.expiry.as_ref().map(date_str),
            p.usage_limit,
        ],
    )?;
    Ok(())
}

pub fn delete_promotion(conn: &Connection, id: &str) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM promotions WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::promotion_not_found(id));
    }
    Ok(())
}
