use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_vehicle, insert_vehicle, load_vehicle, update_vehicle, vehicle_ids};
use crate::errors::{AppError, AppResult};
use crate::models::vehicle::{Vehicle, VehicleUpdate};
use chrono::{Datelike, NaiveDate};

/// Input for a new vehicle; the id is assigned on insert.
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: u16,
    pub battery_kwh: u32,
    pub plate: String,
}

fn latest_model_year(today: NaiveDate) -> u16 {
    u16::try_from(today.year() + 1).unwrap_or(u16::MAX)
}

/// The driver's vehicle registry.
pub struct VehicleLogic;

impl VehicleLogic {
    pub fn add(pool: &DbPool, new: &NewVehicle, today: NaiveDate) -> AppResult<Vehicle> {
        let ids = vehicle_ids(&pool.conn)?;
        let vehicle = Vehicle {
            id: Vehicle::next_id(ids.iter().map(String::as_str)),
            make: new.make.trim().to_string(),
            model: new.model.trim().to_string(),
            year: new.year,
            battery_kwh: new.battery_kwh,
            plate: new.plate.trim().to_string(),
        };
        vehicle.validate(latest_model_year(today))?;

        insert_vehicle(&pool.conn, &vehicle)?;
        audit(&pool.conn, "vehicle_add", &vehicle.id, &vehicle.label());
        Ok(vehicle)
    }

    /// Apply the given changes and return the stored vehicle.
    pub fn update(
        pool: &DbPool,
        id: &str,
        changes: &VehicleUpdate,
        today: NaiveDate,
    ) -> AppResult<Vehicle> {
        let current = load_vehicle(&pool.conn, id)?;
        if changes.is_empty() {
            return Err(AppError::InvalidInput(
                "nothing to change: pass at least one field".into(),
            ));
        }

        let vehicle = changes.apply(&current);
        vehicle.validate(latest_model_year(today))?;

        update_vehicle(&pool.conn, &vehicle)?;
        audit(&pool.conn, "vehicle_edit", id, &vehicle.label());
        Ok(vehicle)
    }

    pub fn delete(pool: &DbPool, id: &str) -> AppResult<()> {
        delete_vehicle(&pool.conn, id)?;
        audit(&pool.conn, "vehicle_del", id, "vehicle deleted");
        Ok(())
    }
}
