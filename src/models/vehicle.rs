use crate::errors::{AppError, AppResult};
use crate::utils::ids::next_sequential_id;
use serde::Serialize;

const VEHICLE_PREFIX: &str = "V";

/// Oldest model year accepted for a registered vehicle.
pub const FIRST_MODEL_YEAR: u16 = 1990;

/// A driver's electric vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub id: String, // V001, V002, ...
    pub make: String,
    pub model: String,
    pub year: u16,
    pub battery_kwh: u32,
    pub plate: String,
}

impl Vehicle {
    pub fn next_id<'a>(existing: impl IntoIterator<Item = &'a str>) -> String {
        next_sequential_id(VEHICLE_PREFIX, existing)
    }

    /// "Make Model (PLATE)", as shown in pickers.
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.plate)
    }

    /// `latest_year` is normally next year, so upcoming models can be registered.
    pub fn validate(&self, latest_year: u16) -> AppResult<()> {
        for (field, value) in [
            ("make", &self.make),
            ("model", &self.model),
            ("plate", &self.plate),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::InvalidInput(format!("vehicle {field} is required")));
            }
        }
        if !(FIRST_MODEL_YEAR..=latest_year).contains(&self.year) {
            return Err(AppError::InvalidInput(format!(
                "vehicle year must be between {} and {} (got {})",
                FIRST_MODEL_YEAR, latest_year, self.year
            )));
        }
        if self.battery_kwh == 0 {
            return Err(AppError::InvalidInput(
                "battery capacity must be at least 1 kWh".into(),
            ));
        }
        Ok(())
    }
}

/// Field changes for `vehicle edit`. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct VehicleUpdate {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<u16>,
    pub battery_kwh: Option<u32>,
    pub plate: Option<String>,
}

impl VehicleUpdate {
    pub fn is_empty(&self) -> bool {
        self.make.is_none()
            && self.model.is_none()
            && self.year.is_none()
            && self.battery_kwh.is_none()
            && self.plate.is_none()
    }

    pub fn apply(&self, vehicle: &Vehicle) -> Vehicle {
        let mut v = vehicle.clone();
        if let Some(make) = &self.make {
            v.make = make.trim().to_string();
        }
        if let Some(model) = &self.model {
            v.model = model.trim().to_string();
        }
        if let Some(year) = self.year {
            v.year = year;
        }
        if let Some(kwh) = self.battery_kwh {
            v.battery_kwh = kwh;
        }
        if let Some(plate) = &self.plate {
            v.plate = plate.trim().to_string();
        }
        v
    }
}
