use crate::cli::parser::VehicleAction;
use crate::config::Config;
use crate::core::vehicle::{NewVehicle, VehicleLogic};
use crate::db::pool::DbPool;
use crate::db::queries::load_vehicles;
use crate::errors::AppResult;
use crate::models::vehicle::VehicleUpdate;
use crate::ui::messages::{info, success};
use crate::utils::date::today;
use crate::utils::table::Table;

pub fn handle(action: &VehicleAction, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match action {
        VehicleAction::Add {
            make,
            model,
            year,
            battery,
            plate,
        } => {
            let new = NewVehicle {
                make: make.clone(),
                model: model.clone(),
                year: *year,
                battery_kwh: *battery,
                plate: plate.clone(),
            };
            let v = VehicleLogic::add(&pool, &new, today())?;
            success(format!("Vehicle {} added: {}", v.id, v.label()));
        }
        VehicleAction::List => {
            let vehicles = load_vehicles(&pool.conn)?;
            if vehicles.is_empty() {
                info("No vehicles added yet.");
                return Ok(());
            }

            let mut table = Table::with_headers(&["ID", "Make", "Model", "Year", "Battery", "Plate"]);
            for v in &vehicles {
                table.add_row(vec![
                    v.id.clone(),
                    v.make.clone(),
                    v.model.clone(),
                    v.year.to_string(),
                    format!("{} kWh", v.battery_kwh),
                    v.plate.clone(),
                ]);
            }
            print!("{}", table.render(&cfg.separator_char));
        }
        VehicleAction::Edit {
            id,
            make,
            model,
            year,
            battery,
            plate,
        } => {
            let changes = VehicleUpdate {
                make: make.clone(),
                model: model.clone(),
                year: *year,
                battery_kwh: *battery,
                plate: plate.clone(),
            };
            let v = VehicleLogic::update(&pool, id, &changes, today())?;
            success(format!("Vehicle {} updated: {}", v.id, v.label()));
        }
        VehicleAction::Del { id } => {
            VehicleLogic::delete(&pool, id)?;
            success(format!("Vehicle {} deleted", id));
        }
    }

    Ok(())
}
