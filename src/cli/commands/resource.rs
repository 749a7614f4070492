use crate::cli::commands::evaluation_time;
use crate::cli::parser::{ResourceAction, ResourceAddArgs};
use crate::config::Config;
use crate::core::availability::status_of;
use crate::core::resource::ResourceLogic;
use crate::db::pool::DbPool;
use crate::db::queries::load_resources;
use crate::errors::AppResult;
use crate::models::resource::Resource;
use crate::models::working_hours::WorkingHours;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{RESET, color_for_status, colorize_optional};
use crate::utils::formatting::yes_no;
use crate::utils::money;
use crate::utils::table::Table;
use chrono::NaiveTime;

fn build_resource(args: &ResourceAddArgs, cfg: &Config) -> AppResult<Resource> {
    let hours = WorkingHours::parse(
        &args.open,
        &args.close,
        args.break_start.as_deref(),
        args.break_end.as_deref(),
    )?;
    let duration = args.duration.unwrap_or(cfg.default_duration_minutes);

    let mut r = Resource::new(args.id.trim(), args.name.trim(), args.kind, hours, duration);
    r.manually_available = !args.unavailable;
    r.charger_type = args.charger_type;
    r.connector = args.connector;
    r.price = args.price;
    r.free = args.free;
    Ok(r)
}

pub(crate) fn resource_table(resources: &[&Resource], at: &NaiveTime) -> Table {
    let mut table = Table::with_headers(&[
        "ID", "Name", "Kind", "Hours", "Slot", "Type", "Connector", "Price", "Free", "Status",
    ]);
    for r in resources {
        let status = status_of(r, at);
        table.add_row(vec![
            r.id.clone(),
            r.name.clone(),
            r.kind.to_db_str().to_string(),
            r.hours.to_string(),
            format!("{}m", r.duration_minutes),
            colorize_optional(r.charger_type.map_or("--", |t| t.to_db_str())),
            colorize_optional(r.connector.map_or("--", |c| c.to_db_str())),
            money(r.price),
            yes_no(r.free).to_string(),
            format!("{}{}{}", color_for_status(status), status.label(), RESET),
        ]);
    }
    table
}

pub fn handle(action: &ResourceAction, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match action {
        ResourceAction::Add(args) => {
            let resource = build_resource(args, cfg)?;
            ResourceLogic::add(&pool, &resource)?;
            success(format!(
                "Added {} '{}' ({}), {} minute slots",
                resource.kind.to_db_str(),
                resource.id,
                resource.hours,
                resource.duration_minutes
            ));
        }
        ResourceAction::List { at } => {
            let at = evaluation_time(at.as_deref())?;
            let resources = load_resources(&pool.conn)?;
            if resources.is_empty() {
                info("No resources registered.");
                return Ok(());
            }
            let refs: Vec<&Resource> = resources.iter().collect();
            print!("{}", resource_table(&refs, &at).render(&cfg.separator_char));
        }
        ResourceAction::Toggle { id } => {
            if ResourceLogic::toggle(&pool, id)? {
                success(format!("Resource '{}' is now online", id));
            } else {
                warning(format!("Resource '{}' is now offline", id));
            }
        }
        ResourceAction::Del { id } => {
            ResourceLogic::delete(&pool, id)?;
            success(format!("Resource '{}' deleted", id));
        }
    }

    Ok(())
}
