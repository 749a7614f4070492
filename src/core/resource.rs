use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_resource, insert_resource, load_resource, resource_exists, set_manual_availability,
};
use crate::errors::{AppError, AppResult};
use crate::models::resource::Resource;
use crate::utils::time::MINUTES_PER_DAY;

/// Host-side management of chargers and services.
pub struct ResourceLogic;

impl ResourceLogic {
    pub fn add(pool: &DbPool, resource: &Resource) -> AppResult<()> {
        if resource.id.trim().is_empty() || resource.name.trim().is_empty() {
            return Err(AppError::InvalidInput("resource id and name are required".into()));
        }
        if resource.duration_minutes == 0 || resource.duration_minutes > MINUTES_PER_DAY {
            return Err(AppError::InvalidInput(format!(
                "duration must be between 1 and {} minutes",
                MINUTES_PER_DAY
            )));
        }
        if resource.price < 0.0 || !resource.price.is_finite() {
            return Err(AppError::InvalidInput("price must be a non-negative number".into()));
        }
        if resource_exists(&pool.conn, &resource.id)? {
            return Err(AppError::InvalidInput(format!(
                "resource '{}' already exists",
                resource.id
            )));
        }

        insert_resource(&pool.conn, resource)?;
        audit(
            &pool.conn,
            "resource_add",
            &resource.id,
            &format!("{} ({}) {}", resource.name, resource.kind.to_db_str(), resource.hours),
        );
        Ok(())
    }

    /// Flip the host controlled availability switch. Returns the new value.
    pub fn toggle(pool: &DbPool, id: &str) -> AppResult<bool> {
        let resource = load_resource(&pool.conn, id)?;
        let now_available = !resource.manually_available;
        set_manual_availability(&pool.conn, id, now_available)?;
        audit(
            &pool.conn,
            "resource_toggle",
            id,
            if now_available { "set online" } else { "set offline" },
        );
        Ok(now_available)
    }

    pub fn delete(pool: &DbPool, id: &str) -> AppResult<()> {
        delete_resource(&pool.conn, id)?;
        audit(&pool.conn, "resource_del", id, "resource deleted with its bookings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resource::ResourceKind;
    use crate::models::working_hours::WorkingHours;

    fn charger(id: &str) -> Resource {
        let hours = WorkingHours::parse("08:00", "22:00", None, None).unwrap();
        Resource::new(id, "Downtown Charger A", ResourceKind::Charger, hours, 60)
    }

    #[test]
    fn add_then_load() {
        let pool = DbPool::in_memory().unwrap();
        ResourceLogic::add(&pool, &charger("c1")).unwrap();
        let r = load_resource(&pool.conn, "c1").unwrap();
        assert_eq!(r.name, "Downtown Charger A");
        assert!(r.manually_available);
        assert_eq!(r.hours.start(), 480);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let pool = DbPool::in_memory().unwrap();
        ResourceLogic::add(&pool, &charger("c1")).unwrap();
        assert!(matches!(
            ResourceLogic::add(&pool, &charger("c1")),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let pool = DbPool::in_memory().unwrap();
        let mut r = charger("c1");
        r.duration_minutes = 0;
        assert!(ResourceLogic::add(&pool, &r).is_err());
    }

    #[test]
    fn toggle_flips_and_reports() {
        let pool = DbPool::in_memory().unwrap();
        ResourceLogic::add(&pool, &charger("c1")).unwrap();
        assert!(!ResourceLogic::toggle(&pool, "c1").unwrap());
        assert!(!load_resource(&pool.conn, "c1").unwrap().manually_available);
        assert!(ResourceLogic::toggle(&pool, "c1").unwrap());
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let pool = DbPool::in_memory().unwrap();
        assert!(matches!(
            ResourceLogic::toggle(&pool, "nope"),
            Err(AppError::ResourceNotFound { kind: "Resource", .. })
        ));
        assert!(matches!(
            ResourceLogic::delete(&pool, "nope"),
            Err(AppError::ResourceNotFound { .. })
        ));
    }
}
