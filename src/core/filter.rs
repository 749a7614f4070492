//! Map marker filtering.

use crate::core::availability::is_available_at;
use crate::models::resource::{ChargerType, Connector, Resource};
use chrono::Timelike;

#[derive(Debug, Clone, Default)]
pub struct MarkerFilter {
    /// Case-insensitive substring of the resource name.
    pub search: Option<String>,
    pub types: Vec<ChargerType>,
    pub connectors: Vec<Connector>,
    /// Only resources open and enabled at the evaluation instant.
    pub available_now: bool,
    pub free_only: bool,
}

impl MarkerFilter {
    pub fn matches<T: Timelike>(&self, resource: &Resource, at: &T) -> bool {
        if let Some(q) = self.search.as_deref().map(str::trim)
            && !q.is_empty()
            && !resource.name.to_lowercase().contains(&q.to_lowercase())
        {
            return false;
        }

        if !self.types.is_empty()
            && !resource.charger_type.is_some_and(|t| self.types.contains(&t))
        {
            return false;
        }

        if !self.connectors.is_empty()
            && !resource
                .connector
                .is_some_and(|c| self.connectors.contains(&c))
        {
            return false;
        }

        if self.available_now && !is_available_at(resource, at) {
            return false;
        }

        !(self.free_only && !resource.free)
    }

    /// Resources passing the filter, in input order.
    pub fn apply<'a, T: Timelike>(&self, resources: &'a [Resource], at: &T) -> Vec<&'a Resource> {
        resources.iter().filter(|r| self.matches(r, at)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resource::ResourceKind;
    use crate::models::working_hours::WorkingHours;
    use chrono::NaiveTime;

    fn charger(
        id: &str,
        name: &str,
        t: ChargerType,
        c: Connector,
        open: (u16, u16),
        enabled: bool,
        free: bool,
    ) -> Resource {
        let hours = WorkingHours::new(open.0, open.1, None).unwrap();
        let mut r = Resource::new(id, name, ResourceKind::Charger, hours, 60);
        r.charger_type = Some(t);
        r.connector = Some(c);
        r.manually_available = enabled;
        r.free = free;
        r
    }

    fn fleet() -> Vec<Resource> {
        vec![
            charger("downtown", "Downtown Charger", ChargerType::Level2, Connector::J1772, (360, 1320), true, false),
            charger("residential", "Residential Charger", ChargerType::Level1, Connector::Tesla, (0, 1439), false, false),
            charger("hub", "Fast Charger Hub", ChargerType::DcFast, Connector::Ccs, (420, 1260), true, true),
            charger("mall", "Shopping Mall Charger", ChargerType::Level2, Connector::J1772, (600, 1320), true, false),
        ]
    }

    fn ids(v: Vec<&Resource>) -> Vec<&str> {
        v.into_iter().map(|r| r.id.as_str()).collect()
    }

    fn at(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let all = fleet();
        assert_eq!(
            ids(MarkerFilter::default().apply(&all, &at(8))),
            ["downtown", "residential", "hub", "mall"]
        );
    }

    #[test]
    fn search_is_case_insensitive() {
        let all = fleet();
        let f = MarkerFilter {
            search: Some("MALL".into()),
            ..Default::default()
        };
        assert_eq!(ids(f.apply(&all, &at(8))), ["mall"]);
    }

    #[test]
    fn type_and_connector_sets() {
        let all = fleet();
        let f = MarkerFilter {
            types: vec![ChargerType::Level2, ChargerType::DcFast],
            connectors: vec![Connector::Ccs],
            ..Default::default()
        };
        assert_eq!(ids(f.apply(&all, &at(8))), ["hub"]);
    }

    #[test]
    fn available_now_uses_hours_and_manual_flag() {
        let all = fleet();
        let f = MarkerFilter {
            available_now: true,
            ..Default::default()
        };
        // 08:00: mall not open yet, residential disabled
        assert_eq!(ids(f.apply(&all, &at(8))), ["downtown", "hub"]);
        assert_eq!(ids(f.apply(&all, &at(23))), Vec::<&str>::new());
    }

    #[test]
    fn free_only() {
        let all = fleet();
        let f = MarkerFilter {
            free_only: true,
            ..Default::default()
        };
        assert_eq!(ids(f.apply(&all, &at(8))), ["hub"]);
    }

    #[test]
    fn services_without_map_attributes_fail_type_filters() {
        let hours = WorkingHours::new(540, 1020, None).unwrap();
        let svc = Resource::new("sv", "Tire Service", ResourceKind::Service, hours, 45);
        let f = MarkerFilter {
            types: vec![ChargerType::Level2],
            ..Default::default()
        };
        assert!(!f.matches(&svc, &at(10)));
        assert!(MarkerFilter::default().matches(&svc, &at(10)));
    }
}
