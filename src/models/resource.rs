use super::working_hours::WorkingHours;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum ResourceKind {
    Charger,
    Service,
}

impl ResourceKind {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ResourceKind::Charger => "charger",
            ResourceKind::Service => "service",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "charger" => Some(ResourceKind::Charger),
            "service" => Some(ResourceKind::Service),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum ChargerType {
    Level1,
    Level2,
    DcFast,
}

impl ChargerType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ChargerType::Level1 => "level1",
            ChargerType::Level2 => "level2",
            ChargerType::DcFast => "dc-fast",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "level1" => Some(ChargerType::Level1),
            "level2" => Some(ChargerType::Level2),
            "dc-fast" => Some(ChargerType::DcFast),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum Connector {
    J1772,
    Tesla,
    Ccs,
    Chademo,
    Type2,
}

impl Connector {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Connector::J1772 => "j1772",
            Connector::Tesla => "tesla",
            Connector::Ccs => "ccs",
            Connector::Chademo => "chademo",
            Connector::Type2 => "type2",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "j1772" => Some(Connector::J1772),
            "tesla" => Some(Connector::Tesla),
            "ccs" => Some(Connector::Ccs),
            "chademo" => Some(Connector::Chademo),
            "type2" => Some(Connector::Type2),
            _ => None,
        }
    }
}

/// An already taken start time on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BookedSlot {
    pub date: NaiveDate,
    pub time: u16, // minute of day
}

/// A bookable charger or service.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub kind: ResourceKind,
    pub hours: WorkingHours,
    pub duration_minutes: u16,
    /// Host controlled switch, independent of working hours.
    pub manually_available: bool,
    pub charger_type: Option<ChargerType>,
    pub connector: Option<Connector>,
    pub price: f64,
    pub free: bool,
    pub booked_slots: BTreeSet<BookedSlot>,
}

impl Resource {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ResourceKind,
        hours: WorkingHours,
        duration_minutes: u16,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            hours,
            duration_minutes,
            manually_available: true,
            charger_type: None,
            connector: None,
            price: 0.0,
            free: false,
            booked_slots: BTreeSet::new(),
        }
    }

    pub fn is_booked(&self, date: NaiveDate, time: u16) -> bool {
        self.booked_slots.contains(&BookedSlot { date, time })
    }

    pub fn booked_on(&self, date: NaiveDate) -> impl Iterator<Item = &BookedSlot> {
        self.booked_slots.iter().filter(move |s| s.date == date)
    }
}
