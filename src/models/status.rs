use serde::Serialize;

/// Display status of a charger or service at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AvailabilityStatus {
    /// Open and enabled by the host.
    Available,
    /// Open, but the host has it marked unavailable.
    Occupied,
    /// Outside working hours.
    Closed,
}

impl AvailabilityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "Available",
            AvailabilityStatus::Occupied => "Occupied",
            AvailabilityStatus::Closed => "Closed",
        }
    }
}
