use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Operational state of a vehicle as reported by the fleet backend.
///
/// Anything outside the four known states decodes as [`VehicleStatus::Unknown`]
/// carrying the backend's own spelling, so a new backend value never breaks a
/// refresh and can still be shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum VehicleStatus {
    #[default]
    Available,
    InUse,
    Charging,
    Maintenance,
    Unknown(String),
}

impl VehicleStatus {
    pub fn as_str(&self) -> &str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::InUse => "in_use",
            VehicleStatus::Charging => "charging",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::Unknown(raw) if !raw.is_empty() => raw,
            VehicleStatus::Unknown(_) => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, VehicleStatus::Unknown(_))
    }
}

impl From<&str> for VehicleStatus {
    fn from(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.to_ascii_lowercase().as_str() {
            "available" => VehicleStatus::Available,
            "in_use" => VehicleStatus::InUse,
            "charging" => VehicleStatus::Charging,
            "maintenance" => VehicleStatus::Maintenance,
            _ => VehicleStatus::Unknown(raw.to_string()),
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for VehicleStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VehicleStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(VehicleStatus::from(raw.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id: i64,
    pub license_plate: String,
    pub model: String,
    /// `None` means unassigned.
    pub driver: Option<String>,
    /// `None` means unknown.
    pub location: Option<String>,
    /// Always within 0..=100.
    pub battery_level: u8,
    pub status: VehicleStatus,
}

impl VehicleRecord {
    pub fn new(
        id: i64,
        license_plate: impl Into<String>,
        model: impl Into<String>,
        battery_level: i64,
        status: VehicleStatus,
    ) -> Self {
        Self {
            id,
            license_plate: license_plate.into(),
            model: model.into(),
            driver: None,
            location: None,
            battery_level: clamp_battery(battery_level),
            status,
        }
    }

    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = Some(driver.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn set_battery_level(&mut self, level: i64) {
        self.battery_level = clamp_battery(level);
    }
}

pub fn clamp_battery(level: i64) -> u8 {
    level.clamp(0, 100) as u8
}

/// Aggregate counters shown above the vehicle list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FleetStats {
    pub total_vehicles: u32,
    pub available_vehicles: u32,
    pub avg_battery: u8,
}

impl FleetStats {
    /// Builds stats from backend-reported numbers, keeping `available <= total`
    /// and the average inside 0..=100.
    pub fn new(total_vehicles: u32, available_vehicles: u32, avg_battery: i64) -> Self {
        Self {
            total_vehicles,
            available_vehicles: available_vehicles.min(total_vehicles),
            avg_battery: clamp_battery(avg_battery),
        }
    }

    pub fn from_vehicles(vehicles: &[VehicleRecord]) -> Self {
        let total = vehicles.len() as u32;
        let available = vehicles
            .iter()
            .filter(|v| v.status == VehicleStatus::Available)
            .count() as u32;
        let avg = if vehicles.is_empty() {
            0
        } else {
            let sum: u64 = vehicles.iter().map(|v| v.battery_level as u64).sum();
            (sum as f64 / vehicles.len() as f64).round() as i64
        };
        Self::new(total, available, avg)
    }
}

/// A point-in-time read of the fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub stats: FleetStats,
    pub vehicles: Vec<VehicleRecord>,
    pub captured_at: DateTime<Utc>,
}

impl FleetSnapshot {
    pub fn from_vehicles(vehicles: Vec<VehicleRecord>, captured_at: DateTime<Utc>) -> Self {
        Self {
            stats: FleetStats::from_vehicles(&vehicles),
            vehicles,
            captured_at,
        }
    }

    pub fn total_count(&self) -> u32 {
        self.stats.total_vehicles
    }

    pub fn available_count(&self) -> u32 {
        self.stats.available_vehicles
    }
}
