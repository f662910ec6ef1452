use serde::{Deserialize, Serialize};

use crate::fleet::view::{Notification, RenderedFleet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetViewDto {
    /// `None` until the first successful refresh.
    pub fleet: Option<RenderedFleet>,
    pub notifications: Vec<Notification>,
    #[serde(rename = "refreshIntervalSecs")]
    pub refresh_interval_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefresherStatusDto {
    pub running: bool,
    pub source: String,
    pub viewers: usize,
    pub ticks: u64,
    pub last_tick_at: Option<String>,
    pub last_success_at: Option<String>,
    pub last_error: Option<String>,
    pub next_tick_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactOutcomeDto {
    pub ok: bool,
    pub message: String,
}
