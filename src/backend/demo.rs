#![cfg(feature = "server")]
use async_trait::async_trait;
use chrono::Utc;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;

use crate::fleet::model::{FleetSnapshot, VehicleRecord, VehicleStatus};
use crate::fleet::source::{FetchError, FleetSource};

/// The six showroom vehicles the marketing site ships with.
pub fn demo_vehicles() -> Vec<VehicleRecord> {
    use VehicleStatus::*;
    vec![
        VehicleRecord::new(1, "EV-001", "Tesla Model 3", 85, Available)
            .with_driver("John Doe")
            .with_location("Downtown Office"),
        VehicleRecord::new(2, "EV-002", "Nissan Leaf", 92, InUse)
            .with_driver("Jane Smith")
            .with_location("Warehouse"),
        VehicleRecord::new(3, "EV-003", "BMW i3", 45, Charging)
            .with_driver("Mike Johnson")
            .with_location("Charging Station A"),
        VehicleRecord::new(4, "EV-004", "Tesla Model Y", 23, Maintenance)
            .with_location("Service Center"),
        VehicleRecord::new(5, "EV-005", "Hyundai Kona Electric", 67, InUse)
            .with_driver("Sarah Wilson")
            .with_location("Client Site B"),
        VehicleRecord::new(6, "EV-006", "Volkswagen ID.4", 89, Available)
            .with_location("Main Depot"),
    ]
}

struct DemoState {
    vehicles: Vec<VehicleRecord>,
    rng: StdRng,
}

/// Fake [`FleetSource`] serving [`demo_vehicles`] after a simulated backend delay.
///
/// With drift on, every fetch nudges batteries the way a live fleet would move:
/// charging cars gain, cars in use lose, parked ones barely change. The RNG is
/// seeded so runs are reproducible.
pub struct DemoFleetSource {
    latency: Duration,
    drift: bool,
    state: Mutex<DemoState>,
}

impl DemoFleetSource {
    pub fn new(latency: Duration, drift: bool) -> Self {
        Self::with_seed(latency, drift, 42)
    }

    pub fn with_seed(latency: Duration, drift: bool, seed: u64) -> Self {
        Self {
            latency,
            drift,
            state: Mutex::new(DemoState {
                vehicles: demo_vehicles(),
                rng: StdRng::seed_from_u64(seed),
            }),
        }
    }

    fn next_vehicles(&self) -> Result<Vec<VehicleRecord>, FetchError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| FetchError::Unavailable("demo state poisoned".into()))?;
        let DemoState { vehicles, rng } = &mut *guard;
        if self.drift {
            for v in vehicles.iter_mut() {
                let delta: i64 = match v.status {
                    VehicleStatus::Charging => rng.gen_range(2..=6),
                    VehicleStatus::InUse => -rng.gen_range(1..=4),
                    VehicleStatus::Available => -rng.gen_range(0..=1),
                    VehicleStatus::Maintenance | VehicleStatus::Unknown(_) => 0,
                };
                v.set_battery_level(v.battery_level as i64 + delta);
            }
        }
        Ok(vehicles.clone())
    }
}

#[async_trait]
impl FleetSource for DemoFleetSource {
    fn name(&self) -> &str {
        "demo"
    }

    async fn fetch_snapshot(&self) -> Result<FleetSnapshot, FetchError> {
        tokio::time::sleep(self.latency).await;
        let vehicles = self.next_vehicles()?;
        Ok(FleetSnapshot::from_vehicles(vehicles, Utc::now()))
    }
}
