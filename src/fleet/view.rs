use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::classify::{classify_battery, status_label, status_tone, BatteryLevel, StatusTone};
use super::model::{FleetSnapshot, FleetStats, VehicleRecord};
use super::refresher::{RefreshOutcome, Refresher};
use super::source::RenderSink;

pub const NOTIFICATION_TTL_SECS: i64 = 5;
pub const UNASSIGNED_DRIVER: &str = "Unassigned";
pub const UNKNOWN_LOCATION: &str = "Unknown";
pub const REFRESHED_MESSAGE: &str = "Fleet data refreshed";

/// One vehicle, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleCard {
    pub id: i64,
    pub license_plate: String,
    pub model: String,
    pub driver: String,
    pub location: String,
    pub battery_level: u8,
    pub battery: BatteryLevel,
    pub status_label: String,
    pub tone: StatusTone,
}

impl From<&VehicleRecord> for VehicleCard {
    fn from(v: &VehicleRecord) -> Self {
        Self {
            id: v.id,
            license_plate: v.license_plate.clone(),
            model: v.model.clone(),
            driver: v
                .driver
                .clone()
                .unwrap_or_else(|| UNASSIGNED_DRIVER.to_string()),
            location: v
                .location
                .clone()
                .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
            battery_level: v.battery_level,
            battery: classify_battery(v.battery_level as i32),
            status_label: status_label(v.status.as_str()),
            tone: status_tone(&v.status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedFleet {
    pub stats: FleetStats,
    pub avg_battery_class: BatteryLevel,
    pub cards: Vec<VehicleCard>,
    pub captured_at: DateTime<Utc>,
}

impl RenderedFleet {
    pub fn card(&self, id: i64) -> Option<&VehicleCard> {
        self.cards.iter().find(|c| c.id == id)
    }
}

impl From<&FleetSnapshot> for RenderedFleet {
    fn from(snapshot: &FleetSnapshot) -> Self {
        Self {
            stats: snapshot.stats,
            avg_battery_class: classify_battery(snapshot.stats.avg_battery as i32),
            cards: snapshot.vehicles.iter().map(VehicleCard::from).collect(),
            captured_at: snapshot.captured_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= Duration::seconds(NOTIFICATION_TTL_SECS)
    }
}

#[derive(Debug, Default)]
struct ViewState {
    fleet: Option<RenderedFleet>,
    notifications: Vec<Notification>,
}

/// Server-side copy of what the dashboard shows: the last good fleet plus
/// transient notifications.
#[derive(Debug, Default)]
pub struct DashboardView {
    state: RwLock<ViewState>,
    next_id: AtomicU64,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fleet(&self) -> Option<RenderedFleet> {
        self.state.read().await.fleet.clone()
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications_at(Utc::now()).await
    }

    pub async fn notifications_at(&self, now: DateTime<Utc>) -> Vec<Notification> {
        self.state
            .read()
            .await
            .notifications
            .iter()
            .filter(|n| !n.is_expired(now))
            .cloned()
            .collect()
    }

    pub async fn notify(&self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        self.notify_at(kind, message, Utc::now()).await
    }

    pub async fn notify_at(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> u64 {
        let note = self.compose(kind, message, now);
        let id = note.id;
        let mut state = self.state.write().await;
        state.notifications.retain(|n| !n.is_expired(now));
        state.notifications.push(note);
        id
    }

    /// Runs a refresh on behalf of one user. The returned notice is for that
    /// user only and is never stored; a failure already reaches every viewer
    /// through [`RenderSink::render_error`].
    pub async fn refresh_for_user(&self, refresher: &Refresher) -> Option<Notification> {
        match refresher.refresh_now().await {
            RefreshOutcome::Rendered => {
                Some(self.compose(NotificationKind::Success, REFRESHED_MESSAGE, Utc::now()))
            }
            RefreshOutcome::Failed | RefreshOutcome::Discarded => None,
        }
    }

    fn compose(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Notification {
        Notification {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            kind,
            message: message.into(),
            created_at: now,
        }
    }
}

/// What one user should see: unexpired notes they have not dismissed.
/// Dismissing is per user, so it never touches the shared view.
pub fn visible_notifications<'a>(
    notes: impl IntoIterator<Item = &'a Notification>,
    dismissed: &HashSet<u64>,
    now: DateTime<Utc>,
) -> Vec<Notification> {
    notes
        .into_iter()
        .filter(|n| !n.is_expired(now) && !dismissed.contains(&n.id))
        .cloned()
        .collect()
}

#[async_trait]
impl RenderSink for DashboardView {
    async fn render_snapshot(&self, snapshot: &FleetSnapshot) {
        let rendered = RenderedFleet::from(snapshot);
        self.state.write().await.fleet = Some(rendered);
    }

    async fn render_error(&self, message: &str) {
        self.notify(NotificationKind::Error, message).await;
    }
}
