pub mod classify;
pub mod contact;
pub mod model;
pub mod refresher;
pub mod source;
pub mod view;

pub use classify::{classify_battery, classify_status, BatteryLevel, StatusTone};
pub use model::{FleetSnapshot, FleetStats, VehicleRecord, VehicleStatus};
pub use refresher::{RefreshPolicy, Refresher, RefresherStatus};
pub use source::{FetchError, FleetSource, RenderSink};
pub use view::{DashboardView, Notification, NotificationKind, RenderedFleet, VehicleCard};
