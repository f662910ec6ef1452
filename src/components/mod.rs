pub mod contact_form;
pub mod fleet_dashboard;
pub mod gauge;
pub mod palette;
pub mod stat_cards;
pub mod toasts;
pub mod vehicle_card;

pub use contact_form::ContactForm;
pub use fleet_dashboard::FleetDashboard;
pub use gauge::BatteryGauge;
pub use stat_cards::StatCards;
pub use toasts::Toasts;
pub use vehicle_card::{VehicleCard, VehicleGrid};
