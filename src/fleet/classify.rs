//! Presentation-only severity categories for battery levels and vehicle states.

use serde::{Deserialize, Serialize};

use super::model::VehicleStatus;

/// Levels strictly above this are [`BatteryLevel::High`].
pub const BATTERY_HIGH_ABOVE: i32 = 70;
/// Levels strictly above this (and not high) are [`BatteryLevel::Medium`].
pub const BATTERY_MEDIUM_ABOVE: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BatteryLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusTone {
    Success,
    Warning,
    Info,
    Neutral,
}

pub fn classify_battery(level: i32) -> BatteryLevel {
    let level = level.clamp(0, 100);
    if level > BATTERY_HIGH_ABOVE {
        BatteryLevel::High
    } else if level > BATTERY_MEDIUM_ABOVE {
        BatteryLevel::Medium
    } else {
        BatteryLevel::Low
    }
}

pub fn status_tone(status: &VehicleStatus) -> StatusTone {
    match status {
        VehicleStatus::Available => StatusTone::Success,
        VehicleStatus::InUse => StatusTone::Warning,
        VehicleStatus::Charging => StatusTone::Info,
        VehicleStatus::Maintenance | VehicleStatus::Unknown(_) => StatusTone::Neutral,
    }
}

/// Classifies a raw status string; unmapped values are neutral.
pub fn classify_status(raw: &str) -> StatusTone {
    status_tone(&VehicleStatus::from(raw))
}

/// Human label for a raw status: `in_use` becomes "In Use".
pub fn status_label(raw: &str) -> String {
    raw.trim()
        .split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundaries() {
        assert_eq!(classify_battery(100), BatteryLevel::High);
        assert_eq!(classify_battery(71), BatteryLevel::High);
        assert_eq!(classify_battery(70), BatteryLevel::Medium);
        assert_eq!(classify_battery(31), BatteryLevel::Medium);
        assert_eq!(classify_battery(30), BatteryLevel::Low);
        assert_eq!(classify_battery(0), BatteryLevel::Low);
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(classify_battery(-5), BatteryLevel::Low);
        assert_eq!(classify_battery(i32::MIN), BatteryLevel::Low);
        assert_eq!(classify_battery(150), BatteryLevel::High);
        assert_eq!(classify_battery(i32::MAX), BatteryLevel::High);
    }

    #[test]
    fn battery_classification_is_monotonic() {
        let mut previous = classify_battery(0);
        for b in 1..=100 {
            let current = classify_battery(b);
            assert!(current >= previous, "classification dropped at {b}");
            previous = current;
        }
    }

    #[test]
    fn known_statuses_map_to_tones() {
        assert_eq!(classify_status("available"), StatusTone::Success);
        assert_eq!(classify_status("in_use"), StatusTone::Warning);
        assert_eq!(classify_status("charging"), StatusTone::Info);
        assert_eq!(classify_status("maintenance"), StatusTone::Neutral);
    }

    #[test]
    fn unknown_statuses_are_neutral() {
        for raw in ["", "retired", "IN-USE", "🚗", "available!", "null"] {
            assert_eq!(classify_status(raw), StatusTone::Neutral, "{raw:?}");
        }
    }

    #[test]
    fn fixture_scenarios() {
        assert_eq!(classify_battery(85), BatteryLevel::High);
        assert_eq!(classify_status("available"), StatusTone::Success);

        assert_eq!(classify_battery(45), BatteryLevel::Medium);
        assert_eq!(classify_status("charging"), StatusTone::Info);

        assert_eq!(classify_battery(23), BatteryLevel::Low);
        assert_eq!(classify_status("maintenance"), StatusTone::Neutral);
    }

    #[test]
    fn labels() {
        assert_eq!(status_label("in_use"), "In Use");
        assert_eq!(status_label("available"), "Available");
        assert_eq!(status_label("out_of_service"), "Out Of Service");
        assert_eq!(status_label(""), "");
    }
}
