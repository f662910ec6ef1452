//! Tailwind classes for severity categories.

use crate::fleet::view::NotificationKind;
use crate::fleet::{BatteryLevel, StatusTone};

pub fn battery_text_class(level: BatteryLevel) -> &'static str {
    match level {
        BatteryLevel::High => "text-emerald-400",
        BatteryLevel::Medium => "text-amber-400",
        BatteryLevel::Low => "text-rose-400",
    }
}

pub fn battery_bar_class(level: BatteryLevel) -> &'static str {
    match level {
        BatteryLevel::High => "bg-emerald-500",
        BatteryLevel::Medium => "bg-amber-500",
        BatteryLevel::Low => "bg-rose-500",
    }
}

pub fn status_badge_class(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Success => "bg-emerald-500/15 text-emerald-300 ring-emerald-500/30",
        StatusTone::Warning => "bg-amber-500/15 text-amber-300 ring-amber-500/30",
        StatusTone::Info => "bg-sky-500/15 text-sky-300 ring-sky-500/30",
        StatusTone::Neutral => "bg-slate-500/15 text-slate-300 ring-slate-500/30",
    }
}

pub fn notification_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "border-emerald-700 bg-emerald-950/90 text-emerald-200",
        NotificationKind::Error => "border-rose-700 bg-rose-950/90 text-rose-200",
    }
}
