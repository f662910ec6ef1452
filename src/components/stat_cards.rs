use dioxus::prelude::*;

use crate::components::BatteryGauge;
use crate::fleet::FleetStats;
use crate::fleet::BatteryLevel;

#[allow(non_snake_case)]
#[component]
pub fn StatCards(stats: FleetStats, avg_class: BatteryLevel) -> Element {
    rsx! {
        div { class: "grid gap-4 sm:grid-cols-3 items-center",
            div { class: "rounded-2xl border border-slate-800 bg-slate-900/60 p-6 text-center",
                div { class: "text-4xl font-bold tabular-nums text-slate-100", "{stats.total_vehicles}" }
                div { class: "text-sm text-slate-400", "Total Vehicles" }
            }
            div { class: "rounded-2xl border border-slate-800 bg-slate-900/60 p-6 text-center",
                div { class: "text-4xl font-bold tabular-nums text-emerald-400", "{stats.available_vehicles}" }
                div { class: "text-sm text-slate-400", "Available" }
            }
            div { class: "flex justify-center",
                BatteryGauge {
                    value: stats.avg_battery,
                    level: avg_class,
                    size: 160,
                    stroke: 12,
                    label: "Avg Battery".to_string(),
                }
            }
        }
    }
}
