use dioxus::prelude::*;

use crate::app::Route;
use crate::components::palette::{battery_bar_class, status_badge_class};
use crate::fleet::VehicleCard as Card;
use crate::utils::format::format_battery;

#[allow(non_snake_case)]
#[component]
pub fn VehicleCard(card: Card) -> Element {
    let badge = status_badge_class(card.tone);
    let bar = battery_bar_class(card.battery);
    let width = format!("width:{}%", card.battery_level);
    let battery_text = format_battery(card.battery_level as f64);

    rsx! {
        div { class: "rounded-2xl border border-slate-800 bg-slate-900/60 p-5 space-y-4 h-full",
            div { class: "flex items-center justify-between",
                h3 { class: "text-lg font-semibold text-slate-100", "{card.license_plate}" }
                span { class: "rounded-full px-2.5 py-0.5 text-xs font-medium ring-1 {badge}", "{card.status_label}" }
            }
            dl { class: "space-y-1 text-sm",
                div { class: "flex gap-2",
                    dt { class: "text-slate-500", "Model" }
                    dd { class: "font-medium text-slate-200", "{card.model}" }
                }
                div { class: "flex gap-2",
                    dt { class: "text-slate-500", "Driver" }
                    dd { class: "text-slate-300", "{card.driver}" }
                }
                div { class: "flex gap-2",
                    dt { class: "text-slate-500", "Location" }
                    dd { class: "text-slate-300", "{card.location}" }
                }
            }
            div { class: "space-y-1",
                div { class: "flex justify-between text-sm font-semibold text-slate-300",
                    span { "Battery Level" }
                    span { class: "tabular-nums", "{battery_text}" }
                }
                div { class: "h-2 w-full rounded-full bg-slate-800 overflow-hidden",
                    div { class: "h-full rounded-full transition-all duration-500 {bar}", style: "{width}" }
                }
            }
        }
    }
}

#[allow(non_snake_case)]
#[component]
pub fn VehicleGrid(cards: Vec<Card>) -> Element {
    if cards.is_empty() {
        return rsx! {
            p { class: "text-center text-slate-400", "No vehicles found in the fleet." }
        };
    }
    rsx! {
        div { class: "grid gap-4 sm:grid-cols-2 lg:grid-cols-3",
            for card in cards.iter() {
                Link { key: "{card.id}", class: "block hover:opacity-90", to: Route::Vehicle { id: card.id },
                    VehicleCard { card: card.clone() }
                }
            }
        }
    }
}
