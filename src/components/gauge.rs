use dioxus::prelude::*;

use crate::components::palette::battery_text_class;
use crate::fleet::BatteryLevel;

/// Sweep of the dial, in degrees, measured clockwise from straight down.
const DIAL_START: f32 = 45.0;
const DIAL_STOP: f32 = 315.0;

/// Round dial for the fleet's average battery.
#[allow(non_snake_case)]
#[component]
pub fn BatteryGauge(
    value: u8,
    level: BatteryLevel,
    size: i32,
    stroke: i32,
    label: String,
) -> Element {
    let c = (size as f32) / 2.0;
    let r = c - (stroke as f32) / 2.0 - 1.0;
    let (track_d, fill_d) = dial_paths(c, r, value);

    let tone = battery_text_class(level);
    let size_attr = size.to_string();
    let view_box = format!("0 0 {size} {size}");
    let stroke_width = stroke.to_string();
    let container_style = format!("width:{size}px;height:{size}px");

    rsx! {
        div { class: "relative", style: "{container_style}",
            svg { width: "{size_attr}", height: "{size_attr}", view_box: "{view_box}",
                path { class: "text-slate-800", d: "{track_d}", fill: "none", stroke: "currentColor", stroke_width: "{stroke_width}", stroke_linecap: "round" }
                if value > 0 {
                    path { class: "{tone}", d: "{fill_d}", fill: "none", stroke: "currentColor", stroke_width: "{stroke_width}", stroke_linecap: "round" }
                }
            }
            div { class: "absolute inset-0 grid place-items-center",
                div { class: "text-center",
                    div { class: "text-4xl font-bold tabular-nums {tone}", "{value}%" }
                    div { class: "text-xs uppercase tracking-wide text-slate-400", "{label}" }
                }
            }
        }
    }
}

/// SVG paths for the empty track and the filled part of a dial centred at
/// (`c`, `c`) with radius `r`.
fn dial_paths(c: f32, r: f32, value: u8) -> (String, String) {
    let pct = value.min(100) as f32 / 100.0;
    let end = DIAL_START + (DIAL_STOP - DIAL_START) * pct;
    (arc(c, r, DIAL_START, DIAL_STOP), arc(c, r, DIAL_START, end))
}

fn arc(c: f32, r: f32, from_deg: f32, to_deg: f32) -> String {
    // +90 so that 0 degrees points down and the gap sits at the bottom
    let point = |deg: f32| {
        let rad = (deg + 90.0).to_radians();
        (c + r * rad.cos(), c + r * rad.sin())
    };
    let (x0, y0) = point(from_deg);
    let (x1, y1) = point(to_deg);
    let large_arc = u8::from(to_deg - from_deg >= 180.0);
    format!("M {x0:.3} {y0:.3} A {r:.3} {r:.3} 0 {large_arc} 1 {x1:.3} {y1:.3}")
}
