use dioxus::prelude::*;

use crate::components::palette::notification_class;
use crate::fleet::Notification;

/// Transient messages pinned to the top-right corner.
#[allow(non_snake_case)]
#[component]
pub fn Toasts(items: Vec<Notification>, on_dismiss: EventHandler<u64>) -> Element {
    rsx! {
        div { class: "fixed top-5 right-5 z-50 w-80 space-y-2",
            for note in items.into_iter() {
                div {
                    key: "{note.id}",
                    class: format!(
                        "flex items-start gap-3 rounded-xl border px-4 py-3 shadow-lg {}",
                        notification_class(note.kind)
                    ),
                    role: "alert",
                    p { class: "flex-1 text-sm", "{note.message}" }
                    button {
                        class: "text-xs opacity-70 hover:opacity-100",
                        aria_label: "Dismiss",
                        onclick: move |_| on_dismiss.call(note.id),
                        "✕"
                    }
                }
            }
        }
    }
}
