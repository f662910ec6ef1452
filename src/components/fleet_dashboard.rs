use std::collections::HashSet;

use dioxus::prelude::*;

#[cfg(feature = "web")]
use dioxus::logger::tracing::info;

use crate::api::{
    acquire_fleet_view, fleet_view, refresh_fleet_now, refresher_status, release_fleet_view,
};
use crate::components::{StatCards, Toasts, VehicleGrid};
use crate::fleet::view::{visible_notifications, Notification};
use crate::utils::format::{format_clock, time_ago};

/// How often a live page re-reads the server-side view and renews its lease.
/// Shorter than the refresh interval so toasts show up (and expire) promptly.
#[cfg(feature = "web")]
const VIEW_POLL_MS: u32 = 5_000;

/// Stats and vehicle list for the page at `path`.
#[allow(non_snake_case)]
#[component]
pub fn FleetDashboard(path: String, show_vehicles: bool) -> Element {
    // ssr data (server waits)
    let mut view = use_server_future(fleet_view)?;
    let view_v = view.read_unchecked();
    let mut status = use_resource(refresher_status);

    // Client-only: hold a viewer lease so the server keeps polling the backend
    let live = use_resource(move || {
        let path = path.clone();
        async move { acquire_fleet_view(path).await.ok().flatten() }
    });

    use_drop(move || {
        if let Some(Some(lease)) = *live.peek() {
            spawn_forever(async move {
                let _ = release_fleet_view(lease).await;
            });
        }
    });

    // per-user: dismissals and this user's own refresh notices
    let mut dismissed: Signal<HashSet<u64>> = use_signal(HashSet::new);
    let mut own_notices: Signal<Vec<Notification>> = use_signal(Vec::new);
    let mut refreshing = use_signal(|| false);

    #[cfg(feature = "web")]
    {
        use crate::api::renew_fleet_view;
        use gloo_timers::callback::Timeout;

        let mut live = live;
        let timer_handle: Signal<Option<Timeout>> = use_signal(|| None);

        use_drop({
            let mut timer_handle = timer_handle.clone();
            move || {
                if let Some(h) = timer_handle.write().take() {
                    h.cancel();
                }
            }
        });

        // re-read the view periodically while this route is live
        use_effect({
            let mut timer_handle = timer_handle.clone();
            move || {
                // subscribe to both so the timer is re-armed after every fetch
                let _ = view.read();
                let lease = (*live.read()).flatten();

                if let Some(prev) = timer_handle.write().take() {
                    prev.cancel();
                }
                let Some(lease) = lease else {
                    return;
                };
                info!("[fleet_dashboard] next view poll in {} ms", VIEW_POLL_MS);
                let handle = Timeout::new(VIEW_POLL_MS, move || {
                    spawn(async move {
                        if !renew_fleet_view(lease).await.unwrap_or(false) {
                            info!("[fleet_dashboard] lease {} lapsed, acquiring again", lease);
                            live.restart();
                        }
                    });
                    status.restart();
                    view.restart();
                });
                timer_handle.set(Some(handle));
            }
        });
    }

    let on_refresh = move |_| {
        refreshing.set(true);
        spawn(async move {
            if let Ok(Some(notice)) = refresh_fleet_now().await {
                let mut notices = own_notices.write();
                notices.retain(|n| !n.is_expired(notice.created_at));
                notices.push(notice);
            }
            refreshing.set(false);
            status.restart();
            view.restart();
        });
    };

    let on_dismiss = move |id: u64| {
        dismissed.write().insert(id);
    };

    let now = chrono::Utc::now();

    rsx! {
        div { class: "space-y-6",
            {
                match &*view_v {
                    Some(Ok(dto)) => {
                        let items = visible_notifications(
                            dto.notifications.iter().chain(own_notices.read().iter()),
                            &dismissed.read(),
                            now,
                        );
                        rsx! {
                            Toasts { items, on_dismiss }
                            div { class: "flex items-center justify-between text-xs text-slate-400",
                                if let Some(fleet) = &dto.fleet {
                                    time { datetime: fleet.captured_at.to_rfc3339(),
                                        {format!(
                                            "Last updated {} ({})",
                                            format_clock(&fleet.captured_at.to_rfc3339()),
                                            time_ago(fleet.captured_at, now)
                                        )}
                                    }
                                } else {
                                    span { "Waiting for the first update..." }
                                }
                                if matches!(*live.read(), Some(Some(_))) {
                                    div { class: "flex items-center gap-3",
                                        span { "Auto-refresh every {dto.refresh_interval_secs}s" }
                                        button {
                                            class: "rounded-lg border border-slate-700 px-3 py-1 hover:bg-slate-800 disabled:opacity-50",
                                            disabled: *refreshing.read(),
                                            onclick: on_refresh,
                                            if *refreshing.read() { "Refreshing..." } else { "Refresh" }
                                        }
                                    }
                                }
                            }
                            {
                                match &dto.fleet {
                                    Some(fleet) => rsx! {
                                        StatCards { stats: fleet.stats, avg_class: fleet.avg_battery_class }
                                        if show_vehicles {
                                            VehicleGrid { cards: fleet.cards.clone() }
                                        }
                                    },
                                    None => rsx! {
                                        div { class: "animate-pulse grid gap-4 sm:grid-cols-3",
                                            div { class: "h-28 bg-slate-800 rounded-2xl" }
                                            div { class: "h-28 bg-slate-800 rounded-2xl" }
                                            div { class: "h-28 bg-slate-800 rounded-2xl" }
                                        }
                                    },
                                }
                            }
                        }
                    }
                    Some(Err(_e)) => rsx! {
                        div { class: "text-center text-slate-300",
                            p { class: "text-lg", "Failed to load fleet data." }
                        }
                    },
                    // Only occurs on client-side navigations (not on first SSR render)
                    None => rsx! {
                        div { class: "animate-pulse space-y-3",
                            div { class: "h-9 w-28 bg-slate-800 rounded" }
                            div { class: "h-5 w-48 bg-slate-800 rounded" }
                        }
                    },
                }
            }
            {
                match &*status.read() {
                    Some(Ok(st)) if st.running => rsx! {
                        div { class: "text-xs text-slate-500 flex flex-wrap gap-x-4",
                            span { "Source: {st.source}" }
                            if let Some(next) = &st.next_tick_at {
                                span { {format!("Next refresh {}", format_clock(next))} }
                            }
                            if let Some(err) = &st.last_error {
                                span { class: "text-rose-400", "Last error: {err}" }
                            }
                        }
                    },
                    _ => rsx!( Fragment {} ),
                }
            }
        }
    }
}
