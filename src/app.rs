use dioxus::prelude::*;

use crate::api::vehicle_detail;
use crate::components::{ContactForm, FleetDashboard, VehicleCard};
use crate::{FAVICON, TAILWIND_CSS};

#[derive(Debug, Clone, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/fleet")]
        Fleet {},
        #[route("/vehicle/:id")]
        Vehicle { id: i64 },
        #[route("/about")]
        About {},
        #[route("/contact")]
        Contact {},
        #[route("/:..segments")]
        PageNotFound { segments: Vec<String> },
}

#[allow(non_snake_case)]
#[component]
pub fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Stylesheet { href: TAILWIND_CSS }
        document::Title { "Fleet Smart - EV Management" }
        document::Meta { name: "theme-color", content: "#020618" } // slate-950
        document::Meta { name: "color-scheme", content: "dark" }
        Router::<Route> {}
    }
}

#[allow(non_snake_case)]
#[component]
fn Shell() -> Element {
    rsx! {
        div { class: "min-h-screen bg-slate-950 text-slate-100 flex flex-col",
            header { class: "border-b border-slate-800",
                nav { class: "mx-auto flex max-w-5xl items-center justify-between px-6 py-4",
                    Link { class: "text-xl font-bold tracking-tight", to: Route::Home {}, "Fleet Smart" }
                    div { class: "flex gap-5 text-sm text-slate-300",
                        Link { to: Route::Home {}, "Home" }
                        Link { to: Route::Fleet {}, "Fleet" }
                        Link { to: Route::About {}, "About" }
                        Link { to: Route::Contact {}, "Contact" }
                    }
                }
            }
            main { class: "flex-1 p-6",
                Outlet::<Route> {}
            }
            Footer {}
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn Home() -> Element {
    let path = use_route::<Route>().to_string();
    rsx! {
        div { class: "mx-auto w-full max-w-5xl space-y-8",
            section { class: "text-center space-y-2 py-6",
                h1 { class: "text-4xl font-bold tracking-tight", "Fleet Smart" }
                p { class: "text-lg text-slate-400", "Advanced Electric Vehicle Fleet Management" }
            }
            FleetDashboard { path, show_vehicles: true }
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn Fleet() -> Element {
    let path = use_route::<Route>().to_string();
    rsx! {
        div { class: "mx-auto w-full max-w-5xl space-y-6",
            h1 { class: "text-2xl font-semibold tracking-tight text-slate-200", "Our Fleet" }
            FleetDashboard { path, show_vehicles: true }
        }
    }
}

/// One vehicle from the latest fleet data; unknown ids get the not-found page.
#[allow(non_snake_case)]
#[component]
fn Vehicle(id: i64) -> Element {
    let card = use_server_future(move || vehicle_detail(id))?;
    let card_v = card.read_unchecked();
    rsx! {
        div { class: "mx-auto w-full max-w-md space-y-4",
            Link { class: "text-sm text-slate-400 hover:text-slate-200", to: Route::Fleet {}, "← Back to fleet" }
            {
                match &*card_v {
                    Some(Ok(Some(card))) => rsx! {
                        VehicleCard { card: card.clone() }
                    },
                    Some(Ok(None)) => rsx! {
                        NotFound { what: format!("Vehicle #{id}") }
                    },
                    Some(Err(_e)) => rsx! {
                        p { class: "text-center text-lg text-slate-300", "Failed to load fleet data." }
                    },
                    None => rsx! {
                        div { class: "animate-pulse h-64 bg-slate-800 rounded-2xl" }
                    },
                }
            }
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn About() -> Element {
    rsx! {
        div { class: "mx-auto w-full max-w-3xl space-y-6",
            h1 { class: "text-2xl font-semibold tracking-tight text-slate-200", "About Fleet Smart" }
            p { class: "text-slate-300",
                "Fleet Smart keeps an electric fleet on the road: live battery levels, "
                "where each vehicle is and who is driving it, on one dashboard."
            }
            div { class: "grid gap-4 sm:grid-cols-3",
                for (title, body) in ABOUT_POINTS {
                    div { class: "rounded-2xl border border-slate-800 bg-slate-900/60 p-5",
                        h3 { class: "font-semibold text-slate-100", "{title}" }
                        p { class: "text-sm text-slate-400", "{body}" }
                    }
                }
            }
        }
    }
}

const ABOUT_POINTS: [(&str, &str); 3] = [
    ("Battery first", "Charge levels refresh every 30 seconds while the dashboard is open."),
    ("Whole fleet", "Availability, charging and maintenance at a glance."),
    ("Built on Odoo", "Vehicle records come straight from your Odoo fleet backend."),
];

#[allow(non_snake_case)]
#[component]
fn PageNotFound(segments: Vec<String>) -> Element {
    rsx! {
        NotFound { what: format!("/{}", segments.join("/")) }
    }
}

#[allow(non_snake_case)]
#[component]
fn NotFound(what: String) -> Element {
    rsx! {
        div { class: "mx-auto max-w-md py-16 text-center space-y-3",
            h1 { class: "text-3xl font-bold text-slate-200", "Not found" }
            p { class: "text-slate-400", "{what} does not exist." }
            Link { class: "text-emerald-400 hover:underline", to: Route::Home {}, "Go home" }
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn Contact() -> Element {
    rsx! {
        div { class: "w-full max-w-xl mx-auto",
            ContactForm {}
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn Footer() -> Element {
    rsx! {
        footer { class: "border-t border-slate-800 bg-slate-900 py-8 text-sm text-slate-400",
            div { class: "mx-auto grid max-w-5xl gap-6 px-6 sm:grid-cols-3",
                div {
                    h5 { class: "font-semibold text-slate-200", "Fleet Smart" }
                    p { "Advanced Electric Vehicle Fleet Management" }
                }
                ul { class: "space-y-1",
                    li { Link { to: Route::Home {}, "Home" } }
                    li { Link { to: Route::Fleet {}, "Fleet" } }
                    li { Link { to: Route::About {}, "About" } }
                    li { Link { to: Route::Contact {}, "Contact" } }
                }
                p { class: "sm:text-right", "© 2025 Fleet Smart. All rights reserved." }
            }
        }
    }
}
