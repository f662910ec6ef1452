use dioxus::prelude::*;

mod api;
mod app;
mod components;
mod fleet;
mod shared;
mod utils;

#[cfg(feature = "server")]
mod backend;

pub const FAVICON: Asset = asset!("/assets/favicon.svg");
pub const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

#[cfg(feature = "server")]
use std::sync::Arc;

fn main() {
    #[cfg(feature = "server")]
    {
        dotenvy::dotenv().ok();
        backend::init_tracing();

        let config = match backend::FleetConfig::from_env() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[config] {e:#}");
                std::process::exit(1);
            }
        };
        let ctx = Arc::new(backend::AppContext::from_config(config));

        let mut args = std::env::args();
        let _bin = args.next();
        if let Some(cmd) = args.next() {
            if cmd == "snapshot" {
                // One-off read of the configured source, printed as JSON
                let rt = match tokio::runtime::Runtime::new() {
                    Ok(rt) => rt,
                    Err(e) => {
                        eprintln!("[snapshot] failed to start runtime: {e}");
                        std::process::exit(1);
                    }
                };
                rt.block_on(async move {
                    match ctx.source.fetch_snapshot().await {
                        Ok(snapshot) => match serde_json::to_string_pretty(&snapshot) {
                            Ok(json) => println!("{json}"),
                            Err(e) => {
                                eprintln!("[snapshot] failed to encode: {e}");
                                std::process::exit(1);
                            }
                        },
                        Err(e) => {
                            eprintln!("[snapshot] {} source failed: {e}", ctx.source.name());
                            std::process::exit(1);
                        }
                    }
                });
                return;
            }
        }

        if !backend::context::install(ctx) {
            eprintln!("[context] already installed");
        }
    }
    dioxus::launch(app::App);
}
