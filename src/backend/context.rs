#![cfg(feature = "server")]
use dioxus::logger::tracing::{info, warn};
use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::backend::config::{FleetConfig, SourceConfig};
use crate::backend::demo::DemoFleetSource;
use crate::backend::odoo::OdooFleetSource;
use crate::fleet::contact::{ContactSubmitter, SimulatedSubmitter};
use crate::fleet::refresher::{RefreshPolicy, Refresher};
use crate::fleet::source::FleetSource;
use crate::fleet::view::DashboardView;

/// Server functions have no way to receive arguments from `main`, so the
/// context built at boot is parked here. Nothing else reads it.
pub static APP: OnceCell<Arc<AppContext>> = OnceCell::new();

/// Everything the dashboard needs, built once at boot.
pub struct AppContext {
    pub source: Arc<dyn FleetSource>,
    pub view: Arc<DashboardView>,
    pub refresher: Refresher,
    pub contact: Arc<dyn ContactSubmitter>,
}

impl AppContext {
    pub fn from_config(config: FleetConfig) -> Self {
        let source = build_source(&config.source);
        let contact: Arc<dyn ContactSubmitter> =
            Arc::new(SimulatedSubmitter::new(config.contact_latency));
        Self::new(config.refresh, source, contact)
    }

    pub fn new(
        refresh: RefreshPolicy,
        source: Arc<dyn FleetSource>,
        contact: Arc<dyn ContactSubmitter>,
    ) -> Self {
        let view = Arc::new(DashboardView::new());
        let refresher = Refresher::new(source.clone(), view.clone(), refresh);
        Self {
            source,
            view,
            refresher,
            contact,
        }
    }
}

pub fn build_source(config: &SourceConfig) -> Arc<dyn FleetSource> {
    match config {
        SourceConfig::Demo { latency, drift } => {
            warn!(
                "[context] serving demo fleet data (drift={}); set ODOO_URL for a live backend",
                drift
            );
            Arc::new(DemoFleetSource::new(*latency, *drift))
        }
        SourceConfig::Odoo {
            url,
            model,
            session_id,
        } => {
            info!("[context] reading {} from {}", model, url);
            Arc::new(OdooFleetSource::new(url.clone(), model.clone(), session_id.clone()))
        }
    }
}

/// Installs the context for server functions. Only the first call wins.
pub fn install(ctx: Arc<AppContext>) -> bool {
    APP.set(ctx).is_ok()
}

pub fn app() -> Option<Arc<AppContext>> {
    APP.get().cloned()
}
